//! Deterministic cache filenames for recipe images.
//!
//! A recipe's image is stored under the slug of its name plus `.jpg`. Recipes
//! whose name slugs to nothing fall back to the basename of their image URL.

mod path;
mod sanitize;
mod slug;

pub use path::filename_from_url_path;
pub use sanitize::{sanitize_file_name, NAME_MAX};
pub use slug::slugify;

use crate::recipe::Recipe;
use crate::storage::TEMP_SUFFIX;
use sanitize::truncate_bytes;

/// Extension used for name-derived cache files.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Filename used when neither the name nor the URL yields anything usable.
const DEFAULT_FILE_NAME: &str = "image.jpg";

/// Longest derived filename. Leaves room for the staging suffix so
/// `<name>.tmp` still fits in NAME_MAX.
pub const MAX_FILE_NAME: usize = NAME_MAX - TEMP_SUFFIX.len();

/// Derives the cache filename for a recipe's image.
///
/// # Examples
///
/// - `"Yassa au poulet"` → `"yassa_au_poulet.jpg"`
/// - `"Mafé"` → `"mafe.jpg"`
/// - `"???"` with URL `https://host/a/dish.png` → `"dish.png"`
pub fn derive_file_name(recipe: &Recipe) -> String {
    let slug = slugify(&recipe.name);
    if !slug.is_empty() {
        let stem = truncate_bytes(&slug, MAX_FILE_NAME - IMAGE_EXTENSION.len() - 1);
        return format!("{}.{}", stem, IMAGE_EXTENSION);
    }

    let from_url = recipe
        .image_url
        .as_deref()
        .and_then(filename_from_url_path)
        .map(|raw| truncate_bytes(&sanitize_file_name(&raw), MAX_FILE_NAME).to_string())
        .filter(|s| !s.is_empty() && s != "." && s != "..");

    from_url.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeBook;
    use std::collections::HashSet;

    #[test]
    fn derive_from_name() {
        let r = Recipe::with_image("Yassa au poulet", "https://example.com/x.jpg");
        assert_eq!(derive_file_name(&r), "yassa_au_poulet.jpg");
        let r = Recipe::with_image("Tagine d'agneau", "https://example.com/x.jpg");
        assert_eq!(derive_file_name(&r), "tagine_dagneau.jpg");
    }

    #[test]
    fn derive_is_deterministic() {
        let r = Recipe::with_image("Attiéké", "https://example.com/Attieke.jpg");
        assert_eq!(derive_file_name(&r), derive_file_name(&r.clone()));
        assert_eq!(derive_file_name(&r), "attieke.jpg");
    }

    #[test]
    fn derive_falls_back_to_url_basename() {
        let r = Recipe::with_image("???", "https://cdn.example.com/a/b/dish.png?w=300");
        assert_eq!(derive_file_name(&r), "dish.png");
    }

    #[test]
    fn derive_default_when_nothing_usable() {
        let mut r = Recipe::with_image("!!", "https://example.com/");
        assert_eq!(derive_file_name(&r), "image.jpg");
        r.image_url = None;
        assert_eq!(derive_file_name(&r), "image.jpg");
    }

    #[test]
    fn long_name_leaves_room_for_temp_suffix() {
        let r = Recipe::with_image(&"Poulet ".repeat(80), "https://example.com/x.jpg");
        let name = derive_file_name(&r);
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), MAX_FILE_NAME);
        assert!(name.len() + TEMP_SUFFIX.len() <= NAME_MAX);
    }

    #[test]
    fn long_url_basename_leaves_room_for_temp_suffix() {
        let url = format!("https://example.com/{}.png", "d".repeat(400));
        let r = Recipe::with_image("???", &url);
        let name = derive_file_name(&r);
        assert_eq!(name, "d".repeat(MAX_FILE_NAME));
        assert!(name.len() + TEMP_SUFFIX.len() <= NAME_MAX);
    }

    #[test]
    fn builtin_names_are_distinct() {
        let book = RecipeBook::builtin();
        let names: HashSet<String> = book.iter().map(derive_file_name).collect();
        assert_eq!(names.len(), book.len());
    }
}
