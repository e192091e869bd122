//! Recipe records and the immutable recipe book handed to the front-end.

mod catalog;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

/// A named dish with its ingredients, steps and optional remote image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub country: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Recipe {
    /// Recipe with only a name and image URL (handy for tests and ad-hoc lookups).
    pub fn with_image(name: &str, image_url: &str) -> Self {
        Self {
            name: name.to_string(),
            country: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            image_url: Some(image_url.to_string()),
        }
    }
}

/// Immutable, ordered collection of recipes. Built once at startup and passed
/// to the front-end at construction.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The ten built-in recipes.
    pub fn builtin() -> Self {
        Self::new(catalog::builtin_recipes())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Finds a recipe by 1-based position (as shown in listings) or by name.
    ///
    /// Name matching ignores case, accents and surrounding whitespace, so
    /// `"mafe"` finds `"Mafé"`.
    pub fn find(&self, query: &str) -> Option<(usize, &Recipe)> {
        let query = query.trim();
        if let Ok(n) = query.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.recipes.get(i).map(|r| (i, r)));
        }
        let wanted = normalize(query);
        self.recipes
            .iter()
            .enumerate()
            .find(|(_, r)| normalize(&r.name) == wanted)
    }
}

impl<'a> IntoIterator for &'a RecipeBook {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

fn normalize(s: &str) -> String {
    deunicode(s).trim().to_lowercase()
}
