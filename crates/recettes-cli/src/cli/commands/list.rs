//! `recettes list` – the sidebar: one line per recipe.

use anyhow::Result;
use recettes_core::recipe::Recipe;

use crate::cli::app::App;

pub fn run_list(app: &App, json: bool) -> Result<()> {
    if json {
        let recipes: Vec<&Recipe> = app.book.iter().collect();
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }
    for (i, r) in app.book.iter().enumerate() {
        println!("{}", format_row(i, r));
    }
    Ok(())
}

pub(crate) fn format_row(index: usize, recipe: &Recipe) -> String {
    format!("{:>3}  {}  —  {}", index + 1, recipe.name, recipe.country)
}
