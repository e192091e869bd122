//! `recettes fetch [recipe...]` – resolve images concurrently, report as they land.

use anyhow::Result;
use recettes_core::recipe::Recipe;
use recettes_core::resolver::{CompletionQueue, ImageOutcome};
use std::cell::RefCell;
use std::rc::Rc;

use super::show::image_line;
use crate::cli::app::App;

pub fn run_fetch(app: &App, queries: &[String]) -> Result<()> {
    let recipes: Vec<&Recipe> = if queries.is_empty() {
        app.book.iter().collect()
    } else {
        queries
            .iter()
            .map(|q| app.recipe(q).map(|(_, r)| r))
            .collect::<Result<_>>()?
    };

    let mut queue = CompletionQueue::new();
    let fallbacks = Rc::new(RefCell::new(0usize));
    for recipe in &recipes {
        let name = recipe.name.clone();
        let fb = Rc::clone(&fallbacks);
        app.resolver
            .resolve_async(recipe, &mut queue, move |outcome: ImageOutcome| {
                if outcome.is_fallback() {
                    *fb.borrow_mut() += 1;
                }
                println!("{:<18} {}", name, image_line(&outcome));
            });
    }

    queue.drain(app.completion_timeout());
    let unfinished = queue.pending();
    let total = recipes.len();
    println!(
        "{} of {} images resolved ({} fallback, {} still pending)",
        total - unfinished,
        total,
        fallbacks.borrow(),
        unfinished
    );
    Ok(())
}
