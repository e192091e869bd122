//! `recettes show <recipe>` – the detail view.
//!
//! The image is resolved through the asynchronous contract and its completion
//! is pumped on the main thread, the same way a UI event loop would.

use anyhow::Result;
use recettes_core::recipe::Recipe;
use recettes_core::resolver::{CompletionQueue, ImageOutcome};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

use crate::cli::app::App;

pub fn run_show(app: &App, query: &str, json: bool) -> Result<()> {
    let (_, recipe) = app.recipe(query)?;

    let mut queue = CompletionQueue::new();
    let slot: Rc<RefCell<Option<ImageOutcome>>> = Rc::new(RefCell::new(None));
    let s = Rc::clone(&slot);
    app.resolver
        .resolve_async(recipe, &mut queue, move |outcome| *s.borrow_mut() = Some(outcome));
    queue.drain(app.completion_timeout());

    let outcome = slot.borrow_mut().take().unwrap_or_else(|| {
        tracing::warn!(recipe = %recipe.name, "image did not resolve in time");
        ImageOutcome::Unavailable {
            remote_url: recipe.image_url.clone(),
        }
    });

    if json {
        let value = serde_json::json!({
            "recipe": recipe,
            "image": {
                "status": outcome.label(),
                "path": outcome.local_path().map(|p| p.display().to_string()),
                "remote_url": outcome.remote_url(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", format_detail(recipe, &outcome));
    }
    Ok(())
}

/// Where the image can be seen, as shown above the recipe text.
pub(crate) fn image_line(outcome: &ImageOutcome) -> String {
    match (outcome.local_path(), outcome.remote_url()) {
        (Some(path), _) => format!("Image: {} ({})", path.display(), outcome.label()),
        (None, Some(url)) => format!("Image: {} (remote)", url),
        (None, None) => "Image: none".to_string(),
    }
}

/// Full detail view: header, image, bulleted ingredients, numbered steps.
pub(crate) fn format_detail(recipe: &Recipe, outcome: &ImageOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} — {}", recipe.name, recipe.country);
    let _ = writeln!(out, "{}", image_line(outcome));
    let _ = writeln!(out);
    let _ = writeln!(out, "Ingrédients");
    for ing in &recipe.ingredients {
        let _ = writeln!(out, "• {}", ing);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Préparation");
    for (i, step) in recipe.steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }
    out
}
