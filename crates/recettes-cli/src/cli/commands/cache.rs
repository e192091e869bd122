//! `recettes cache list|clear`.

use anyhow::Result;

use crate::cli::app::App;

pub fn run_cache_list(app: &App, checksum: bool) -> Result<()> {
    let cache = app.resolver.cache();
    let entries = cache.entries()?;
    if entries.is_empty() {
        println!("No cached images in {}.", cache.dir().display());
        return Ok(());
    }
    for e in &entries {
        if checksum {
            println!("{}  {:>10}  {}", cache.checksum(e)?, e.size, e.file_name);
        } else {
            println!("{:>10}  {}", e.size, e.file_name);
        }
    }
    Ok(())
}

pub fn run_cache_clear(app: &App) -> Result<()> {
    let cache = app.resolver.cache();
    let removed = cache.clear()?;
    println!("Removed {} cached image(s) from {}.", removed, cache.dir().display());
    Ok(())
}
