//! CLI command handlers, one file per command.

mod cache;
mod fetch;
mod list;
mod show;

pub use cache::{run_cache_clear, run_cache_list};
pub use fetch::run_fetch;
pub use list::run_list;
pub use show::run_show;

#[cfg(test)]
pub(crate) use list::format_row;
#[cfg(test)]
pub(crate) use show::{format_detail, image_line};
