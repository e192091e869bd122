pub mod config;
pub mod logging;

pub mod cache;
pub mod cache_key;
pub mod fetch;
pub mod placeholder;
pub mod recipe;
pub mod resolver;
pub mod storage;
