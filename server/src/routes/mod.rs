//! Route handlers.

mod health;
mod scrape;

pub use health::health;
pub use scrape::scrape;
