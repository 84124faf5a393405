//! Browser session pool for JavaScript-heavy job boards.
//!
//! Provides a single lazily-launched headless browser shared by all
//! scrape tasks, handing out per-task page sessions.

pub mod error;
pub mod pool;
pub mod session;

pub use error::{BrowserError, Result};
pub use pool::{LaunchOptions, SessionPool};
pub use session::PageSession;
