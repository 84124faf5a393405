//! JobScout Sources - Source definition system for job listing extraction.
//!
//! This crate provides the per-source configuration consumed by the
//! extractor. Every supported job board runs through the same extraction
//! algorithm; what differs between boards is pure data: a search URL
//! template, a set of CSS selectors, and which fields are mandatory. That
//! data lives here.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): Strongly-typed source configuration
//! - **Built-ins** ([`builtin`]): Compiled-in definitions for the supported boards
//! - **Registry** ([`registry`]): In-memory cache with lookup support
//! - **Errors** ([`error`]): Source-specific error types
//!
//! # Example
//!
//! ```rust
//! use jobscout_core::Source;
//! use jobscout_sources::SourceRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SourceRegistry::builtin();
//!
//! let definition = registry.get(Source::Linkedin)?;
//! assert!(definition.link_required);
//! assert!(definition.search_url.contains("{keywords}"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod builtin;
pub mod definition;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use definition::{SelectorSet, SourceDefinition};
pub use error::{Result, SourceError};
pub use registry::SourceRegistry;
