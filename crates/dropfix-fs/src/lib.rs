//! Filesystem layer for dropfix
//!
//! Provides the scratch area used to stage exclusion targets, path
//! containment checks and the non-clobbering move the exclusion engine
//! relies on.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod scratch;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{expand_home, is_within, resolve_lenient, validate_entry_name};
pub use scratch::ScratchArea;
