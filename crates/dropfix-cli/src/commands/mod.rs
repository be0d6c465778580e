//! Command implementations for dropfix-cli

pub mod run;
pub mod status;

pub use run::run_walk;
pub use status::run_status;
