//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod call;
mod completions;
mod config;
mod run;
mod surface;

pub use call::handle_call;
pub use completions::handle_completions;
pub use config::handle_config;
pub use run::handle_run;
pub use surface::handle_surface;
