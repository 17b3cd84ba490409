//! Shared plumbing for the ripper frontends: configuration and paced,
//! progress-logged iteration over records.

pub mod pacing;
pub mod settings;

pub use pacing::{IterPacingExt, Paced, Tracked, format_hms};
pub use settings::{Config, ConfigError, Overrides, settings_path};
