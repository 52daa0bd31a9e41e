//! docparity core - monitoring document parity engine
//!
//! Checks that two independently collected sets of monitoring documents (a
//! reference collection path and a candidate one) are structurally
//! equivalent modulo known, allow-listed differences:
//! - Document loading from `<doc_type>.json` directories
//! - Per-type declarative normalization
//! - Structural tree diffing with full paths
//! - Allow-list policy evaluation producing violations
//! - Console, JSON and Markdown reporting with exit-code strategies

pub mod config;
pub mod diff;
pub mod errors;
pub mod exit;
pub mod loader;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod profiles;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use config::{ConfigOverlay, ExitStrategy, RunConfig};
pub use errors::{ExError, ExErrorKind, ParityError, Result};
pub use model::{Document, DocumentPair};
pub use policy::{AllowList, PolicyConfig, Violation, ViolationKind};
pub use profiles::ProductProfile;
pub use report::{Reporter, RunReport};
pub use runner::ParityRunner;
