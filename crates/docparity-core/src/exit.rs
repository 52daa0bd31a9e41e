//! Process exit codes.
//!
//! Violation runs map through [`ExitStrategy`](crate::config::ExitStrategy);
//! fatal errors map through [`error_exit_code`].

use crate::errors::ParityError;
use std::path::Path;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_REFERENCE_DIR: i32 = 11;
pub const EXIT_CANDIDATE_DIR: i32 = 12;
pub const EXIT_DOCUMENT_ERROR: i32 = 13;

/// Exit code for a run that failed before producing a report
///
/// Directory errors are attributed by comparing the failing path with the
/// reference directory the run was given.
pub fn error_exit_code(err: &ParityError, reference_dir: &Path) -> i32 {
    match err {
        ParityError::InvalidInput { .. } | ParityError::UnknownProfile { .. } => EXIT_USAGE,
        ParityError::PathNotFound { path, .. } | ParityError::NotADirectory { path, .. } => {
            if path == reference_dir {
                EXIT_REFERENCE_DIR
            } else {
                EXIT_CANDIDATE_DIR
            }
        }
        _ => EXIT_DOCUMENT_ERROR,
    }
}
