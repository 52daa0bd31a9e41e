//! Run configuration.
//!
//! A [`RunConfig`] is built once per invocation from a built-in
//! [`ProductProfile`], an optional TOML [`ConfigOverlay`] and command-line
//! extras. It is never mutated while a run is in progress; the effective
//! allow-lists are derived from it with [`RunConfig::policy`].
//!
//! Overlay file format:
//!
//! ```toml
//! profile = "logstash"
//! reference_role = "legacy"
//! allowed_insertions = ["cluster_uuid"]
//! deletion_exempt_doc_types = ["node_stats"]
//!
//! [exit]
//! mode = "fixed"
//! code = 21
//! ```

use crate::errors::{ParityError, Result};
use crate::normalize::NormalizerRegistry;
use crate::policy::PolicyConfig;
use crate::profiles::ProductProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display name of the reference collection path
pub const DEFAULT_REFERENCE_ROLE: &str = "internally";

/// Display name of the candidate collection path
pub const DEFAULT_CANDIDATE_ROLE: &str = "Metricbeat";

/// Base added to the violation count by [`ExitStrategy::Offset`]
pub const DEFAULT_EXIT_OFFSET: u8 = 100;

/// Failure code of [`ExitStrategy::Fixed`] as used by the legacy comparisons
pub const DEFAULT_FIXED_EXIT_CODE: u8 = 21;

/// How a failed run's violation count maps to a process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "code", rename_all = "snake_case")]
pub enum ExitStrategy {
    /// `base + violations`, clamped to 255
    Offset(u8),
    /// The same code whatever the count
    Fixed(u8),
}

impl Default for ExitStrategy {
    fn default() -> Self {
        ExitStrategy::Offset(DEFAULT_EXIT_OFFSET)
    }
}

impl ExitStrategy {
    /// Exit code for a run that found `violations` parity violations
    ///
    /// # Example
    /// ```
    /// use docparity_core::config::ExitStrategy;
    ///
    /// assert_eq!(ExitStrategy::Offset(100).exit_code(0), 0);
    /// assert_eq!(ExitStrategy::Offset(100).exit_code(3), 103);
    /// assert_eq!(ExitStrategy::Offset(100).exit_code(500), 255);
    /// assert_eq!(ExitStrategy::Fixed(21).exit_code(7), 21);
    /// ```
    pub fn exit_code(&self, violations: usize) -> i32 {
        if violations == 0 {
            return 0;
        }
        match self {
            ExitStrategy::Offset(base) => {
                let code = usize::from(*base).saturating_add(violations);
                code.min(usize::from(u8::MAX)) as i32
            }
            ExitStrategy::Fixed(code) => i32::from(*code),
        }
    }

    /// # Errors
    ///
    /// `InvalidInput` for a fixed code of 0, which would report failure as success.
    pub fn validate(&self) -> Result<()> {
        match self {
            ExitStrategy::Fixed(0) => Err(ParityError::InvalidInput {
                reason: "fixed exit code must be non-zero".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Settings read from a `--config` TOML file
///
/// Every key is optional; list keys add to the profile's lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub profile: Option<ProductProfile>,
    #[serde(default)]
    pub reference_role: Option<String>,
    #[serde(default)]
    pub candidate_role: Option<String>,
    #[serde(default)]
    pub allowed_insertions: Vec<String>,
    #[serde(default)]
    pub allowed_deletions: Vec<String>,
    #[serde(default)]
    pub required_deletions: Vec<String>,
    #[serde(default)]
    pub deletion_exempt_doc_types: Vec<String>,
    #[serde(default)]
    pub exit: Option<ExitStrategy>,
}

impl ConfigOverlay {
    /// Parse overlay TOML text; `origin` is only used in error messages
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed TOML, unknown keys or an unknown profile.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let overlay: ConfigOverlay =
            toml::from_str(text).map_err(|e| ParityError::InvalidConfig {
                path: origin.to_path_buf(),
                reason: e.message().to_string(),
            })?;
        if let Some(exit) = &overlay.exit {
            exit.validate().map_err(|e| ParityError::InvalidConfig {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        Ok(overlay)
    }

    /// Read and parse an overlay file
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ParityError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let overlay = Self::from_toml_str(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded config overlay");
        Ok(overlay)
    }
}

/// Everything that parameterizes one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub profile: ProductProfile,
    pub reference_role: String,
    pub candidate_role: String,
    pub extra_allowed_insertions: Vec<String>,
    pub extra_allowed_deletions: Vec<String>,
    pub extra_required_deletions: Vec<String>,
    pub extra_deletion_exempt_doc_types: Vec<String>,
    pub exit_strategy: ExitStrategy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(ProductProfile::default())
    }
}

impl RunConfig {
    pub fn new(profile: ProductProfile) -> Self {
        Self {
            profile,
            reference_role: DEFAULT_REFERENCE_ROLE.to_string(),
            candidate_role: DEFAULT_CANDIDATE_ROLE.to_string(),
            extra_allowed_insertions: Vec::new(),
            extra_allowed_deletions: Vec::new(),
            extra_required_deletions: Vec::new(),
            extra_deletion_exempt_doc_types: Vec::new(),
            exit_strategy: ExitStrategy::default(),
        }
    }

    pub fn with_roles(mut self, reference: impl Into<String>, candidate: impl Into<String>) -> Self {
        self.reference_role = reference.into();
        self.candidate_role = candidate.into();
        self
    }

    pub fn with_allowed_insertions<I: IntoIterator<Item = String>>(mut self, extras: I) -> Self {
        self.extra_allowed_insertions.extend(extras);
        self
    }

    pub fn with_allowed_deletions<I: IntoIterator<Item = String>>(mut self, extras: I) -> Self {
        self.extra_allowed_deletions.extend(extras);
        self
    }

    pub fn with_exit_strategy(mut self, exit_strategy: ExitStrategy) -> Self {
        self.exit_strategy = exit_strategy;
        self
    }

    /// Fold an overlay into this configuration
    ///
    /// The overlay's `profile` is not applied here; callers pick the profile
    /// before building the config.
    pub fn with_overlay(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(role) = overlay.reference_role {
            self.reference_role = role;
        }
        if let Some(role) = overlay.candidate_role {
            self.candidate_role = role;
        }
        self.extra_allowed_insertions.extend(overlay.allowed_insertions);
        self.extra_allowed_deletions.extend(overlay.allowed_deletions);
        self.extra_required_deletions.extend(overlay.required_deletions);
        self.extra_deletion_exempt_doc_types
            .extend(overlay.deletion_exempt_doc_types);
        if let Some(exit) = overlay.exit {
            self.exit_strategy = exit;
        }
        self
    }

    /// # Errors
    ///
    /// `InvalidInput` for empty role names or an unusable exit strategy.
    pub fn validate(&self) -> Result<()> {
        if self.reference_role.trim().is_empty() || self.candidate_role.trim().is_empty() {
            return Err(ParityError::InvalidInput {
                reason: "role names must not be empty".to_string(),
            });
        }
        self.exit_strategy.validate()
    }

    /// Effective policy: the profile's lists extended with this run's extras
    pub fn policy(&self) -> PolicyConfig {
        let base = self.profile.policy();
        let mut deletion_exempt_doc_types = base.deletion_exempt_doc_types;
        deletion_exempt_doc_types.extend(self.extra_deletion_exempt_doc_types.iter().cloned());

        PolicyConfig {
            allowed_insertions: base
                .allowed_insertions
                .extended(self.extra_allowed_insertions.iter().cloned()),
            allowed_deletions: base
                .allowed_deletions
                .extended(self.extra_allowed_deletions.iter().cloned()),
            required_deletions: base
                .required_deletions
                .extended(self.extra_required_deletions.iter().cloned()),
            deletion_exempt_doc_types,
        }
    }

    /// # Errors
    ///
    /// Propagates registry construction failures.
    pub fn registry(&self) -> Result<NormalizerRegistry> {
        self.profile.registry()
    }
}
