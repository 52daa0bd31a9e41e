//! Per-document-type normalization applied before diffing.
//!
//! A [`NormalizerRegistry`] maps a document type to a [`Normalizer`], an
//! ordered list of declarative [`NormalizationRule`]s. Normalization only
//! mutates the loaded documents; allow-lists are never touched.

pub mod registry;
pub mod rules;

pub use registry::{Normalizer, NormalizerRegistry};
pub use rules::NormalizationRule;
