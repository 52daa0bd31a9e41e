//! Built-in product profiles.
//!
//! Each profile bundles the allow-lists, required deletions, deletion-exempt
//! types and normalizers for one monitored product.

use crate::errors::{ParityError, Result};
use crate::normalize::{NormalizationRule, Normalizer, NormalizerRegistry};
use crate::policy::{AllowList, PolicyConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel substituted for generated node identifiers
pub const NODE_SENTINEL: &str = "__node__";

/// Fields every Metricbeat-indexed document adds at the top level
const METRICBEAT_FIELDS: &[&str] = &[
    "service",
    "ecs",
    "agent",
    "@timestamp",
    "host",
    "event",
    "metricset",
];

/// Kibana documents carry `beat` where the others carry `ecs`
const KIBANA_METRICBEAT_FIELDS: &[&str] = &[
    "service",
    "beat",
    "agent",
    "@timestamp",
    "host",
    "event",
    "metricset",
];

const SOURCE_NODE: &str = "source_node";

/// Monitored product whose documents are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductProfile {
    #[default]
    Elasticsearch,
    Logstash,
    Kibana,
    Beats,
    /// No allow-lists and no normalizers: plain structural equality
    Generic,
}

impl ProductProfile {
    pub const ALL: [ProductProfile; 5] = [
        ProductProfile::Elasticsearch,
        ProductProfile::Logstash,
        ProductProfile::Kibana,
        ProductProfile::Beats,
        ProductProfile::Generic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProductProfile::Elasticsearch => "elasticsearch",
            ProductProfile::Logstash => "logstash",
            ProductProfile::Kibana => "kibana",
            ProductProfile::Beats => "beats",
            ProductProfile::Generic => "generic",
        }
    }

    /// Base policy before any per-run extras
    pub fn policy(&self) -> PolicyConfig {
        let insertions = match self {
            ProductProfile::Generic => &[][..],
            ProductProfile::Kibana => KIBANA_METRICBEAT_FIELDS,
            _ => METRICBEAT_FIELDS,
        };
        let required_deletions = match self {
            ProductProfile::Generic => AllowList::new(),
            _ => AllowList::from_iter([SOURCE_NODE]),
        };
        // node_stats and shards docs keep `source_node` on both sides
        let deletion_exempt_doc_types = match self {
            ProductProfile::Elasticsearch => ["node_stats", "shards"]
                .into_iter()
                .map(String::from)
                .collect(),
            _ => Default::default(),
        };

        PolicyConfig {
            allowed_insertions: insertions.iter().copied().collect(),
            allowed_deletions: AllowList::new(),
            required_deletions,
            deletion_exempt_doc_types,
        }
    }

    /// Normalizers for this product's document types
    ///
    /// # Errors
    ///
    /// `DuplicateNormalizer` if two normalizers target the same type.
    pub fn registry(&self) -> Result<NormalizerRegistry> {
        let mut registry = NormalizerRegistry::new();
        for normalizer in self.normalizers() {
            registry.register(normalizer)?;
        }
        Ok(registry)
    }

    fn normalizers(&self) -> Vec<Normalizer> {
        match self {
            ProductProfile::Elasticsearch => elasticsearch_normalizers(),
            ProductProfile::Logstash => vec![Normalizer::new(
                "logstash_stats",
                vec![NormalizationRule::SortArrayBy {
                    path: "logstash_stats.pipelines.0.vertices".to_string(),
                    key: "id".to_string(),
                }],
            )],
            ProductProfile::Kibana => vec![Normalizer::new(
                "kibana_stats",
                vec![NormalizationRule::RemoveField {
                    path: "kibana_stats.response_times.average".to_string(),
                }],
            )],
            ProductProfile::Beats => vec![Normalizer::new(
                "beats_stats",
                vec![NormalizationRule::ClearIfSameLength {
                    path: "beats_stats.metrics.filebeat.harvester.files".to_string(),
                }],
            )],
            ProductProfile::Generic => Vec::new(),
        }
    }
}

fn project_source_node(keys: &[&str]) -> NormalizationRule {
    NormalizationRule::ProjectKeys {
        path: SOURCE_NODE.to_string(),
        keys: keys.iter().map(|key| key.to_string()).collect(),
    }
}

fn elasticsearch_normalizers() -> Vec<Normalizer> {
    vec![
        Normalizer::new(
            "index_recovery",
            vec![NormalizationRule::KeepFirstElement {
                path: "index_recovery.shards".to_string(),
            }],
        ),
        Normalizer::new(
            "cluster_stats",
            vec![
                NormalizationRule::ReplaceWithSentinel {
                    path: "cluster_state.master_node".to_string(),
                    sentinel: NODE_SENTINEL.to_string(),
                },
                NormalizationRule::RenameKeysToSentinel {
                    path: "cluster_state.nodes".to_string(),
                    sentinel: NODE_SENTINEL.to_string(),
                },
                NormalizationRule::StripCandidateIlmPolicy {
                    ilm_path: "stack_stats.xpack.ilm".to_string(),
                },
                NormalizationRule::SubsetContainment {
                    path: "cluster_stats.indices.mappings.field_types".to_string(),
                },
            ],
        ),
        Normalizer::new(
            "node_stats",
            vec![project_source_node(&["uuid", "name", "transport_address"])],
        ),
        Normalizer::new(
            "shards",
            vec![
                project_source_node(&["uuid", "name"]),
                NormalizationRule::DropNullOrAbsent {
                    path: "shard.relocating_node".to_string(),
                },
            ],
        ),
    ]
}

impl fmt::Display for ProductProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProductProfile {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self> {
        ProductProfile::ALL
            .into_iter()
            .find(|profile| profile.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParityError::UnknownProfile {
                name: s.to_string(),
            })
    }
}
