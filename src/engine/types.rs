//! Discovery result types

use crate::pagination::DiscoveredPagination;
use crate::types::DiscoveredEndpoint;
use serde::{Deserialize, Serialize};

/// How the endpoints in a result were discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// A machine-readable spec document was found and parsed
    OpenApi,
    /// Endpoints were inferred from heuristic probing
    Probe,
    /// Nothing was discovered
    #[default]
    None,
}

impl std::fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryStrategy::OpenApi => write!(f, "openapi"),
            DiscoveryStrategy::Probe => write!(f, "probe"),
            DiscoveryStrategy::None => write!(f, "none"),
        }
    }
}

/// The single structured result of a discovery run
///
/// Always well-formed, possibly empty: the caller is an interactive
/// onboarding flow that must always have something to show. The caller
/// owns serialization into persisted connector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Discovered collection endpoints
    #[serde(default)]
    pub endpoints: Vec<DiscoveredEndpoint>,

    /// Detected pagination configuration
    pub pagination: DiscoveredPagination,

    /// URL the spec document was fetched from, when one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_url: Option<String>,

    /// How the endpoints were discovered
    pub strategy: DiscoveryStrategy,

    /// API title from the spec's info block
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_title: String,

    /// API description from the spec's info block
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_description: String,

    /// Stage failures accumulated during the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Default for DiscoveryResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl DiscoveryResult {
    /// An empty result with no endpoints and no pagination
    pub fn empty() -> Self {
        Self {
            endpoints: Vec::new(),
            pagination: DiscoveredPagination::none(),
            spec_url: None,
            strategy: DiscoveryStrategy::None,
            api_title: String::new(),
            api_description: String::new(),
            errors: Vec::new(),
        }
    }

    /// Check whether anything was discovered
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
