//! Cross-platform integration strategy.
//!
//! Platform names here are whatever the architect model wrote; they are
//! informational and not checked against the registry.

use serde::{Deserialize, Serialize};

use super::lenient;

/// An endpoint every participating platform must agree on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiContract {
    /// Path of the endpoint.
    #[serde(default, deserialize_with = "lenient::string")]
    pub endpoint: String,
    /// HTTP method.
    #[serde(default, deserialize_with = "lenient::string")]
    pub method: String,
    /// Platforms that produce or consume it.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub platforms: Vec<String>,
    /// Request body shape.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<String>,
    /// Response body shape.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<String>,
}

/// A type definition shared across platforms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SharedType {
    /// Type name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Textual definition.
    #[serde(default, deserialize_with = "lenient::string")]
    pub definition: String,
    /// Platforms using it.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub platforms: Vec<String>,
}

/// One hand-over in the cross-platform build order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegrationStep {
    /// Position in the sequence.
    #[serde(default, deserialize_with = "lenient::number")]
    pub order: u32,
    /// Platform doing the work.
    #[serde(default, deserialize_with = "lenient::string")]
    pub platform: String,
    /// Platform it waits on, if any.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub depends_on: Option<String>,
    /// What it hands over.
    #[serde(default, deserialize_with = "lenient::string")]
    pub deliverable: String,
}

/// An end-to-end scenario spanning platforms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegrationTest {
    /// Scenario name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Platforms involved.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub platforms: Vec<String>,
    /// Scenario text.
    #[serde(default, deserialize_with = "lenient::string")]
    pub scenario: String,
}

impl From<String> for ApiContract {
    fn from(endpoint: String) -> Self {
        Self { endpoint, ..Self::default() }
    }
}

impl From<String> for SharedType {
    fn from(name: String) -> Self {
        Self { name, ..Self::default() }
    }
}

impl From<String> for IntegrationStep {
    fn from(deliverable: String) -> Self {
        Self { deliverable, ..Self::default() }
    }
}

impl From<String> for IntegrationTest {
    fn from(name: String) -> Self {
        Self { name, ..Self::default() }
    }
}

/// Contracts reconciling the per-platform task lists.
///
/// List items the model wrote as bare strings are kept as the item's main
/// text field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegrationStrategy {
    /// Agreed endpoints.
    #[serde(default, deserialize_with = "lenient::items")]
    pub api_contracts: Vec<ApiContract>,
    /// Agreed types.
    #[serde(default, deserialize_with = "lenient::items")]
    pub shared_types: Vec<SharedType>,
    /// Build order across platforms, sorted by `order`.
    #[serde(default, deserialize_with = "lenient::items")]
    pub integration_sequence: Vec<IntegrationStep>,
    /// Cross-platform test scenarios.
    #[serde(default, deserialize_with = "lenient::items")]
    pub integration_tests: Vec<IntegrationTest>,
}
