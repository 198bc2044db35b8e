//! Design decisions recorded on the caller's behalf.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;
use super::task::Confidence;

/// Area an assumption belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionCategory {
    /// System structure.
    Architecture,
    /// Who may do what.
    Permissions,
    /// Schema and entities.
    DataModel,
    /// Latency, throughput, cost.
    Performance,
    /// Third-party and cross-platform seams.
    Integration,
    /// User experience.
    Ux,
    /// Threats and hardening.
    Security,
    /// Deployment and operations.
    Infrastructure,
}

impl AssumptionCategory {
    fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        Some(match key.as_str() {
            "architecture" => AssumptionCategory::Architecture,
            "permissions" | "permission" => AssumptionCategory::Permissions,
            "data_model" | "datamodel" => AssumptionCategory::DataModel,
            "performance" => AssumptionCategory::Performance,
            "integration" => AssumptionCategory::Integration,
            "ux" => AssumptionCategory::Ux,
            "security" => AssumptionCategory::Security,
            "infrastructure" => AssumptionCategory::Infrastructure,
            _ => return None,
        })
    }
}

/// Unknown categories read as `None` rather than failing the response.
fn category<'de, D>(deserializer: D) -> Result<Option<AssumptionCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::opt_string(deserializer)?.as_deref().and_then(AssumptionCategory::parse))
}

/// A decision made without asking, with the context to revisit it.
///
/// The four escalation fields (`unknowns` through `risk_if_skipped`) are a
/// review channel for MEDIUM/LOW confidence decisions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assumption {
    /// What the decision is about.
    #[serde(default, deserialize_with = "lenient::string")]
    pub topic: String,
    /// What was decided.
    #[serde(default, deserialize_with = "lenient::string")]
    pub decision: String,
    /// Why.
    #[serde(default, deserialize_with = "lenient::string")]
    pub rationale: String,
    /// How sure the model is.
    #[serde(default)]
    pub confidence: Confidence,
    /// Taxonomy bucket, `None` when the model used an unknown one.
    #[serde(default, deserialize_with = "category")]
    pub category: Option<AssumptionCategory>,
    /// Options that were considered.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    /// Open unknowns.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub unknowns: Vec<String>,
    /// Questions for stakeholders.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub questions_to_ask: Vec<String>,
    /// Where the answers might be found.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub where_to_look: Vec<String>,
    /// Consequence of not resolving it.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub risk_if_skipped: Option<String>,
}

impl Assumption {
    /// Whether this decision should be reviewed by a human.
    #[must_use]
    pub fn needs_review(&self) -> bool {
        self.confidence != Confidence::High
    }

    /// Clears the escalation fields on HIGH confidence assumptions.
    pub fn drop_escalation_if_confident(&mut self) {
        if !self.needs_review() {
            self.unknowns.clear();
            self.questions_to_ask.clear();
            self.where_to_look.clear();
            self.risk_if_skipped = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn category_variants_and_spellings() {
        let a: Assumption =
            serde_json::from_value(json!({"topic": "t", "category": "Data Model"})).unwrap();
        assert_eq!(a.category, Some(AssumptionCategory::DataModel));
        let b: Assumption = serde_json::from_value(json!({"category": "billing"})).unwrap();
        assert!(b.category.is_none());
        assert_eq!(
            serde_json::to_value(AssumptionCategory::DataModel).unwrap(),
            json!("data_model")
        );
    }

    #[test]
    fn high_confidence_loses_escalation_fields() {
        let mut a: Assumption = serde_json::from_value(json!({
            "topic": "Auth",
            "decision": "Reuse session tokens",
            "confidence": "HIGH",
            "unknowns": ["token TTL"],
            "questions_to_ask": ["Who owns auth?"],
            "risk_if_skipped": "Logout bugs"
        }))
        .unwrap();
        assert!(!a.needs_review());
        a.drop_escalation_if_confident();
        assert!(a.unknowns.is_empty());
        assert!(a.questions_to_ask.is_empty());
        assert!(a.risk_if_skipped.is_none());
    }

    #[test]
    fn low_confidence_keeps_escalation_fields() {
        let mut a: Assumption = serde_json::from_value(json!({
            "confidence": "LOW",
            "unknowns": ["timezone source"],
            "where_to_look": ["club settings table"]
        }))
        .unwrap();
        a.drop_escalation_if_confident();
        assert!(a.needs_review());
        assert_eq!(a.unknowns, vec!["timezone source"]);
        assert_eq!(a.where_to_look, vec!["club settings table"]);
    }
}
