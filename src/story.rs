//! Inputs to the generator: the user story and its surrounding context.
//!
//! These come from the project database verbatim. Every context field is
//! optional; a missing field is simply left out of the prompt.

use serde::{Deserialize, Serialize};

/// The user story a run generates tasks for. Never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserStoryInput {
    /// Story identifier.
    #[serde(default)]
    pub id: String,
    /// "As a ..., I want ..., so that ..." text.
    pub narrative: String,
    /// Who the story is for.
    #[serde(default)]
    pub persona: String,
    /// Product area the story belongs to.
    #[serde(default)]
    pub feature_area: String,
    /// Acceptance criteria, if the story has any.
    #[serde(default)]
    pub acceptance_criteria: Option<Vec<String>>,
    /// Priority label (free text).
    #[serde(default)]
    pub priority: String,
}

/// Structured project brief.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectBrief {
    /// Product vision statement.
    pub vision: Option<String>,
    /// Who the product serves.
    pub target_users: Option<String>,
    /// Headline features.
    pub key_features: Vec<String>,
    /// Technologies in use.
    pub tech_stack: Vec<String>,
    /// Business goals.
    pub business_goals: Vec<String>,
    /// Known constraints.
    pub constraints: Vec<String>,
}

/// Outermost context layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectContext {
    /// Project name.
    pub name: Option<String>,
    /// Free-text project brief document.
    pub context_document: Option<String>,
    /// Structured brief.
    pub brief: Option<ProjectBrief>,
}

/// Epic the story belongs to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EpicContext {
    /// Epic name.
    pub name: Option<String>,
    /// Epic description.
    pub description: Option<String>,
    /// Business objectives, rendered as bullets.
    pub objectives: Vec<String>,
    /// Technical notes.
    pub technical_context: Option<String>,
    /// Value delivered to users.
    pub user_value: Option<String>,
}

/// Project → epic → story context joined by the persistence layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicalContext {
    /// Project layer.
    pub project: Option<ProjectContext>,
    /// Epic layer.
    pub epic: Option<EpicContext>,
    /// The story row itself, when the caller joined it in.
    pub user_story: Option<UserStoryInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_story_only_needs_narrative() {
        let story: UserStoryInput =
            serde_yaml::from_str("narrative: As a member, I want to view my upcoming reservations")
                .unwrap();
        assert!(story.id.is_empty());
        assert!(story.acceptance_criteria.is_none());
    }

    #[test]
    fn context_accepts_json_with_partial_layers() {
        let ctx: HierarchicalContext = serde_json::from_str(
            r#"{"project": {"name": "Clubhouse", "brief": {"tech_stack": ["Postgres"]}},
                "epic": {"name": "Reservations"}}"#,
        )
        .unwrap();
        let project = ctx.project.unwrap();
        assert_eq!(project.name.as_deref(), Some("Clubhouse"));
        assert_eq!(project.brief.unwrap().tech_stack, vec!["Postgres"]);
        assert!(ctx.epic.unwrap().objectives.is_empty());
        assert!(ctx.user_story.is_none());
    }
}
