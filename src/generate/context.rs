//! Layered prompt context: project first, then epic.
//!
//! The narrowest layer is rendered last so it sits right above the user
//! story block that follows it in the platform prompt.

use std::fmt::Write as _;

use crate::story::{EpicContext, HierarchicalContext, ProjectContext};

/// Renders the hierarchical context as markdown sections.
///
/// Returns an empty string for `None` or when no field carries text.
#[must_use]
pub fn build_context(context: Option<&HierarchicalContext>) -> String {
    let Some(context) = context else {
        return String::new();
    };

    let mut out = String::new();
    if let Some(project) = &context.project {
        push_section(&mut out, "## Project Context", &project_body(project));
    }
    if let Some(epic) = &context.epic {
        push_section(&mut out, "## Epic Context", &epic_body(epic));
    }
    out
}

fn push_section(out: &mut String, header: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    let _ = write!(out, "{header}\n\n{body}\n");
}

fn project_body(project: &ProjectContext) -> String {
    let mut body = String::new();
    push_field(&mut body, "Project", project.name.as_deref());

    if let Some(brief) = &project.brief {
        push_field(&mut body, "Vision", brief.vision.as_deref());
        push_field(&mut body, "Target Users", brief.target_users.as_deref());
        push_list(&mut body, "Key Features", &brief.key_features);
        push_inline_list(&mut body, "Tech Stack", &brief.tech_stack);
        push_list(&mut body, "Business Goals", &brief.business_goals);
        push_list(&mut body, "Constraints", &brief.constraints);
    }

    if let Some(document) = non_blank(project.context_document.as_deref()) {
        let _ = write!(body, "\n### Project Brief Document\n\n{}\n", document.trim());
    }
    body
}

fn epic_body(epic: &EpicContext) -> String {
    let mut body = String::new();
    push_field(&mut body, "Epic", epic.name.as_deref());
    push_field(&mut body, "Description", epic.description.as_deref());
    push_field(&mut body, "User Value", epic.user_value.as_deref());
    push_list(&mut body, "Business Objectives", &epic.objectives);
    push_field(&mut body, "Technical Context", epic.technical_context.as_deref());
    body
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn push_field(body: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = non_blank(value) {
        let _ = writeln!(body, "**{label}:** {}", value.trim());
    }
}

fn push_list(body: &mut String, label: &str, items: &[String]) {
    let items: Vec<&str> =
        items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()).collect();
    if items.is_empty() {
        return;
    }
    let _ = writeln!(body, "**{label}:**");
    for item in items {
        let _ = writeln!(body, "- {item}");
    }
}

fn push_inline_list(body: &mut String, label: &str, items: &[String]) {
    let items: Vec<&str> =
        items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()).collect();
    if !items.is_empty() {
        let _ = writeln!(body, "**{label}:** {}", items.join(", "));
    }
}
