//! Merging per-task checklists into one definition of done.

use std::collections::HashSet;

use super::platform::PlatformResult;
use crate::spec::{DefinitionOfDone, IntegrationDod, IntegrationStrategy, PlatformDod};

const INTEGRATION_DESCRIPTION: &str = "Cross-platform integration checks";

const INTEGRATION_BOILERPLATE: [&str; 3] = [
    "All API contracts are implemented identically on every platform",
    "Shared types compile cleanly on every platform that uses them",
    "No runtime type mismatches between platforms",
];

/// Builds the merged checklist.
///
/// Platforms without tasks get no entry. Items keep their first-seen order
/// with exact duplicates removed. The integration checklist is added only
/// when there is a strategy and more than one platform result.
#[must_use]
pub fn merge_dod(
    results: &[PlatformResult],
    strategy: Option<&IntegrationStrategy>,
) -> DefinitionOfDone {
    let platform_dod = results
        .iter()
        .filter(|r| !r.tasks.is_empty())
        .map(|r| PlatformDod {
            platform: r.platform,
            platform_name: r.platform.display_name().to_string(),
            checklist: dedup(r.tasks.iter().flat_map(|t| t.definition_of_done.iter())),
        })
        .collect();

    let integration_dod = strategy.filter(|_| results.len() > 1).map(|strategy| {
        let tests = strategy.integration_tests.iter().map(|t| format!("E2E: {}", t.name));
        IntegrationDod {
            description: INTEGRATION_DESCRIPTION.to_string(),
            checklist: tests.chain(INTEGRATION_BOILERPLATE.iter().map(|s| (*s).to_string())).collect(),
        }
    });

    DefinitionOfDone { platform_dod, integration_dod }
}

fn dedup<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.as_str())).cloned().collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::platform::PlatformId;
    use crate::spec::{GeneratedTask, IntegrationTest, PlatformStatus, TokenUsage};

    fn task(platform: PlatformId, dod: &[&str]) -> GeneratedTask {
        serde_json::from_value(json!({
            "name": "t",
            "platform": platform,
            "definition_of_done": dod,
        }))
        .unwrap()
    }

    fn result(platform: PlatformId, tasks: Vec<GeneratedTask>) -> PlatformResult {
        PlatformResult {
            platform,
            tasks,
            assumptions: Vec::new(),
            status: PlatformStatus::Generated,
            attempts: 1,
            usage: TokenUsage::default(),
        }
    }

    fn strategy(tests: &[&str]) -> IntegrationStrategy {
        IntegrationStrategy {
            integration_tests: tests
                .iter()
                .map(|name| IntegrationTest { name: (*name).to_string(), ..IntegrationTest::default() })
                .collect(),
            ..IntegrationStrategy::default()
        }
    }

    #[test]
    fn dedups_in_first_seen_order() {
        let results = vec![result(
            PlatformId::Backend,
            vec![
                task(PlatformId::Backend, &["Tests pass", "Docs updated"]),
                task(PlatformId::Backend, &["Docs updated", "Deployed", "Tests pass"]),
            ],
        )];

        let dod = merge_dod(&results, None);

        assert_eq!(dod.platform_dod.len(), 1);
        assert_eq!(dod.platform_dod[0].platform_name, "Backend API");
        assert_eq!(dod.platform_dod[0].checklist, vec!["Tests pass", "Docs updated", "Deployed"]);
        assert!(dod.integration_dod.is_none());
    }

    #[test]
    fn platforms_without_tasks_are_skipped() {
        let results = vec![
            result(PlatformId::Backend, vec![task(PlatformId::Backend, &["Tests pass"])]),
            result(PlatformId::Mobile, Vec::new()),
        ];

        let dod = merge_dod(&results, None);
        let platforms: Vec<PlatformId> = dod.platform_dod.iter().map(|p| p.platform).collect();
        assert_eq!(platforms, vec![PlatformId::Backend]);
    }

    #[test]
    fn integration_checklist_lists_tests_then_boilerplate() {
        let results = vec![
            result(PlatformId::Backend, vec![task(PlatformId::Backend, &["a"])]),
            result(PlatformId::Mobile, vec![task(PlatformId::Mobile, &["b"])]),
        ];

        let dod = merge_dod(&results, Some(&strategy(&["Member sees bookings"])));
        let integration = dod.integration_dod.unwrap();

        assert_eq!(integration.checklist.len(), 4);
        assert_eq!(integration.checklist[0], "E2E: Member sees bookings");
        assert_eq!(&integration.checklist[1..], &INTEGRATION_BOILERPLATE);
    }

    #[test]
    fn single_result_never_gets_integration_checklist() {
        let results = vec![result(PlatformId::Backend, vec![task(PlatformId::Backend, &["a"])])];
        let dod = merge_dod(&results, Some(&strategy(&["x"])));
        assert!(dod.integration_dod.is_none());
    }

    #[test]
    fn merging_twice_gives_the_same_result() {
        let results = vec![
            result(PlatformId::Admin, vec![task(PlatformId::Admin, &["a", "a", "b"])]),
            result(PlatformId::Infrastructure, vec![task(PlatformId::Infrastructure, &["c"])]),
        ];
        let strategy = strategy(&["e2e"]);

        assert_eq!(merge_dod(&results, Some(&strategy)), merge_dod(&results, Some(&strategy)));
    }
}
