//! `storyspec platforms` command.

use std::fmt::Write as _;

use crate::platform::{registry, PlatformConfig};

/// Prints the platform registry.
pub fn run() {
    print!("{}", render(registry()));
}

fn render(entries: &[PlatformConfig]) -> String {
    let mut out = format!("{:<16} {:<18} {}\n", "ID", "NAME", "DESCRIPTION");
    for entry in entries {
        let _ = writeln!(out, "{:<16} {:<18} {}", entry.id.as_str(), entry.name, entry.description);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformId;

    #[test]
    fn lists_every_platform_once() {
        let table = render(registry());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), PlatformId::ALL.len() + 1);
        assert!(lines[0].starts_with("ID"));
        for platform in PlatformId::ALL {
            assert_eq!(lines.iter().filter(|l| l.starts_with(platform.as_str())).count(), 1);
        }
        assert!(table.contains("Admin Dashboard"));
    }
}
