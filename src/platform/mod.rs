//! Platform registry.
//!
//! A closed set of expert roles. Each one has display metadata and a persona
//! prompt that becomes the system instructions for its generation call.

pub mod prompts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a platform expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    /// Server-side APIs, data and business logic.
    Backend,
    /// Native or cross-platform mobile clients.
    Mobile,
    /// Internal admin and back-office web tooling.
    Admin,
    /// Cloud resources, CI/CD and operations.
    Infrastructure,
}

/// Display metadata for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformConfig {
    /// The platform this entry describes.
    pub id: PlatformId,
    /// Human-readable name.
    pub name: &'static str,
    /// Icon name for UIs.
    pub icon: &'static str,
    /// Hex accent color for UIs.
    pub color: &'static str,
    /// One-line description of the expert's remit.
    pub description: &'static str,
}

const REGISTRY: [PlatformConfig; 4] = [
    PlatformConfig {
        id: PlatformId::Backend,
        name: "Backend API",
        icon: "server",
        color: "#3B82F6",
        description: "REST/GraphQL endpoints, database schema, business logic and auth",
    },
    PlatformConfig {
        id: PlatformId::Mobile,
        name: "Mobile App",
        icon: "smartphone",
        color: "#10B981",
        description: "iOS/Android screens, offline state, navigation and push notifications",
    },
    PlatformConfig {
        id: PlatformId::Admin,
        name: "Admin Dashboard",
        icon: "layout-dashboard",
        color: "#8B5CF6",
        description: "Back-office views, moderation tools, reporting and role management",
    },
    PlatformConfig {
        id: PlatformId::Infrastructure,
        name: "Infrastructure",
        icon: "cloud",
        color: "#F59E0B",
        description: "Cloud resources, CI/CD pipelines, observability and security hardening",
    },
];

impl PlatformId {
    /// Every platform, in registry order.
    pub const ALL: [PlatformId; 4] =
        [PlatformId::Backend, PlatformId::Mobile, PlatformId::Admin, PlatformId::Infrastructure];

    /// Short identifier used on the wire and in request labels.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformId::Backend => "backend",
            PlatformId::Mobile => "mobile",
            PlatformId::Admin => "admin",
            PlatformId::Infrastructure => "infrastructure",
        }
    }

    /// Display metadata for this platform.
    #[must_use]
    pub fn config(self) -> &'static PlatformConfig {
        match self {
            PlatformId::Backend => &REGISTRY[0],
            PlatformId::Mobile => &REGISTRY[1],
            PlatformId::Admin => &REGISTRY[2],
            PlatformId::Infrastructure => &REGISTRY[3],
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.config().name
    }

    /// Persona prompt used as system instructions for this platform.
    #[must_use]
    pub fn persona_prompt(self) -> &'static str {
        match self {
            PlatformId::Backend => prompts::BACKEND_PERSONA,
            PlatformId::Mobile => prompts::MOBILE_PERSONA,
            PlatformId::Admin => prompts::ADMIN_PERSONA,
            PlatformId::Infrastructure => prompts::INFRASTRUCTURE_PERSONA,
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PlatformId::ALL.into_iter().find(|p| p.as_str() == wanted).ok_or_else(|| {
            let known: Vec<&str> = PlatformId::ALL.iter().map(|p| p.as_str()).collect();
            format!("unknown platform {s:?} (expected one of: {})", known.join(", "))
        })
    }
}

/// All registry entries, in registry order.
#[must_use]
pub fn registry() -> &'static [PlatformConfig] {
    &REGISTRY
}

/// Drops repeated platforms, keeping the first occurrence of each.
#[must_use]
pub fn dedup_platforms(platforms: &[PlatformId]) -> Vec<PlatformId> {
    let mut seen = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !seen.contains(platform) {
            seen.push(*platform);
        }
    }
    seen
}
