//! Presentation lookup for the streaming platforms shown on the dashboard.
//!
//! Nothing in [`crate::stats`] depends on this table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Netflix,
    Disney,
    Amazon,
    Hbo,
    Hulu,
}

/// Title label, colour and font stack of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformBranding {
    pub label: &'static str,
    pub color: &'static str,
    pub font_family: &'static str,
}

#[derive(Debug, Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(String);

impl Platform {
    pub const ALL: [Self; 5] = [
        Self::Netflix,
        Self::Disney,
        Self::Amazon,
        Self::Hbo,
        Self::Hulu,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Netflix => "netflix",
            Self::Disney => "disney",
            Self::Amazon => "amazon",
            Self::Hbo => "hbo",
            Self::Hulu => "hulu",
        }
    }

    #[must_use]
    pub fn branding(self) -> PlatformBranding {
        match self {
            Self::Netflix => PlatformBranding {
                label: "Netflix",
                color: "#E50914",
                font_family: "Arial, sans-serif",
            },
            Self::Disney => PlatformBranding {
                label: "Disney",
                color: "#0063E1",
                font_family: "Waltograph, Arial, sans-serif",
            },
            Self::Amazon => PlatformBranding {
                label: "Amazon",
                color: "#00A8E1",
                font_family: "Amazon Ember, Arial, sans-serif",
            },
            Self::Hbo => PlatformBranding {
                label: "HBO",
                color: "#941de8",
                font_family: "Arial, sans-serif",
            },
            Self::Hulu => PlatformBranding {
                label: "hulu",
                color: "#1CE783",
                font_family: "Proxima Nova, Arial, sans-serif",
            },
        }
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| UnknownPlatform(value.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
