//! Value objects shared by both platforms.
//!
//! All of these are small `Copy` enums with a canonical string form. The
//! string form is what appears in prompts, in the persisted state file, and in
//! rendered manifests, so `as_str` / `FromStr` must stay in sync.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

// ── Platform ──────────────────────────────────────────────────────────────────

/// A supported TV platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    /// Samsung Orsay (pre-Tizen Smart TV).
    Orsay,
    /// LG webOS TV.
    WebOs,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Orsay, Platform::WebOs];

    /// Key used in the persisted state file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orsay => "orsay",
            Self::WebOs => "webos",
        }
    }

    /// Human-readable platform name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Orsay => "Samsung Orsay",
            Self::WebOs => "LG webOS TV",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orsay" => Ok(Self::Orsay),
            "webos" | "tv-webos" => Ok(Self::WebOs),
            _ => Err(DomainError::UnknownPlatform(s.to_string())),
        }
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Screen resolution an Orsay application is developed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Resolution {
    #[default]
    #[serde(rename = "960x540")]
    Qhd,
    #[serde(rename = "1280x720")]
    Hd,
    #[serde(rename = "1920x1080")]
    FullHd,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Qhd, Resolution::Hd, Resolution::FullHd];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qhd => "960x540",
            Self::Hd => "1280x720",
            Self::FullHd => "1920x1080",
        }
    }

    pub const fn width(self) -> u32 {
        match self {
            Self::Qhd => 960,
            Self::Hd => 1280,
            Self::FullHd => 1920,
        }
    }

    pub const fn height(self) -> u32 {
        match self {
            Self::Qhd => 540,
            Self::Hd => 720,
            Self::FullHd => 1080,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| DomainError::UnknownResolution(s.to_string()))
    }
}

// ── Category ──────────────────────────────────────────────────────────────────

/// Orsay application store category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "VOD")]
    Vod,
    #[serde(rename = "sports")]
    Sports,
    #[serde(rename = "game")]
    Game,
    #[serde(rename = "lifestyle")]
    Lifestyle,
    #[serde(rename = "information")]
    Information,
    #[serde(rename = "education")]
    Education,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Vod,
        Category::Sports,
        Category::Game,
        Category::Lifestyle,
        Category::Information,
        Category::Education,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vod => "VOD",
            Self::Sports => "sports",
            Self::Game => "game",
            Self::Lifestyle => "lifestyle",
            Self::Information => "information",
            Self::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}
