//! Scheduler configuration.
//!
//! Loaded from `<root>/config.toml`. Every key is optional; a missing file
//! means all defaults.
//!
//! ```toml
//! title = "Midweek Meeting Assignments"
//! meeting-day = "thursday"
//! pair-separator = " / "
//!
//! [ministry]
//! max-parts = 4
//! talk-slot = "Talk"
//! talk-duration = 5
//!
//! [living-as]
//! policy = "conditional"   # single | conditional | double
//! threshold = 15
//! study-duration = 30
//! special-slot = "Special Talk"
//! special-week = "replace" # replace | supplement
//!
//! [document]
//! style = "banded"         # banded | grid
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use jiff::civil::Weekday;
use serde::{Deserialize, Serialize};

use crate::render::DocumentStyle;
use crate::resolve::{LivingPolicy, Policy, SpecialWeekMode};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Document title used when an export does not name one.
    pub title: String,

    /// Weekday the meeting falls on, used to expand `--month`.
    pub meeting_day: MeetingDay,

    /// Joins the two names of a paired part.
    pub pair_separator: String,

    pub ministry: MinistryConfig,
    pub living_as: LivingAsConfig,
    pub document: DocumentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Midweek Meeting Assignments".to_string(),
            meeting_day: MeetingDay::default(),
            pair_separator: " / ".to_string(),
            ministry: MinistryConfig::default(),
            living_as: LivingAsConfig::default(),
            document: DocumentConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MinistryConfig {
    pub max_parts: usize,
    pub talk_slot: String,
    pub talk_duration: u32,
}

impl Default for MinistryConfig {
    fn default() -> Self {
        let policy = Policy::default();
        Self {
            max_parts: policy.ministry_max_parts,
            talk_slot: policy.talk_slot,
            talk_duration: policy.talk_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LivingAsConfig {
    pub policy: LivingPolicyName,

    /// Minutes below which a first part admits a second under `conditional`.
    pub threshold: u32,
    pub study_duration: u32,
    pub special_slot: String,
    pub special_week: SpecialWeekMode,
}

impl Default for LivingAsConfig {
    fn default() -> Self {
        let policy = Policy::default();
        Self {
            policy: LivingPolicyName::Conditional,
            threshold: 15,
            study_duration: policy.study_duration,
            special_slot: policy.special_slot,
            special_week: policy.special_week,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LivingPolicyName {
    Single,
    #[default]
    Conditional,
    Double,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocumentConfig {
    pub style: DocumentStyle,
}

/// Config-facing weekday, mapped to [`Weekday`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingDay {
    Monday,
    Tuesday,
    Wednesday,
    #[default]
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl MeetingDay {
    pub fn to_weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Monday,
            Self::Tuesday => Weekday::Tuesday,
            Self::Wednesday => Weekday::Wednesday,
            Self::Thursday => Weekday::Thursday,
            Self::Friday => Weekday::Friday,
            Self::Saturday => Weekday::Saturday,
            Self::Sunday => Weekday::Sunday,
        }
    }
}

impl Config {
    /// Load config from `<root>/config.toml`, or defaults if it is missing.
    /// Returns an error if the file exists but is invalid.
    pub fn load(root: &Path) -> Result<Self, String> {
        let path = Self::path(root);
        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.ministry.max_parts == 0 {
            return Err(format!(
                "ministry.max-parts must be at least 1 in {}",
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `<root>/config.toml`.
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// The resolution rules this config describes.
    pub fn policy(&self) -> Policy {
        let living = match self.living_as.policy {
            LivingPolicyName::Single => LivingPolicy::Single,
            LivingPolicyName::Conditional => LivingPolicy::Conditional {
                threshold: self.living_as.threshold,
            },
            LivingPolicyName::Double => LivingPolicy::Double,
        };
        Policy {
            pair_separator: self.pair_separator.clone(),
            ministry_max_parts: self.ministry.max_parts,
            talk_slot: self.ministry.talk_slot.clone(),
            talk_duration: self.ministry.talk_duration,
            living,
            study_duration: self.living_as.study_duration,
            special_slot: self.living_as.special_slot.clone(),
            special_week: self.living_as.special_week,
        }
    }
}
