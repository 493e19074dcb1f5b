//! The seven intelligence features. Each pairs a prompt template with a response schema.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    CalendarConflicts,
    Coworking,
    TimeZones,
    Budget,
    Community,
    Legal,
    Assistant,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::CalendarConflicts,
        Feature::Coworking,
        Feature::TimeZones,
        Feature::Budget,
        Feature::Community,
        Feature::Legal,
        Feature::Assistant,
    ];

    /// Stable kebab-case name used in logs, errors and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Feature::CalendarConflicts => "calendar-conflicts",
            Feature::Coworking => "coworking",
            Feature::TimeZones => "time-zones",
            Feature::Budget => "budget",
            Feature::Community => "community",
            Feature::Legal => "legal",
            Feature::Assistant => "assistant",
        }
    }

    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Feature::CalendarConflicts => "Calendar conflict analysis",
            Feature::Coworking => "Co-working recommendations",
            Feature::TimeZones => "Meeting time-zone optimization",
            Feature::Budget => "Budget analysis",
            Feature::Community => "Community recommendations",
            Feature::Legal => "Legal resources",
            Feature::Assistant => "Ask the assistant",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
                format!("unknown feature '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_parses_back() {
        for feature in Feature::ALL {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Time-Zones".parse::<Feature>().unwrap(), Feature::TimeZones);
    }

    #[test]
    fn test_unknown_feature_lists_known_names() {
        let err = "weather".parse::<Feature>().unwrap_err();
        assert!(err.contains("calendar-conflicts"));
        assert!(err.contains("assistant"));
    }
}
