use std::fmt;

use serde::{Deserialize, Serialize};

/// Episode specification covering the numbering schemes found in
/// scene and fansub release names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeSpec {
    /// Single episode: "E05", "1x05", " - 24"
    Single(u32),

    /// Inclusive episode range: "E01-E03", " - 01-12"
    Range(u32, u32),

    /// Repeated episode markers in one file: "E01E02", "1x01x02"
    Multi(Vec<u32>),

    /// Versioned episode: " - 12v2"
    Version {
        /// The episode number.
        episode: u32,
        /// The version number (e.g., v2 = 2).
        version: u8,
    },
}

impl EpisodeSpec {
    /// Builds a spec from an ordered list of episode markers.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_markers(mut markers: Vec<u32>) -> Option<Self> {
        markers.dedup();
        match markers.len() {
            0 => None,
            1 => Some(Self::Single(markers[0])),
            _ => Some(Self::Multi(markers)),
        }
    }

    /// Every episode number covered by this spec, in ascending file order.
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        match self {
            Self::Single(ep) => vec![*ep],
            Self::Range(start, end) => (*start..=*end).collect(),
            Self::Multi(eps) => eps.clone(),
            Self::Version { episode, .. } => vec![*episode],
        }
    }

    /// The first episode covered by this spec.
    #[must_use]
    pub fn first(&self) -> u32 {
        match self {
            Self::Single(ep) | Self::Range(ep, _) | Self::Version { episode: ep, .. } => *ep,
            Self::Multi(eps) => eps.first().copied().unwrap_or_default(),
        }
    }
}

impl fmt::Display for EpisodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(ep) => write!(f, "{ep:02}"),
            Self::Range(start, end) => write!(f, "{start:02}-{end:02}"),
            Self::Multi(eps) => {
                let formatted: Vec<String> = eps.iter().map(|e| format!("{e:02}")).collect();
                write!(f, "{}", formatted.join(", "))
            }
            Self::Version { episode, version } => write!(f, "{episode:02}v{version}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_spec_single_display() {
        assert_eq!(EpisodeSpec::Single(1).to_string(), "01");
        assert_eq!(EpisodeSpec::Single(24).to_string(), "24");
        assert_eq!(EpisodeSpec::Single(1084).to_string(), "1084");
    }

    #[test]
    fn episode_spec_range_display() {
        assert_eq!(EpisodeSpec::Range(1, 12).to_string(), "01-12");
    }

    #[test]
    fn episode_spec_multi_display() {
        assert_eq!(EpisodeSpec::Multi(vec![1, 2]).to_string(), "01, 02");
    }

    #[test]
    fn episode_spec_version_display() {
        assert_eq!(
            EpisodeSpec::Version {
                episode: 12,
                version: 2
            }
            .to_string(),
            "12v2"
        );
    }

    #[test]
    fn from_markers_collapses_to_single() {
        assert_eq!(EpisodeSpec::from_markers(vec![]), None);
        assert_eq!(EpisodeSpec::from_markers(vec![5]), Some(EpisodeSpec::Single(5)));
        assert_eq!(EpisodeSpec::from_markers(vec![5, 5]), Some(EpisodeSpec::Single(5)));
        assert_eq!(
            EpisodeSpec::from_markers(vec![1, 2]),
            Some(EpisodeSpec::Multi(vec![1, 2]))
        );
    }

    #[test]
    fn numbers_expand_ranges() {
        assert_eq!(EpisodeSpec::Range(3, 6).numbers(), vec![3, 4, 5, 6]);
        assert_eq!(EpisodeSpec::Multi(vec![1, 2]).numbers(), vec![1, 2]);
        assert_eq!(
            EpisodeSpec::Version {
                episode: 7,
                version: 3
            }
            .numbers(),
            vec![7]
        );
        assert_eq!(EpisodeSpec::Range(3, 6).first(), 3);
    }

    #[test]
    fn episode_spec_serialization_roundtrip() {
        let spec = EpisodeSpec::Multi(vec![1, 5, 10]);
        let json = serde_json::to_string(&spec).unwrap();
        let deserialized: EpisodeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, deserialized);
    }
}
