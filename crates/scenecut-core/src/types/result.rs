use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::episode::EpisodeSpec;
use super::flags::Flag;
use super::quality::{AudioChannels, AudioCodec, Container, MediaSource, Resolution, VideoCodec};

/// The primary output of the Scenecut parsing engine.
///
/// Every field other than `input` and `title` is present only when a
/// recognizer found positive evidence for it. `None`, an empty set or an
/// empty list all mean "unknown", never a negative answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRelease {
    /// Original input string.
    pub input: String,

    /// Resolved title; empty when the whole name was metadata.
    pub title: String,

    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,

    /// Season number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,

    /// Episode specification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeSpec>,

    /// Video resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,

    /// Acquisition source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MediaSource>,

    /// Video codec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<VideoCodec>,

    /// Audio codec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<AudioCodec>,

    /// Audio channel layout, only ever set together with `audio_codec`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_channels: Option<AudioChannels>,

    /// Language codes (e.g. "en", "fr").
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub languages: BTreeSet<String>,

    /// Release group name (e.g. "SPARKS", "SubsPlease").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Claimed boolean tags.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub flags: BTreeSet<Flag>,

    /// Media container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,

    /// CRC32 checksum (uppercase hex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    /// Source website prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Unclaimed leftovers found after the title.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excess: Vec<String>,
}

impl ParsedRelease {
    /// Creates a record for `input` with an empty title and no evidence.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            title: String::new(),
            year: None,
            season: None,
            episode: None,
            resolution: None,
            source: None,
            video_codec: None,
            audio_codec: None,
            audio_channels: None,
            languages: BTreeSet::new(),
            group: None,
            flags: BTreeSet::new(),
            container: None,
            checksum: None,
            website: None,
            excess: Vec::new(),
        }
    }

    /// Returns `true` if the given flag was claimed.
    #[must_use]
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    /// Returns `true` if the release looks like a TV episode or season pack.
    #[must_use]
    pub fn is_episode(&self) -> bool {
        self.season.is_some() || self.episode.is_some()
    }

    /// Returns `true` if any metadata beyond the title was extracted.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.year.is_some()
            || self.is_episode()
            || self.resolution.is_some()
            || self.source.is_some()
            || self.video_codec.is_some()
            || self.audio_codec.is_some()
            || !self.languages.is_empty()
            || self.group.is_some()
            || !self.flags.is_empty()
            || self.container.is_some()
            || self.checksum.is_some()
            || self.website.is_some()
    }
}

impl std::fmt::Display for ParsedRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParsedRelease(title={:?}", self.title)?;
        if let Some(year) = self.year {
            write!(f, ", year={year}")?;
        }
        if let Some(season) = self.season {
            write!(f, ", season={season}")?;
        }
        if let Some(ref ep) = self.episode {
            write!(f, ", ep={ep}")?;
        }
        if let Some(ref res) = self.resolution {
            write!(f, ", res={res}")?;
        }
        if let Some(ref group) = self.group {
            write!(f, ", group={group}")?;
        }
        write!(f, ")")
    }
}
