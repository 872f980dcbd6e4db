//! # Scenecut Core
//!
//! Rule-based metadata extraction for scene and fansub release names.
//! A name is normalized, then an ordered list of recognizers claims spans
//! of it (season/episode, resolution, source, codecs, languages, flags,
//! container, group, year) and whatever is left becomes the title.
//!
//! ## Quick Start
//!
//! ```rust
//! use scenecut_core::types::{EpisodeSpec, MediaSource};
//!
//! let release = scenecut_core::parse("The.Show.S02E05.1080p.WEB-DL.x264-GROUP.mkv");
//!
//! assert_eq!(release.title, "The Show");
//! assert_eq!(release.season, Some(2));
//! assert_eq!(release.episode, Some(EpisodeSpec::Single(5)));
//! assert_eq!(release.source, Some(MediaSource::WebDL));
//! assert_eq!(release.group.as_deref(), Some("GROUP"));
//! ```
pub mod config;
pub mod error;
pub mod parser;
pub mod types;
pub mod vocab;

// Re-export primary API
pub use config::ParserConfig;
pub use error::{Result, ScenecutError};
pub use parser::{Claim, Extraction, Field, Parser, parse};
pub use types::{
    AudioChannels, AudioCodec, Container, EpisodeSpec, Flag, MediaSource, ParsedRelease,
    Resolution, VideoCodec,
};
pub use vocab::{Entry, Vocabularies};
