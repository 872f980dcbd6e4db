//! # Season / Episode
//!
//! Recognizes every season and episode numbering convention the parser
//! supports. Forms are tried from most to least explicit; the first form
//! that matches anywhere in the text wins.

use std::ops::RangeInclusive;

use regex::{Captures, Regex};

use super::recognizer::{Field, FieldValue, Match, Recognizer, TokenPattern, tok_span};
use super::working::{Span, WorkingText};
use crate::config::DEFAULT_YEARS;
use crate::error::Result;
use crate::types::EpisodeSpec;

/// Heights that are never read as a bare `SEE` number.
const RESOLUTION_HEIGHTS: &[u32] = &[240, 360, 480, 576, 720, 1080, 1440, 2160];

/// Season/episode recognizer.
pub struct SeasonEpisodeRecognizer {
    years: RangeInclusive<u16>,
    re_scene: TokenPattern,
    re_cross: TokenPattern,
    re_verbose: TokenPattern,
    re_dashed_season: TokenPattern,
    re_season_pack: TokenPattern,
    re_absolute: TokenPattern,
    re_episode: TokenPattern,
    re_standalone: TokenPattern,
    re_number: Regex,
}

impl SeasonEpisodeRecognizer {
    /// Compiles the recognizer. Four-digit numbers inside `years` are left
    /// for the year recognizer.
    ///
    /// # Errors
    ///
    /// Returns `ScenecutError::RegexError` if a pattern fails to compile.
    pub fn new(years: RangeInclusive<u16>) -> Result<Self> {
        Ok(Self {
            years,
            // S01E01, S01E01E02, S01E01-E03, S01E01-03
            re_scene: TokenPattern::new(
                r"s(?P<s>\d{1,2})[ ]?e(?P<e>\d{1,4})(?P<rest>(?:-?e\d{1,3}|-\d{1,3})*)",
            )?,
            // 1x01, 1x01x02, 1x01-03
            re_cross: TokenPattern::new(
                r"(?P<s>\d{1,2})x(?P<e>\d{2,3})(?P<rest>(?:x\d{2,3}|-\d{2,3})*)",
            )?,
            re_verbose: TokenPattern::new(
                r"season[ ]?(?P<s>\d{1,2})[ ]?(?:episode|ep)[ ]?(?P<e>\d{1,4})",
            )?,
            // S2 - 05, S2 - 05v2, S3 - 01-12
            re_dashed_season: TokenPattern::new(
                r"s(?P<s>\d{1,2})[ ]-[ ](?P<e>\d{1,4})(?:v(?P<v>\d{1,2}))?(?:-(?P<e2>\d{1,4}))?",
            )?,
            re_season_pack: TokenPattern::new(r"(?:season[ ]?|s)(?P<s>\d{1,2})")?,
            re_absolute: TokenPattern::new(
                r"(?P<e>\d{1,4})(?:v(?P<v>\d{1,2}))?(?:-(?P<e2>\d{1,4}))?",
            )?,
            re_episode: TokenPattern::new(r"(?:episode[ ]?|ep[ ]?)(?P<e>\d{1,4})|e(?P<e_short>\d{2,4})")?,
            re_standalone: TokenPattern::new(r"\d{3,4}")?,
            re_number: Regex::new(r"\d+")?,
        })
    }

    fn scene(&self, view: &str) -> Option<Match> {
        let caps = self.re_scene.first_from(view, 0)?;
        let season = number(&caps, "s")?;
        let first = number(&caps, "e")?;
        let episode = self.chain(first, caps.name("rest").map_or("", |m| m.as_str()))?;
        episode_match(&caps, Some(season), Some(episode))
    }

    fn cross(&self, view: &str) -> Option<Match> {
        let caps = self.re_cross.first_from(view, 0)?;
        let season = number(&caps, "s")?;
        let first = number(&caps, "e")?;
        let episode = self.chain(first, caps.name("rest").map_or("", |m| m.as_str()))?;
        episode_match(&caps, Some(season), Some(episode))
    }

    fn verbose(&self, view: &str) -> Option<Match> {
        let caps = self.re_verbose.first_from(view, 0)?;
        let season = number(&caps, "s")?;
        let episode = EpisodeSpec::Single(number(&caps, "e")?);
        episode_match(&caps, Some(season), Some(episode))
    }

    fn dashed_season(&self, view: &str) -> Option<Match> {
        let caps = self.re_dashed_season.first_from(view, 0)?;
        let season = number(&caps, "s")?;
        let first = number(&caps, "e")?;
        let episode = match number(&caps, "e2") {
            Some(last) if last > first => EpisodeSpec::Range(first, last),
            _ => versioned(first, &caps),
        };
        episode_match(&caps, Some(season), Some(episode))
    }

    fn season_pack(&self, view: &str) -> Option<Match> {
        let caps = self.re_season_pack.first_from(view, 0)?;
        episode_match(&caps, Some(number(&caps, "s")?), None)
    }

    /// Absolute numbering after a ` - ` separator, as fansub releases do.
    fn absolute(&self, view: &str) -> Option<Match> {
        self.re_absolute.captures_from(view, 0).find_map(|caps| {
            let span = tok_span(&caps)?;
            if !view[..span.start].ends_with(" - ") {
                return None;
            }
            let tok = caps.name("e")?;
            let first = number(&caps, "e")?;
            if tok.len() == 4 && self.looks_like_year(first) {
                return None;
            }

            let episode = match number(&caps, "e2") {
                Some(last) if last > first => EpisodeSpec::Range(first, last),
                Some(_) => return None,
                None => versioned(first, &caps),
            };
            episode_match(&caps, None, Some(episode))
        })
    }

    fn episode_only(&self, view: &str) -> Option<Match> {
        let caps = self.re_episode.first_from(view, 0)?;
        let episode = number(&caps, "e").or_else(|| number(&caps, "e_short"))?;
        episode_match(&caps, None, Some(EpisodeSpec::Single(episode)))
    }

    /// A bare `SEE`/`SSEE` number such as `101` or `1203`.
    fn standalone(&self, text: &WorkingText) -> Option<Match> {
        let view = text.view();
        self.re_standalone.captures_from(view, 0).find_map(|caps| {
            let span = tok_span(&caps)?;
            let value: u32 = view[span.range()].parse().ok()?;

            if !text.has_words_in(0..span.start)
                || follows_codec_letter(view, span.start)
                || RESOLUTION_HEIGHTS.contains(&value)
                || (span.len() == 4 && self.looks_like_year(value))
            {
                return None;
            }

            let (season, episode) = (value / 100, value % 100);
            if season == 0 || episode == 0 {
                return None;
            }
            Some(Match::new(
                span,
                FieldValue::SeasonEpisode {
                    season: Some(season),
                    episode: Some(EpisodeSpec::Single(episode)),
                },
            ))
        })
    }

    /// Turns the first episode and the chained markers after it into a spec.
    /// A single `-` continuation is a range, anything else a list.
    fn chain(&self, first: u32, rest: &str) -> Option<EpisodeSpec> {
        let more: Vec<u32> = self
            .re_number
            .find_iter(rest)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        match more.as_slice() {
            [last] if rest.starts_with('-') && *last > first => {
                Some(EpisodeSpec::Range(first, *last))
            }
            _ => {
                let mut markers = vec![first];
                markers.extend(more);
                EpisodeSpec::from_markers(markers)
            }
        }
    }

    /// Inside the configured range or the default one: a custom range
    /// narrows what counts as a year, not what counts as an episode.
    fn looks_like_year(&self, value: u32) -> bool {
        u16::try_from(value)
            .is_ok_and(|v| self.years.contains(&v) || DEFAULT_YEARS.contains(&v))
    }
}

impl Recognizer for SeasonEpisodeRecognizer {
    fn field(&self) -> Field {
        Field::SeasonEpisode
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        let view = text.view();
        self.scene(view)
            .or_else(|| self.cross(view))
            .or_else(|| self.verbose(view))
            .or_else(|| self.dashed_season(view))
            .or_else(|| self.season_pack(view))
            .or_else(|| self.absolute(view))
            .or_else(|| self.episode_only(view))
            .or_else(|| self.standalone(text))
    }
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

fn versioned(episode: u32, caps: &Captures<'_>) -> EpisodeSpec {
    match caps.name("v").and_then(|v| v.as_str().parse::<u8>().ok()) {
        Some(version) => EpisodeSpec::Version { episode, version },
        None => EpisodeSpec::Single(episode),
    }
}

fn episode_match(
    caps: &Captures<'_>,
    season: Option<u32>,
    episode: Option<EpisodeSpec>,
) -> Option<Match> {
    let span: Span = tok_span(caps)?;
    Some(Match::new(span, FieldValue::SeasonEpisode { season, episode }))
}

/// `H 264` / `x 265` after normalization: the number belongs to a codec.
fn follows_codec_letter(view: &str, start: usize) -> bool {
    let before = view[..start].trim_end_matches([' ', '-']);
    let mut chars = before.chars().rev();
    matches!(chars.next(), Some('h' | 'H' | 'x' | 'X'))
        && !chars.next().is_some_and(char::is_alphanumeric)
}
