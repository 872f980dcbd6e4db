//! # Recognizers
//!
//! The capability shared by every field recognizer, the [`Match`] it
//! produces, and the token-bounded regex helpers the recognizers are built
//! on.

use std::fmt;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::working::{Span, WorkingText};
use crate::error::{Result, ScenecutError};
use crate::types::{
    AudioChannels, AudioCodec, Container, EpisodeSpec, Flag, MediaSource, Resolution, VideoCodec,
};
use crate::vocab::Entry;

/// Semantic field a recognizer claims evidence for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Website,
    Checksum,
    SeasonEpisode,
    Resolution,
    Source,
    VideoCodec,
    Audio,
    Language,
    Flag,
    Container,
    Group,
    Year,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Website => "website",
            Self::Checksum => "checksum",
            Self::SeasonEpisode => "season/episode",
            Self::Resolution => "resolution",
            Self::Source => "source",
            Self::VideoCodec => "video codec",
            Self::Audio => "audio",
            Self::Language => "language",
            Self::Flag => "flag",
            Self::Container => "container",
            Self::Group => "group",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

/// Typed value carried by a [`Match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Website(String),
    Checksum(String),
    SeasonEpisode {
        season: Option<u32>,
        episode: Option<EpisodeSpec>,
    },
    Resolution(Resolution),
    Source(MediaSource),
    VideoCodec(VideoCodec),
    Audio {
        codec: AudioCodec,
        channels: Option<AudioChannels>,
    },
    Language(String),
    Flag(Flag),
    Container(Container),
    Group(String),
    Year(u16),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            Self::Website(_) => Field::Website,
            Self::Checksum(_) => Field::Checksum,
            Self::SeasonEpisode { .. } => Field::SeasonEpisode,
            Self::Resolution(_) => Field::Resolution,
            Self::Source(_) => Field::Source,
            Self::VideoCodec(_) => Field::VideoCodec,
            Self::Audio { .. } => Field::Audio,
            Self::Language(_) => Field::Language,
            Self::Flag(_) => Field::Flag,
            Self::Container(_) => Field::Container,
            Self::Group(_) => Field::Group,
            Self::Year(_) => Field::Year,
        }
    }
}

/// One recognizer hit: the claimed span and the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub span: Span,
    pub value: FieldValue,
}

impl Match {
    pub fn new(span: Span, value: FieldValue) -> Self {
        Self { span, value }
    }

    pub fn field(&self) -> Field {
        self.value.field()
    }
}

/// A stateless field recognizer.
///
/// `try_match` inspects the current working text and returns at most one
/// match. "No match" is a normal outcome, not an error.
pub trait Recognizer: Send + Sync {
    /// The field this recognizer claims.
    fn field(&self) -> Field;

    /// Looks for evidence in the unclaimed part of `text`.
    fn try_match(&self, text: &WorkingText) -> Option<Match>;

    /// Whether the orchestrator should keep invoking this recognizer until
    /// it stops matching (e.g. several languages in one name).
    fn repeatable(&self) -> bool {
        false
    }
}

/// Characters that end a token: anything that is not a letter or digit,
/// which includes the claimed-span mask.
const BOUNDARY: &str = r"[^\p{L}\p{N}]";

/// A regex whose named group `tok` must sit between token boundaries.
///
/// The boundary characters are consumed by the regex but are not part of
/// `tok`, so callers always use the `tok` span. This works for tokens that
/// end in punctuation (`DD+`, `HDR10+`) where `\b` would not.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    re: Regex,
}

impl TokenPattern {
    /// Wraps `body` (case-insensitive) in token boundaries.
    pub fn new(body: &str) -> Result<Self> {
        let re = Regex::new(&format!(
            r"(?i)(?:^|{BOUNDARY})(?P<tok>{body})(?:{BOUNDARY}|$)"
        ))?;
        Ok(Self { re })
    }

    /// All token matches whose `tok` group starts at or after `from`.
    pub fn captures_from<'h>(&self, view: &'h str, from: usize) -> TokenCaptures<'_, 'h> {
        // Start one character early so the leading boundary can be consumed.
        let pos = view[..from.min(view.len())]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        TokenCaptures {
            re: &self.re,
            view,
            pos,
            from,
        }
    }

    /// First token match at or after `from`.
    pub fn first_from<'h>(&self, view: &'h str, from: usize) -> Option<Captures<'h>> {
        self.captures_from(view, from).next()
    }
}

/// Iterator over token matches; see [`TokenPattern::captures_from`].
pub struct TokenCaptures<'r, 'h> {
    re: &'r Regex,
    view: &'h str,
    pos: usize,
    from: usize,
}

impl<'h> Iterator for TokenCaptures<'_, 'h> {
    type Item = Captures<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.view.len() {
            let caps = self.re.captures_at(self.view, self.pos)?;
            let tok = caps.name("tok")?;

            // Resume at the end of the token so its trailing boundary can
            // serve as the next token's leading boundary.
            self.pos = if tok.end() > self.pos {
                tok.end()
            } else {
                next_char_boundary(self.view, self.pos)
            };

            if tok.start() >= self.from {
                return Some(caps);
            }
        }
        None
    }
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map_or(s.len() + 1, |c| pos + c.len_utf8())
}

/// Span of the `tok` group of a token match.
pub fn tok_span(caps: &Captures<'_>) -> Option<Span> {
    caps.name("tok").map(|m| Span::new(m.start(), m.end()))
}

/// A compiled vocabulary table: ordered token patterns with their values.
#[derive(Debug, Clone)]
pub struct TokenTable<T> {
    name: &'static str,
    entries: Vec<TableEntry<T>>,
}

#[derive(Debug, Clone)]
struct TableEntry<T> {
    pattern: TokenPattern,
    value: T,
    weak: bool,
}

/// A table hit: the claimed span, the entry value and the captures.
#[derive(Debug)]
pub struct TableHit<'t, 'h, T> {
    pub span: Span,
    pub value: &'t T,
    pub caps: Captures<'h>,
}

impl<T: Clone> TokenTable<T> {
    /// Compiles every entry; `suffix` is appended to each pattern inside the
    /// token (used for audio channel layouts).
    ///
    /// # Errors
    ///
    /// Returns `ScenecutError::InvalidPattern` naming the first entry whose
    /// pattern does not compile on its own.
    pub fn compile(name: &'static str, entries: &[Entry<T>], suffix: &str) -> Result<Self> {
        let entries = entries
            .iter()
            .map(|entry| {
                // Validate the fragment alone so that an unbalanced group
                // cannot combine with the wrapper into a different regex.
                Regex::new(&entry.pattern).map_err(|source| ScenecutError::InvalidPattern {
                    table: name,
                    pattern: entry.pattern.clone(),
                    source,
                })?;
                Ok(TableEntry {
                    pattern: TokenPattern::new(&format!("(?:{}){suffix}", entry.pattern))?,
                    value: entry.value.clone(),
                    weak: entry.weak,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks the table in order; the first entry with a token match at or
    /// after `from` wins, at its leftmost position.
    pub fn find<'t, 'h>(&'t self, view: &'h str, from: usize) -> Option<TableHit<'t, 'h, T>> {
        self.scan(view, from, true)
    }

    /// Lookup for strong recognizers. The metadata region (from the
    /// boundary on) is searched first, so a title word cannot shadow the
    /// real tag after it. Only when that finds nothing is the whole text
    /// searched, and then weak entries are left out.
    pub fn find_strong<'t, 'h>(&'t self, text: &'h WorkingText) -> Option<TableHit<'t, 'h, T>> {
        let view = text.view();
        text.boundary()
            .and_then(|from| self.scan(view, from, true))
            .or_else(|| self.scan(view, 0, false))
    }

    fn scan<'t, 'h>(
        &'t self,
        view: &'h str,
        from: usize,
        with_weak: bool,
    ) -> Option<TableHit<'t, 'h, T>> {
        self.entries
            .iter()
            .filter(|entry| with_weak || !entry.weak)
            .find_map(|entry| {
                let caps = entry.pattern.first_from(view, from)?;
                let span = tok_span(&caps)?;
                Some(TableHit {
                    span,
                    value: &entry.value,
                    caps,
                })
            })
    }

    /// Returns `true` if `word` is exactly one token of this table.
    pub fn matches_whole(&self, word: &str) -> bool {
        self.entries.iter().any(|entry| {
            entry
                .pattern
                .first_from(word, 0)
                .and_then(|caps| tok_span(&caps))
                .is_some_and(|span| span.start == 0 && span.end == word.len())
        })
    }
}

/// Where in the text a recognizer may claim tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Anywhere in the text, preferring the metadata region.
    Anywhere,
    /// Only at or after the metadata boundary, and never without one.
    AfterBoundary,
}

impl Position {
    /// First byte a recognizer with this position may claim from.
    pub fn start(self, text: &WorkingText) -> Option<usize> {
        match self {
            Self::Anywhere => Some(0),
            Self::AfterBoundary => text.boundary(),
        }
    }
}

/// A recognizer that is nothing more than one vocabulary table.
pub struct VocabularyRecognizer<T> {
    field: Field,
    table: TokenTable<T>,
    position: Position,
    repeatable: bool,
    value: fn(T) -> FieldValue,
}

impl<T: Clone> VocabularyRecognizer<T> {
    pub fn new(field: Field, table: TokenTable<T>, value: fn(T) -> FieldValue) -> Self {
        Self {
            field,
            table,
            position: Position::Anywhere,
            repeatable: false,
            value,
        }
    }

    /// Restricts matches to the metadata region.
    #[must_use]
    pub fn weak(mut self) -> Self {
        self.position = Position::AfterBoundary;
        self
    }

    /// Lets the orchestrator claim every occurrence, not just the first.
    #[must_use]
    pub fn repeating(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn table(&self) -> &TokenTable<T> {
        &self.table
    }
}

impl<T: Clone + Send + Sync> Recognizer for VocabularyRecognizer<T> {
    fn field(&self) -> Field {
        self.field
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        let hit = match self.position {
            Position::Anywhere => self.table.find_strong(text)?,
            Position::AfterBoundary => self.table.find(text.view(), text.boundary()?)?,
        };
        Some(Match::new(hit.span, (self.value)(hit.value.clone())))
    }

    fn repeatable(&self) -> bool {
        self.repeatable
    }
}
