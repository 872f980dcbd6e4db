//! Release group recognizer.
//!
//! Scene releases end with `-GROUP`; fansub releases start with `[Group]`.
//! The trailing form wins when both are present.

use regex::Regex;

use super::recognizer::{Field, FieldValue, Match, Position, Recognizer};
use super::working::{Span, WorkingText};
use crate::error::Result;
use crate::vocab::Vocabularies;

pub struct GroupRecognizer {
    re_trailing: Regex,
    re_leading: Regex,
    re_reserved: Option<Regex>,
}

impl GroupRecognizer {
    /// Builds the recognizer. Words that are whole entries of `vocab` are
    /// never taken as a group name.
    ///
    /// # Errors
    ///
    /// Returns `ScenecutError::RegexError` if a pattern fails to compile.
    pub fn new(vocab: &Vocabularies) -> Result<Self> {
        let patterns: Vec<String> = vocab
            .resolution
            .iter()
            .map(|e| &e.pattern)
            .chain(vocab.source.iter().map(|e| &e.pattern))
            .chain(vocab.video_codec.iter().map(|e| &e.pattern))
            .chain(vocab.audio_codec.iter().map(|e| &e.pattern))
            .chain(vocab.language.iter().map(|e| &e.pattern))
            .chain(vocab.flag.iter().map(|e| &e.pattern))
            .chain(vocab.container.iter().map(|e| &e.pattern))
            .map(|p| format!("(?:{p})"))
            .collect();

        let re_reserved = if patterns.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i)^(?:{})$", patterns.join("|")))?)
        };

        Ok(Self {
            re_trailing: Regex::new(
                r"(?:^|[\s\x1f])[^\s\x1f]*?-(?P<group>[^\s\x1f\-\[\]\(\)][^\s\x1f\[\]\(\)]*)(?:[ ]?\[[^\]\x1f]*\])?[\s\x1f]*$",
            )?,
            re_leading: Regex::new(r"^[\[\(][ ]?(?P<group>[^\]\)\x1f]+?)[ ]?[\]\)]")?,
            re_reserved,
        })
    }

    fn is_plausible(&self, name: &str) -> bool {
        !name.is_empty()
            && !name.chars().all(|c| c.is_ascii_digit())
            && !self.re_reserved.as_ref().is_some_and(|re| re.is_match(name))
    }

    /// `...x264-GROUP`, optionally followed by one bracketed tag. The claim
    /// covers the hyphen and the name.
    fn trailing(&self, text: &WorkingText) -> Option<Match> {
        let from = Position::AfterBoundary.start(text)?;
        let caps = self.re_trailing.captures(text.view())?;
        let group = caps.name("group")?;
        if group.start() < from || !self.is_plausible(group.as_str()) {
            return None;
        }

        Some(Match::new(
            Span::new(group.start() - 1, group.end()),
            FieldValue::Group(group.as_str().to_string()),
        ))
    }

    /// `[Group] Title - 01`.
    fn leading(&self, text: &WorkingText) -> Option<Match> {
        let caps = self.re_leading.captures(text.view())?;
        let whole = caps.get(0)?;
        let name = caps.name("group")?.as_str().trim();
        if !self.is_plausible(name) {
            return None;
        }

        Some(Match::new(
            Span::new(whole.start(), whole.end()),
            FieldValue::Group(name.to_string()),
        ))
    }
}

impl Recognizer for GroupRecognizer {
    fn field(&self) -> Field {
        Field::Group
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        self.trailing(text).or_else(|| self.leading(text))
    }
}
