//! # Tag Recognizers
//!
//! Website prefixes, CRC checksums, languages, boolean flags and the media
//! container. Languages, flags and in-text container words are weak: the
//! same words show up in titles, so they are only claimed in the metadata
//! region.

use regex::Regex;

use super::recognizer::{
    Field, FieldValue, Match, Position, Recognizer, TokenTable, VocabularyRecognizer,
};
use super::working::{Span, WorkingText};
use crate::error::Result;
use crate::types::{Container, Flag};
use crate::vocab::Entry;

const TLDS: &str = r"com|org|net|to|me|tv|cc|io|ru|info|co|in|se|xyz|club|site|lol";

/// A website prefix: `[ www.site.com ]` or `www.site.com - `.
pub struct WebsiteRecognizer {
    re_bracketed: Regex,
    re_prefix: Regex,
}

impl WebsiteRecognizer {
    pub fn new() -> Result<Self> {
        let site = format!(r"(?P<site>(?:www[ ])?[\p{{L}}\p{{N}}-]+(?:[ ][\p{{L}}\p{{N}}-]+)*?[ ](?:{TLDS}))");
        Ok(Self {
            re_bracketed: Regex::new(&format!(r"(?i)^[\[\(][ ]?{site}[ ]?[\]\)]"))?,
            re_prefix: Regex::new(&format!(
                r"(?i)^(?P<site>www[ ][\p{{L}}\p{{N}}-]+(?:[ ][\p{{L}}\p{{N}}-]+)*?[ ](?:{TLDS}))[ ]?-"
            ))?,
        })
    }
}

impl Recognizer for WebsiteRecognizer {
    fn field(&self) -> Field {
        Field::Website
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        let view = text.view();
        let caps = self
            .re_bracketed
            .captures(view)
            .or_else(|| self.re_prefix.captures(view))?;
        let whole = caps.get(0)?;
        let site = caps.name("site")?.as_str().replace(' ', ".");

        Some(Match::new(
            Span::new(whole.start(), whole.end()),
            FieldValue::Website(site),
        ))
    }
}

/// An 8-digit hex CRC32 in square brackets, e.g. `[A1B2C3D4]`. All-digit
/// values are left alone: `[20201231]` is far more often a date.
pub struct ChecksumRecognizer {
    re_crc32: Regex,
}

impl ChecksumRecognizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_crc32: Regex::new(r"\[(?P<crc>[0-9A-Fa-f]{8})\]")?,
        })
    }
}

impl Recognizer for ChecksumRecognizer {
    fn field(&self) -> Field {
        Field::Checksum
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        self.re_crc32.captures_iter(text.view()).find_map(|caps| {
            let crc = caps.name("crc")?.as_str();
            if crc.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let whole = caps.get(0)?;
            Some(Match::new(
                Span::new(whole.start(), whole.end()),
                FieldValue::Checksum(crc.to_uppercase()),
            ))
        })
    }
}

pub fn language_recognizer(entries: &[Entry<String>]) -> Result<VocabularyRecognizer<String>> {
    let table = TokenTable::compile("language", entries, "")?;
    Ok(VocabularyRecognizer::new(Field::Language, table, FieldValue::Language)
        .weak()
        .repeating())
}

pub fn flag_recognizer(entries: &[Entry<Flag>]) -> Result<VocabularyRecognizer<Flag>> {
    let table = TokenTable::compile("flag", entries, "")?;
    Ok(VocabularyRecognizer::new(Field::Flag, table, FieldValue::Flag)
        .weak()
        .repeating())
}

/// Container word inside the metadata region, else the stripped extension.
pub struct ContainerRecognizer {
    table: TokenTable<Container>,
}

impl ContainerRecognizer {
    pub fn new(entries: &[Entry<Container>]) -> Result<Self> {
        Ok(Self {
            table: TokenTable::compile("container", entries, "")?,
        })
    }
}

impl Recognizer for ContainerRecognizer {
    fn field(&self) -> Field {
        Field::Container
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        let in_text = Position::AfterBoundary
            .start(text)
            .and_then(|from| self.table.find(text.view(), from))
            .map(|hit| Match::new(hit.span, FieldValue::Container(*hit.value)));

        // The extension is not part of the text, so it claims nothing.
        in_text.or_else(|| {
            text.extension().map(|container| {
                Match::new(
                    Span::empty(text.text().len()),
                    FieldValue::Container(container),
                )
            })
        })
    }
}
