//! Year recognizer.
//!
//! Runs last so that season/episode numbers and resolutions are already
//! claimed. Whether the chosen year really is metadata is decided later by
//! the title resolver.

use std::ops::RangeInclusive;

use regex::Captures;

use super::recognizer::{Field, FieldValue, Match, Recognizer, TokenPattern, tok_span};
use super::working::{Span, WorkingText};
use crate::error::Result;

pub struct YearRecognizer {
    years: RangeInclusive<u16>,
    re_year: TokenPattern,
}

impl YearRecognizer {
    pub fn new(years: RangeInclusive<u16>) -> Result<Self> {
        Ok(Self {
            years,
            re_year: TokenPattern::new(
                r"\((?P<paren>\d{4})\)|\[(?P<bracket>\d{4})\]|(?P<bare>\d{4})",
            )?,
        })
    }

    /// Unclaimed in-range year tokens, in text order.
    pub fn candidates(&self, text: &WorkingText) -> Vec<(Span, u16)> {
        self.re_year
            .captures_from(text.view(), 0)
            .filter_map(|caps| {
                let year = year_of(&caps)?;
                self.years
                    .contains(&year)
                    .then_some((tok_span(&caps)?, year))
            })
            .collect()
    }

    /// Start of the first year-like token that follows some title text.
    /// Used as an early metadata boundary before anything is claimed.
    pub fn hint(&self, text: &WorkingText) -> Option<usize> {
        self.candidates(text)
            .into_iter()
            .map(|(span, _)| span.start)
            .find(|&start| text.has_words_in(0..start))
    }
}

impl Recognizer for YearRecognizer {
    fn field(&self) -> Field {
        Field::Year
    }

    /// Prefers the last candidate before the leftmost claim, then the first
    /// one after it. With nothing claimed the last candidate wins.
    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        let candidates = self.candidates(text);
        let chosen = match text.anchor() {
            Some(anchor) => candidates
                .iter()
                .rev()
                .find(|(span, _)| span.end <= anchor)
                .or_else(|| candidates.iter().find(|(span, _)| span.start >= anchor)),
            None => candidates.last(),
        };

        chosen.map(|&(span, year)| Match::new(span, FieldValue::Year(year)))
    }
}

fn year_of(caps: &Captures<'_>) -> Option<u16> {
    caps.name("paren")
        .or_else(|| caps.name("bracket"))
        .or_else(|| caps.name("bare"))?
        .as_str()
        .parse()
        .ok()
}
