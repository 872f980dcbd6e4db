//! # Working Text
//!
//! The mutable state of one parse call. Claimed spans are never cut out of
//! the normalized string; instead the text keeps an ordered list of retained
//! byte intervals and a masked view in which every claimed byte is replaced
//! by [`GAP`]. Offsets therefore stay valid for the whole call and patterns
//! cannot match across a removed span.

use std::ops::Range;

use serde::Serialize;

use super::normalizer::Normalized;
use crate::types::Container;

/// Mask byte written over claimed spans in the matching view.
pub const GAP: char = '\u{1f}';

/// A byte range of the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start after end");
        Self { start, end }
    }

    /// A zero-length span at `at`, used for evidence found outside the text.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Normalized text plus the bookkeeping of which bytes are still unclaimed.
#[derive(Debug, Clone)]
pub struct WorkingText {
    text: String,
    origin: Vec<usize>,
    extension: Option<Container>,
    retained: Vec<Range<usize>>,
    claimed: Vec<Span>,
    view: String,
    year_hint: Option<usize>,
}

impl WorkingText {
    pub fn new(normalized: Normalized) -> Self {
        let Normalized {
            text,
            origin,
            extension,
        } = normalized;

        let retained = if text.is_empty() {
            Vec::new()
        } else {
            vec![0..text.len()]
        };

        Self {
            view: text.clone(),
            text,
            origin,
            extension,
            retained,
            claimed: Vec::new(),
            year_hint: None,
        }
    }

    /// The normalized text, including claimed bytes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The matching view: the normalized text with claimed bytes masked.
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Container named by the stripped file extension, if any.
    pub fn extension(&self) -> Option<Container> {
        self.extension
    }

    /// Number of retained bytes. Never grows while recognizers run.
    pub fn len(&self) -> usize {
        self.retained.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    /// Spans claimed so far, ordered by position.
    pub fn claimed(&self) -> &[Span] {
        &self.claimed
    }

    /// Returns `true` if every byte of `span` is still unclaimed.
    pub fn is_retained(&self, span: Span) -> bool {
        if span.is_empty() {
            return span.end <= self.text.len();
        }
        self.retained
            .iter()
            .any(|r| r.start <= span.start && span.end <= r.end)
    }

    /// Claims `span`, removing it from the retained intervals.
    ///
    /// Returns `false` (and changes nothing) when any byte of the span was
    /// already claimed. Empty spans are accepted but not recorded.
    pub fn remove(&mut self, span: Span) -> bool {
        if !self.is_retained(span) {
            return false;
        }
        if span.is_empty() {
            return true;
        }

        let mut next = Vec::with_capacity(self.retained.len() + 1);
        for r in self.retained.drain(..) {
            if r.end <= span.start || span.end <= r.start {
                next.push(r);
                continue;
            }
            if r.start < span.start {
                next.push(r.start..span.start);
            }
            if span.end < r.end {
                next.push(span.end..r.end);
            }
        }
        self.retained = next;

        let mask: String = std::iter::repeat_n(GAP, span.len()).collect();
        self.view.replace_range(span.range(), &mask);

        let at = self.claimed.partition_point(|c| c.start < span.start);
        self.claimed.insert(at, span);
        true
    }

    /// Gives a previously claimed span back to the text.
    ///
    /// Returns `false` if `span` is not one of the claimed spans.
    pub fn restore(&mut self, span: Span) -> bool {
        let Some(pos) = self.claimed.iter().position(|c| *c == span) else {
            return false;
        };
        self.claimed.remove(pos);

        self.view
            .replace_range(span.range(), &self.text[span.range()]);

        self.retained.push(span.range());
        self.retained.sort_by_key(|r| r.start);
        let mut merged: Vec<Range<usize>> = Vec::with_capacity(self.retained.len());
        for r in self.retained.drain(..) {
            match merged.last_mut() {
                Some(last) if last.end == r.start => last.end = r.end,
                _ => merged.push(r),
            }
        }
        self.retained = merged;
        true
    }

    /// Start of the leftmost claimed span that has unclaimed words before
    /// it. Claims at the very front (a website or a `[Group]` tag) do not
    /// mark where metadata begins.
    pub fn anchor(&self) -> Option<usize> {
        self.claimed
            .iter()
            .map(|c| c.start)
            .find(|&start| self.has_words_in(0..start))
    }

    /// Start of the first claimed span at or after `pos`.
    pub fn next_claim_from(&self, pos: usize) -> Option<usize> {
        self.claimed.iter().map(|c| c.start).find(|&s| s >= pos)
    }

    /// Records where a year-like token sits before any recognizer runs.
    pub fn set_year_hint(&mut self, hint: Option<usize>) {
        self.year_hint = hint;
    }

    /// Position from which metadata is expected: the leftmost claimed span
    /// or the first year-like token, whichever comes first.
    pub fn boundary(&self) -> Option<usize> {
        match (self.anchor(), self.year_hint) {
            (Some(a), Some(y)) => Some(a.min(y)),
            (a, y) => a.or(y),
        }
    }

    /// Returns `true` if unclaimed alphanumeric text lies in `range`.
    pub fn has_words_in(&self, range: Range<usize>) -> bool {
        self.retained.iter().any(|r| {
            let start = r.start.max(range.start);
            let end = r.end.min(range.end);
            start < end && self.text[start..end].chars().any(char::is_alphanumeric)
        })
    }

    /// Retained slices of the normalized text, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.retained.iter().map(|r| &self.text[r.clone()])
    }

    /// Maps a span of the normalized text back onto the raw input.
    pub fn to_raw(&self, span: Span) -> Range<usize> {
        let at = |i: usize| self.origin.get(i).copied().unwrap_or_default();
        at(span.start)..at(span.end)
    }
}
