//! # Title Resolver
//!
//! Builds the title from whatever the recognizers left behind, and decides
//! whether a recognized year was really metadata or part of the name.

use regex::Regex;

use super::working::{Span, WorkingText};
use crate::error::Result;

/// Punctuation trimmed from both ends of the title.
const DANGLING: &[char] = &['-', '–', '_', '.', ',', ':', ';', '/', '|', '+', '~', '&'];

pub struct TitleResolver {
    re_empty_brackets: Regex,
}

impl TitleResolver {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_empty_brackets: Regex::new(r"[\(\[\{][\s\-_.,]*[\)\]\}]")?,
        })
    }

    /// A year is metadata when title text precedes it and nothing but
    /// blanks separates it from the next claim (or the end of the text).
    pub fn year_is_metadata(&self, text: &WorkingText, year: Span) -> bool {
        let next = text
            .next_claim_from(year.end)
            .unwrap_or(text.text().len());
        text.has_words_in(0..year.start) && !text.has_words_in(year.end..next)
    }

    /// Returns the title and the leftover segments after it.
    ///
    /// The title is the first retained segment that is not blank once
    /// cleaned; an input that was all metadata yields an empty title.
    pub fn resolve(&self, text: &WorkingText) -> (String, Vec<String>) {
        let mut cleaned = text
            .segments()
            .map(|segment| self.clean(segment))
            .filter(|segment| !segment.is_empty());

        let title = cleaned.next().unwrap_or_default();
        (title, cleaned.collect())
    }

    /// Drops empty and unbalanced brackets, collapses whitespace and trims
    /// dangling separators.
    pub fn clean(&self, segment: &str) -> String {
        let mut current = segment.to_string();
        loop {
            let next = self.re_empty_brackets.replace_all(&current, " ").into_owned();
            if next == current {
                break;
            }
            current = next;
        }

        let balanced = drop_unbalanced(&current);
        let collapsed = balanced.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed
            .trim_matches(|c: char| c.is_whitespace() || DANGLING.contains(&c))
            .to_string()
    }
}

fn closing(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Removes every bracket character that has no partner.
fn drop_unbalanced(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut keep = vec![true; chars.len()];
    let mut open: Vec<usize> = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' | '[' | '{' => open.push(i),
            ')' | ']' | '}' => match open.last() {
                Some(&o) if closing(chars[o]) == c => {
                    open.pop();
                }
                _ => keep[i] = false,
            },
            _ => {}
        }
    }
    for o in open {
        keep[o] = false;
    }

    chars
        .into_iter()
        .zip(keep)
        .filter_map(|(c, kept)| kept.then_some(c))
        .collect()
}
