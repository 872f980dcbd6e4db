//! # Normalizer
//!
//! Turns a raw release name into the text the recognizers work on: a known
//! media extension is stripped, every run of `.`, `_` or whitespace becomes a
//! single space and the ends are trimmed. Case is kept as-is; recognizers
//! match case-insensitively on their own.

use crate::types::Container;
use crate::vocab;

/// Separator characters collapsed into a single space.
const SEPARATORS: &[char] = &['.', '_'];

/// Longest extension the normalizer will look at (`m2ts`, `mpeg`, `webm`).
const MAX_EXTENSION_LEN: usize = 4;

/// Normalized release name with a byte map back onto the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Normalized text, original casing preserved.
    pub text: String,
    /// Raw byte offset of every byte in `text`, plus one trailing entry for
    /// the end of the consumed raw region.
    pub origin: Vec<usize>,
    /// Container named by the stripped extension.
    pub extension: Option<Container>,
}

/// Release-name normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw release name.
    ///
    /// # Examples
    /// ```
    /// use scenecut_core::parser::normalizer::Normalizer;
    ///
    /// let n = Normalizer::new().normalize("The.Show_S02E05..1080p.mkv");
    /// assert_eq!(n.text, "The Show S02E05 1080p");
    /// assert!(n.extension.is_some());
    /// ```
    pub fn normalize(&self, raw: &str) -> Normalized {
        let (body, extension) = self.strip_extension(raw.trim_end());

        let mut text = String::with_capacity(body.len());
        let mut origin = Vec::with_capacity(body.len() + 1);
        let mut pending_space: Option<usize> = None;

        for (idx, c) in body.char_indices() {
            if c.is_whitespace() || SEPARATORS.contains(&c) {
                // Leading separators are dropped, inner runs collapse.
                if !text.is_empty() && pending_space.is_none() {
                    pending_space = Some(idx);
                }
                continue;
            }

            if let Some(at) = pending_space.take() {
                text.push(' ');
                origin.push(at);
            }

            text.push(c);
            origin.extend((0..c.len_utf8()).map(|k| idx + k));
        }

        // Trailing separators were never flushed, so the end of the text is
        // the start of that run (or the end of the body).
        origin.push(pending_space.unwrap_or(body.len()));

        Normalized {
            text,
            origin,
            extension,
        }
    }

    /// Splits off a trailing `.ext` when `ext` is a known media extension.
    fn strip_extension<'a>(&self, raw: &'a str) -> (&'a str, Option<Container>) {
        let Some(dot) = raw.rfind('.') else {
            return (raw, None);
        };

        let ext = &raw[dot + 1..];
        if ext.is_empty()
            || ext.len() > MAX_EXTENSION_LEN
            || !ext.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return (raw, None);
        }

        match vocab::container_for_extension(ext) {
            Some(container) => (&raw[..dot], Some(container)),
            None => (raw, None),
        }
    }
}
