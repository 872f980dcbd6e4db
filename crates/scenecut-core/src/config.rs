//! Parser configuration.
//!
//! A [`ParserConfig`] carries the accepted year range and the vocabulary
//! tables. Extra vocabulary can be loaded from TOML:
//!
//! ```toml
//! [years]
//! min = 1950
//! max = 2030
//!
//! [[vocabulary.source]]
//! pattern = "web-?hd"
//! value = "WebDL"
//!
//! [[vocabulary.language]]
//! pattern = "klingon"
//! value = "tlh"
//! ```

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::error::{Result, ScenecutError};
use crate::vocab::Vocabularies;

/// Default range of plausible release years.
pub const DEFAULT_YEARS: RangeInclusive<u16> = 1900..=2099;

/// Configuration for the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Four-digit numbers inside this range may be read as a year.
    pub year_range: RangeInclusive<u16>,
    /// Vocabulary tables the recognizers are compiled from.
    pub vocabularies: Vocabularies,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            year_range: DEFAULT_YEARS,
            vocabularies: Vocabularies::builtin(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    years: Option<YearsSection>,
    #[serde(default)]
    vocabulary: Vocabularies,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YearsSection {
    min: u16,
    max: u16,
}

impl ParserConfig {
    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the range of years the year recognizer accepts.
    pub fn with_year_range(mut self, range: RangeInclusive<u16>) -> Self {
        self.year_range = range;
        self
    }

    /// Replace the vocabulary tables.
    pub fn with_vocabularies(mut self, vocabularies: Vocabularies) -> Self {
        self.vocabularies = vocabularies;
        self
    }

    /// Default configuration extended by a TOML document. Entries from the
    /// document go in front of the built-in ones of the same table.
    ///
    /// # Errors
    ///
    /// Returns `ScenecutError::Config` if the document does not match the
    /// schema, and `ScenecutError::InvalidYearRange` for an empty range.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| ScenecutError::Config(e.to_string()))?;

        let mut config = Self::default();
        if let Some(YearsSection { min, max }) = file.years {
            config = config.with_year_range(min..=max);
        }
        config.vocabularies = config.vocabularies.with_overrides(file.vocabulary);

        config.validate()?;
        Ok(config)
    }

    /// Checks the settings that can be checked without compiling patterns.
    ///
    /// # Errors
    ///
    /// Returns `ScenecutError::InvalidYearRange` if the year range is empty.
    pub fn validate(&self) -> Result<()> {
        if self.year_range.is_empty() {
            return Err(ScenecutError::InvalidYearRange {
                min: *self.year_range.start(),
                max: *self.year_range.end(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Flag, MediaSource};

    #[test]
    fn default_config() {
        let config = ParserConfig::new();
        assert_eq!(config.year_range, 1900..=2099);
        assert_eq!(config.vocabularies, Vocabularies::builtin());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = ParserConfig::new()
            .with_year_range(1950..=1999)
            .with_vocabularies(Vocabularies::default());
        assert_eq!(config.year_range, 1950..=1999);
        assert!(config.vocabularies.is_empty());
    }

    #[test]
    fn empty_year_range_is_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let config = ParserConfig::new().with_year_range(2000..=1990);
        assert!(matches!(
            config.validate(),
            Err(ScenecutError::InvalidYearRange {
                min: 2000,
                max: 1990
            })
        ));
    }

    #[test]
    fn toml_entries_are_prepended() {
        let config = ParserConfig::from_toml_str(
            r#"
            [years]
            min = 1950
            max = 2030

            [[vocabulary.source]]
            pattern = "web-?hd"
            value = "WebDL"

            [[vocabulary.flag]]
            pattern = "festival"
            value = "limited"
            "#,
        )
        .unwrap();

        assert_eq!(config.year_range, 1950..=2030);
        assert_eq!(config.vocabularies.source[0].pattern, "web-?hd");
        assert_eq!(config.vocabularies.source[0].value, MediaSource::WebDL);
        assert_eq!(config.vocabularies.flag[0].value, Flag::Limited);
        assert_eq!(
            config.vocabularies.language,
            Vocabularies::builtin().language
        );
    }

    #[test]
    fn empty_toml_is_the_default() {
        assert_eq!(ParserConfig::from_toml_str("").unwrap(), ParserConfig::default());
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(
            ParserConfig::from_toml_str("[unknown]\nkey = 1"),
            Err(ScenecutError::Config(_))
        ));
        assert!(matches!(
            ParserConfig::from_toml_str("[[vocabulary.source]]\npattern = \"x\"\nvalue = \"Betamax\""),
            Err(ScenecutError::Config(_))
        ));
        assert!(matches!(
            ParserConfig::from_toml_str("[years]\nmin = 2000\nmax = 1900"),
            Err(ScenecutError::InvalidYearRange { .. })
        ));
    }
}
