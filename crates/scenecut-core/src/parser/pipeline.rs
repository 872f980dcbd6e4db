//! # Parser Pipeline
//!
//! The orchestrator: normalizes the input, runs every recognizer in its
//! fixed order against the shrinking working text, settles the year and
//! hands the remains to the title resolver.

use std::sync::LazyLock;

use serde::Serialize;
use tracing::{debug, trace};

use super::assemble::RecordAssembler;
use super::episode::SeasonEpisodeRecognizer;
use super::group::GroupRecognizer;
use super::normalizer::Normalizer;
use super::quality::{AudioRecognizer, ResolutionRecognizer, source_recognizer, video_codec_recognizer};
use super::recognizer::{Field, Match, Recognizer};
use super::tags::{
    ChecksumRecognizer, ContainerRecognizer, WebsiteRecognizer, flag_recognizer,
    language_recognizer,
};
use super::title::TitleResolver;
use super::working::{Span, WorkingText};
use super::year::YearRecognizer;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::types::ParsedRelease;

/// One span claimed during a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claim {
    /// Field the span was claimed for.
    pub field: Field,
    /// Matched text, as it appears in the normalized input.
    pub text: String,
    /// Byte range in the normalized text.
    pub span: Span,
    /// Byte range in the raw input.
    pub raw: Span,
}

impl Claim {
    fn new(text: &WorkingText, m: &Match) -> Self {
        let raw = text.to_raw(m.span);
        Self {
            field: m.field(),
            text: text.text()[m.span.range()].to_string(),
            span: m.span,
            raw: Span::new(raw.start, raw.end),
        }
    }
}

/// A parse result together with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub release: ParsedRelease,
    pub claims: Vec<Claim>,
}

/// Rule-based release-name parser.
///
/// Building a parser compiles every vocabulary table; parsing is then a
/// pure function of the input. A `Parser` is `Send + Sync` and can be shared
/// between threads.
pub struct Parser {
    config: ParserConfig,
    normalizer: Normalizer,
    recognizers: Vec<Box<dyn Recognizer>>,
    year: YearRecognizer,
    titles: TitleResolver,
}

impl Parser {
    /// Create a new parser with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ScenecutError::InvalidYearRange` for an empty year range and
    /// `ScenecutError::InvalidPattern` for a vocabulary entry that does not
    /// compile.
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let vocab = &config.vocabularies;

        // Order matters: each recognizer only sees what earlier ones left.
        let recognizers: Vec<Box<dyn Recognizer>> = vec![
            Box::new(WebsiteRecognizer::new()?),
            Box::new(ChecksumRecognizer::new()?),
            Box::new(SeasonEpisodeRecognizer::new(config.year_range.clone())?),
            Box::new(ResolutionRecognizer::new(&vocab.resolution)?),
            Box::new(source_recognizer(&vocab.source)?),
            Box::new(video_codec_recognizer(&vocab.video_codec)?),
            Box::new(AudioRecognizer::new(&vocab.audio_codec)?),
            Box::new(language_recognizer(&vocab.language)?),
            Box::new(flag_recognizer(&vocab.flag)?),
            Box::new(ContainerRecognizer::new(&vocab.container)?),
            Box::new(GroupRecognizer::new(vocab)?),
        ];

        Ok(Self {
            year: YearRecognizer::new(config.year_range.clone())?,
            titles: TitleResolver::new()?,
            normalizer: Normalizer::new(),
            recognizers,
            config,
        })
    }

    /// Create a new parser with the built-in configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ParserConfig::default())
    }

    /// Parse a release name.
    ///
    /// Never fails: an input without recognizable metadata yields a record
    /// with only a title, and the empty string yields an empty title.
    ///
    /// # Examples
    /// ```
    /// use scenecut_core::Parser;
    /// use scenecut_core::types::Resolution;
    ///
    /// let parser = Parser::with_defaults().unwrap();
    /// let release = parser.parse("Movie.Title.2015.720p.BluRay.x264-GROUP.mkv");
    ///
    /// assert_eq!(release.title, "Movie Title");
    /// assert_eq!(release.year, Some(2015));
    /// assert_eq!(release.resolution, Some(Resolution::HD720));
    /// assert_eq!(release.group.as_deref(), Some("GROUP"));
    /// ```
    pub fn parse(&self, input: &str) -> ParsedRelease {
        self.run(input).release
    }

    /// Parse a release name and report every claimed span.
    pub fn explain(&self, input: &str) -> Extraction {
        self.run(input)
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn run(&self, input: &str) -> Extraction {
        let mut text = WorkingText::new(self.normalizer.normalize(input));
        text.set_year_hint(self.year.hint(&text));

        let mut assembler = RecordAssembler::new(input);
        let mut claims = Vec::new();

        for recognizer in &self.recognizers {
            while let Some(m) = recognizer.try_match(&text) {
                if !text.remove(m.span) {
                    debug!(field = %m.field(), start = m.span.start, end = m.span.end, "span already claimed");
                    break;
                }

                let claim = Claim::new(&text, &m);
                debug!(field = %claim.field, text = %claim.text, start = m.span.start, end = m.span.end, "claimed span");
                claims.push(claim);

                let again = recognizer.repeatable() && !m.span.is_empty();
                assembler.apply(m.value);
                if !again {
                    break;
                }
            }
            trace!(field = %recognizer.field(), "recognizer done");
        }

        self.settle_year(&mut text, &mut assembler, &mut claims);

        let (title, excess) = self.titles.resolve(&text);
        Extraction {
            release: assembler.finish(title, excess),
            claims,
        }
    }

    /// Claims the year only if it sits at the title/metadata boundary;
    /// otherwise it stays part of the title.
    fn settle_year(
        &self,
        text: &mut WorkingText,
        assembler: &mut RecordAssembler,
        claims: &mut Vec<Claim>,
    ) {
        let Some(m) = self.year.try_match(text) else {
            trace!("no year candidate");
            return;
        };
        if !text.remove(m.span) {
            return;
        }

        if self.titles.year_is_metadata(text, m.span) {
            let claim = Claim::new(text, &m);
            debug!(text = %claim.text, start = m.span.start, "year is metadata");
            claims.push(claim);
            assembler.apply(m.value);
        } else {
            text.restore(m.span);
            debug!(start = m.span.start, "year kept in title");
        }
    }
}

static DEFAULT_PARSER: LazyLock<Parser> = LazyLock::new(|| {
    Parser::with_defaults().expect("built-in vocabularies always compile")
});

/// Convenience function to parse a release name with default settings.
///
/// # Examples
/// ```
/// let release = scenecut_core::parse("Show.Name.S01E01E02.mkv");
/// assert_eq!(release.title, "Show Name");
/// assert_eq!(release.season, Some(1));
/// ```
pub fn parse(input: &str) -> ParsedRelease {
    DEFAULT_PARSER.parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenecutError;
    use crate::types::{
        AudioChannels, AudioCodec, Container, EpisodeSpec, Flag, MediaSource, Resolution,
        VideoCodec,
    };
    use crate::vocab::{Entry, Vocabularies};

    fn parser() -> Parser {
        Parser::with_defaults().unwrap()
    }

    #[test]
    fn scene_episode() {
        let r = parser().parse("The.Show.S02E05.1080p.WEB-DL.x264-GROUP.mkv");
        assert_eq!(r.title, "The Show");
        assert_eq!(r.season, Some(2));
        assert_eq!(r.episode, Some(EpisodeSpec::Single(5)));
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
        assert_eq!(r.source, Some(MediaSource::WebDL));
        assert_eq!(r.video_codec, Some(VideoCodec::H264));
        assert_eq!(r.group.as_deref(), Some("GROUP"));
        assert_eq!(r.container, Some(Container::MKV));
        assert_eq!(r.year, None);
        assert!(r.excess.is_empty());
    }

    #[test]
    fn movie_with_audio_and_flags() {
        let r = parser().parse("Movie.Title.2019.PROPER.1080p.BluRay.DTS-HD.MA.5.1.x264-GRP");
        assert_eq!(r.title, "Movie Title");
        assert_eq!(r.year, Some(2019));
        assert!(r.has_flag(Flag::Proper));
        assert_eq!(r.audio_codec, Some(AudioCodec::DTSHDMA));
        assert_eq!(r.audio_channels, Some(AudioChannels::new(5, 1)));
        assert_eq!(r.group.as_deref(), Some("GRP"));
    }

    #[test]
    fn fansub_release() {
        let r = parser().parse("[SubsPlease] Frieren - 24 (1080p) [A1B2C3D4].mkv");
        assert_eq!(r.title, "Frieren");
        assert_eq!(r.episode, Some(EpisodeSpec::Single(24)));
        assert_eq!(r.season, None);
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
        assert_eq!(r.checksum.as_deref(), Some("A1B2C3D4"));
        assert_eq!(r.group.as_deref(), Some("SubsPlease"));
    }

    #[test]
    fn website_prefix_and_languages() {
        let r = parser().parse("[ www.Torrenting.com ] - Movie.2018.FRENCH.720p.WEB.x264-GRP");
        assert_eq!(r.website.as_deref(), Some("www.Torrenting.com"));
        assert_eq!(r.title, "Movie");
        assert_eq!(r.year, Some(2018));
        assert!(r.languages.contains("fr"));
        assert_eq!(r.source, Some(MediaSource::Web));
    }

    #[test]
    fn title_words_are_not_flags() {
        let r = parser().parse("The Extended Family");
        assert_eq!(r.title, "The Extended Family");
        assert!(r.flags.is_empty());
        assert!(!r.has_metadata());
    }

    #[test]
    fn explain_reports_claims_in_order() {
        let extraction = parser().explain("Movie.Title.2015.720p.BluRay.x264-GROUP.mkv");
        let fields: Vec<Field> = extraction.claims.iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Resolution,
                Field::Source,
                Field::VideoCodec,
                Field::Container,
                Field::Group,
                Field::Year,
            ]
        );

        let input = &extraction.release.input;
        for claim in &extraction.claims {
            if !claim.span.is_empty() {
                let raw = &input[claim.raw.start..claim.raw.end];
                assert_eq!(raw.replace('.', " "), claim.text);
            }
        }
    }

    #[test]
    fn custom_vocabulary_takes_precedence() {
        let extra = Vocabularies {
            source: vec![Entry::new("web-?hd", MediaSource::WebDL)],
            ..Default::default()
        };
        let config = ParserConfig::new()
            .with_vocabularies(Vocabularies::builtin().with_overrides(extra));
        let parser = Parser::new(config).unwrap();

        let r = parser.parse("Show.S01E01.720p.WEBHD.x264-GRP");
        assert_eq!(r.source, Some(MediaSource::WebDL));
        assert_eq!(r.title, "Show");
    }

    #[test]
    fn broken_vocabulary_fails_construction() {
        let extra = Vocabularies {
            flag: vec![Entry::new("(unclosed", Flag::Limited)],
            ..Default::default()
        };
        let config = ParserConfig::new()
            .with_vocabularies(Vocabularies::builtin().with_overrides(extra));
        assert!(matches!(
            Parser::new(config),
            Err(ScenecutError::InvalidPattern { table: "flag", .. })
        ));
    }

    #[test]
    fn parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }

    #[test]
    fn free_function_matches_parser() {
        let input = "Show.Name.S01E01E02.mkv";
        assert_eq!(parse(input), parser().parse(input));
    }
}
