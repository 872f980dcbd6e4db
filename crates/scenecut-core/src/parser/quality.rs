//! Technical quality recognizers: resolution, source, video and audio codec.
//!
//! All of them are strong: their vocabularies are distinctive enough to be
//! claimed anywhere in the name. They still look at the metadata region
//! first, and entries that double as words (`Web`, `Opus`) only count there.

use regex::Captures;

use super::recognizer::{
    Field, FieldValue, Match, Recognizer, TokenPattern, TokenTable, VocabularyRecognizer, tok_span,
};
use super::working::WorkingText;
use crate::error::Result;
use crate::types::{AudioChannels, AudioCodec, MediaSource, Resolution, VideoCodec};
use crate::vocab::Entry;

/// Channel layout glued to an audio codec: `DD5.1`, `AAC 2.0`, `DTS-HD MA 7.1`.
/// Dots are spaces by the time the recognizers run.
const CHANNEL_SUFFIX: &str = r"(?:[ ]?(?P<main>[1-9])[ ](?P<lfe>[0-2]))?";

/// Resolution tokens (`1080p`, `4K`) or explicit `WxH` dimensions.
pub struct ResolutionRecognizer {
    table: TokenTable<Resolution>,
    re_dimensions: TokenPattern,
}

impl ResolutionRecognizer {
    pub fn new(entries: &[Entry<Resolution>]) -> Result<Self> {
        Ok(Self {
            table: TokenTable::compile("resolution", entries, "")?,
            re_dimensions: TokenPattern::new(r"(?P<w>\d{3,4})x(?P<h>\d{3,4})")?,
        })
    }

    fn dimensions(&self, view: &str) -> Option<Match> {
        self.re_dimensions.captures_from(view, 0).find_map(|caps| {
            let height: u32 = caps.name("h")?.as_str().parse().ok()?;
            let resolution = Resolution::from_height(height)?;
            Some(Match::new(tok_span(&caps)?, FieldValue::Resolution(resolution)))
        })
    }
}

impl Recognizer for ResolutionRecognizer {
    fn field(&self) -> Field {
        Field::Resolution
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        self.table
            .find_strong(text)
            .map(|hit| Match::new(hit.span, FieldValue::Resolution(*hit.value)))
            .or_else(|| self.dimensions(text.view()))
    }
}

pub fn source_recognizer(
    entries: &[Entry<MediaSource>],
) -> Result<VocabularyRecognizer<MediaSource>> {
    let table = TokenTable::compile("source", entries, "")?;
    Ok(VocabularyRecognizer::new(Field::Source, table, FieldValue::Source))
}

pub fn video_codec_recognizer(
    entries: &[Entry<VideoCodec>],
) -> Result<VocabularyRecognizer<VideoCodec>> {
    let table = TokenTable::compile("video_codec", entries, "")?;
    Ok(VocabularyRecognizer::new(
        Field::VideoCodec,
        table,
        FieldValue::VideoCodec,
    ))
}

/// Audio codec, with the channel layout when it is attached to the codec.
pub struct AudioRecognizer {
    table: TokenTable<AudioCodec>,
}

impl AudioRecognizer {
    pub fn new(entries: &[Entry<AudioCodec>]) -> Result<Self> {
        Ok(Self {
            table: TokenTable::compile("audio_codec", entries, CHANNEL_SUFFIX)?,
        })
    }
}

impl Recognizer for AudioRecognizer {
    fn field(&self) -> Field {
        Field::Audio
    }

    fn try_match(&self, text: &WorkingText) -> Option<Match> {
        let hit = self.table.find_strong(text)?;
        Some(Match::new(
            hit.span,
            FieldValue::Audio {
                codec: *hit.value,
                channels: channels(&hit.caps),
            },
        ))
    }
}

fn channels(caps: &Captures<'_>) -> Option<AudioChannels> {
    let main = caps.name("main")?.as_str().parse().ok()?;
    let lfe = caps.name("lfe")?.as_str().parse().ok()?;
    Some(AudioChannels::new(main, lfe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalizer::Normalizer;
    use crate::parser::working::Span;
    use crate::vocab::Vocabularies;

    fn working(raw: &str) -> WorkingText {
        WorkingText::new(Normalizer::new().normalize(raw))
    }

    fn matched<'a>(text: &'a WorkingText, m: &Match) -> &'a str {
        &text.text()[m.span.range()]
    }

    #[test]
    fn resolution_tokens() {
        let vocab = Vocabularies::builtin();
        let recognizer = ResolutionRecognizer::new(&vocab.resolution).unwrap();

        let text = working("Movie.Title.2015.720p.BluRay.x264-GROUP.mkv");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Resolution(Resolution::HD720));
        assert_eq!(matched(&text, &m), "720p");

        let text = working("Movie 2019 4K HDR");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Resolution(Resolution::UHD2160));
    }

    #[test]
    fn resolution_dimensions() {
        let vocab = Vocabularies::builtin();
        let recognizer = ResolutionRecognizer::new(&vocab.resolution).unwrap();

        let text = working("[Grp] Show - 01 [1920x1080]");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Resolution(Resolution::FHD1080));
        assert_eq!(matched(&text, &m), "1920x1080");

        assert!(recognizer.try_match(&working("Show 1920x1000")).is_none());
    }

    #[test]
    fn resolution_needs_whole_token() {
        let vocab = Vocabularies::builtin();
        let recognizer = ResolutionRecognizer::new(&vocab.resolution).unwrap();
        assert!(recognizer.try_match(&working("Movie 1080pX")).is_none());
    }

    #[test]
    fn source_prefers_specific_tokens() {
        let vocab = Vocabularies::builtin();
        let recognizer = source_recognizer(&vocab.source).unwrap();

        let text = working("The.Show.S02E05.1080p.WEB-DL.x264-GROUP");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::WebDL));
        assert_eq!(matched(&text, &m), "WEB-DL");

        let text = working("1917.2019.1080p.WEBRip.x264");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::WebRip));

        let text = working("Movie.2010.1080p.BluRay.REMUX.AVC");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::BluRayRemux));
        assert_eq!(matched(&text, &m), "BluRay REMUX");
    }

    #[test]
    fn word_like_sources_stay_out_of_titles() {
        let vocab = Vocabularies::builtin();
        let recognizer = source_recognizer(&vocab.source).unwrap();

        assert!(recognizer.try_match(&working("Charlottes Web")).is_none());

        let mut text = working("Charlottes.Web.2006.720p.HDTV.x264");
        text.set_year_hint(Some(15));
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::HDTV));

        let mut text = working("Movie.2018.720p.WEB.x264");
        text.set_year_hint(Some(6));
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::Web));
        assert_eq!(matched(&text, &m), "WEB");
    }

    #[test]
    fn metadata_region_is_searched_first() {
        let vocab = Vocabularies::builtin();
        let recognizer = source_recognizer(&vocab.source).unwrap();

        let mut text = working("The.Remux.2020.720p.WEB-DL");
        text.set_year_hint(Some(10));
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::WebDL));
        assert_eq!(matched(&text, &m), "WEB-DL");
    }

    #[test]
    fn short_source_tags_keep_case() {
        let vocab = Vocabularies::builtin();
        let recognizer = source_recognizer(&vocab.source).unwrap();

        let m = recognizer.try_match(&working("Movie.2023.TS.x264")).unwrap();
        assert_eq!(m.value, FieldValue::Source(MediaSource::Telesync));
        assert!(recognizer.try_match(&working("Movie ts")).is_none());
    }

    #[test]
    fn video_codecs() {
        let vocab = Vocabularies::builtin();
        let recognizer = video_codec_recognizer(&vocab.video_codec).unwrap();

        let m = recognizer.try_match(&working("Movie.x264-GROUP")).unwrap();
        assert_eq!(m.value, FieldValue::VideoCodec(VideoCodec::H264));

        let text = working("Movie.H.265.10bit");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(m.value, FieldValue::VideoCodec(VideoCodec::HEVC));
        assert_eq!(matched(&text, &m), "H 265");

        assert!(recognizer.try_match(&working("Movie Title")).is_none());
    }

    #[test]
    fn audio_with_channels() {
        let vocab = Vocabularies::builtin();
        let recognizer = AudioRecognizer::new(&vocab.audio_codec).unwrap();

        let text = working("Movie.2020.1080p.WEB-DL.DDP5.1.H.264-GRP");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(
            m.value,
            FieldValue::Audio {
                codec: AudioCodec::EAC3,
                channels: Some(AudioChannels::new(5, 1)),
            }
        );
        assert_eq!(matched(&text, &m), "DDP5 1");

        let text = working("Movie.2019.2160p.BluRay.TrueHD.7.1.Atmos");
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(
            m.value,
            FieldValue::Audio {
                codec: AudioCodec::TrueHD,
                channels: Some(AudioChannels::new(7, 1)),
            }
        );
    }

    #[test]
    fn audio_without_channels() {
        let vocab = Vocabularies::builtin();
        let recognizer = AudioRecognizer::new(&vocab.audio_codec).unwrap();

        let m = recognizer
            .try_match(&working("[Grp] Show - 01 [1080p FLAC]"))
            .unwrap();
        assert_eq!(
            m.value,
            FieldValue::Audio {
                codec: AudioCodec::FLAC,
                channels: None,
            }
        );
    }

    #[test]
    fn opus_in_a_title_is_not_audio() {
        let vocab = Vocabularies::builtin();
        let recognizer = AudioRecognizer::new(&vocab.audio_codec).unwrap();

        let mut text = working("Mr.Hollands.Opus.1995.1080p.BluRay");
        text.set_year_hint(Some(17));
        assert!(recognizer.try_match(&text).is_none());

        let mut text = working("[Grp] Show - 01 [1080p Opus]");
        assert!(text.remove(Span::new(0, 5)));
        assert!(text.remove(Span::new(17, 22)));
        let m = recognizer.try_match(&text).unwrap();
        assert_eq!(
            m.value,
            FieldValue::Audio {
                codec: AudioCodec::Opus,
                channels: None,
            }
        );
    }

    #[test]
    fn bare_channel_layout_is_not_audio() {
        let vocab = Vocabularies::builtin();
        let recognizer = AudioRecognizer::new(&vocab.audio_codec).unwrap();
        assert!(recognizer.try_match(&working("Movie 5.1 1080p")).is_none());
    }
}
