//! Record assembler: folds recognizer values into a [`ParsedRelease`].

use super::recognizer::FieldValue;
use crate::types::ParsedRelease;

/// Accumulates field values for one parse call.
///
/// Single-valued fields keep the first value they receive; languages and
/// flags collect every value.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    release: ParsedRelease,
}

impl RecordAssembler {
    pub fn new(input: &str) -> Self {
        Self {
            release: ParsedRelease::new(input),
        }
    }

    pub fn apply(&mut self, value: FieldValue) {
        let release = &mut self.release;
        match value {
            FieldValue::Website(site) => {
                release.website.get_or_insert(site);
            }
            FieldValue::Checksum(crc) => {
                release.checksum.get_or_insert(crc);
            }
            FieldValue::SeasonEpisode { season, episode } => {
                if release.season.is_none() && release.episode.is_none() {
                    release.season = season;
                    release.episode = episode;
                }
            }
            FieldValue::Resolution(resolution) => {
                release.resolution.get_or_insert(resolution);
            }
            FieldValue::Source(source) => {
                release.source.get_or_insert(source);
            }
            FieldValue::VideoCodec(codec) => {
                release.video_codec.get_or_insert(codec);
            }
            FieldValue::Audio { codec, channels } => {
                if release.audio_codec.is_none() {
                    release.audio_codec = Some(codec);
                    release.audio_channels = channels;
                }
            }
            FieldValue::Language(code) => {
                release.languages.insert(code);
            }
            FieldValue::Flag(flag) => {
                release.flags.insert(flag);
            }
            FieldValue::Container(container) => {
                release.container.get_or_insert(container);
            }
            FieldValue::Group(group) => {
                release.group.get_or_insert(group);
            }
            FieldValue::Year(year) => {
                release.year.get_or_insert(year);
            }
        }
    }

    pub fn finish(mut self, title: String, excess: Vec<String>) -> ParsedRelease {
        self.release.title = title;
        self.release.excess = excess;
        self.release
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AudioChannels, AudioCodec, EpisodeSpec, Flag, MediaSource, Resolution,
    };

    #[test]
    fn first_value_wins() {
        let mut assembler = RecordAssembler::new("x");
        assembler.apply(FieldValue::Resolution(Resolution::HD720));
        assembler.apply(FieldValue::Resolution(Resolution::FHD1080));
        assembler.apply(FieldValue::Source(MediaSource::WebDL));

        let release = assembler.finish("Title".into(), vec![]);
        assert_eq!(release.resolution, Some(Resolution::HD720));
        assert_eq!(release.source, Some(MediaSource::WebDL));
        assert_eq!(release.title, "Title");
        assert_eq!(release.input, "x");
    }

    #[test]
    fn sets_collect_every_value() {
        let mut assembler = RecordAssembler::new("x");
        assembler.apply(FieldValue::Language("fr".into()));
        assembler.apply(FieldValue::Language("en".into()));
        assembler.apply(FieldValue::Language("fr".into()));
        assembler.apply(FieldValue::Flag(Flag::Repack));
        assembler.apply(FieldValue::Flag(Flag::Proper));

        let release = assembler.finish(String::new(), vec![]);
        assert_eq!(release.languages.len(), 2);
        assert!(release.has_flag(Flag::Proper));
        assert!(release.has_flag(Flag::Repack));
    }

    #[test]
    fn grouped_fields_move_together() {
        let mut assembler = RecordAssembler::new("x");
        assembler.apply(FieldValue::SeasonEpisode {
            season: Some(1),
            episode: Some(EpisodeSpec::Multi(vec![1, 2])),
        });
        assembler.apply(FieldValue::Audio {
            codec: AudioCodec::EAC3,
            channels: Some(AudioChannels::new(5, 1)),
        });
        assembler.apply(FieldValue::Audio {
            codec: AudioCodec::AAC,
            channels: None,
        });

        let release = assembler.finish("Show".into(), vec!["extra".into()]);
        assert_eq!(release.season, Some(1));
        assert_eq!(release.episode, Some(EpisodeSpec::Multi(vec![1, 2])));
        assert_eq!(release.audio_codec, Some(AudioCodec::EAC3));
        assert_eq!(release.audio_channels, Some(AudioChannels::new(5, 1)));
        assert_eq!(release.excess, vec!["extra".to_string()]);
    }
}
