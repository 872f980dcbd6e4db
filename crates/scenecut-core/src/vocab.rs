//! # Vocabulary Tables
//!
//! Fixed token vocabularies as ordered `(pattern, value)` tables. Recognizers
//! walk a table in order and the first entry that matches anywhere wins, so
//! longer or more specific spellings must come before the shorter tokens
//! they contain (`WEB-DL` before `WEB`).
//!
//! Patterns are regex fragments matched case-insensitively against the
//! normalized text, where `.` and `_` have already become spaces. An entry
//! that must keep its case (e.g. `TS`) opts out with `(?-i:...)`.
//!
//! Entries that are also ordinary words (`Web`, `Opus`, `Remux`) are weak:
//! they are only claimed at or after the metadata boundary, never in a title.

use serde::{Deserialize, Serialize};

use crate::types::{AudioCodec, Container, Flag, MediaSource, Resolution, VideoCodec};

pub const RESOLUTIONS: &[(&str, Resolution)] = &[
    (r"2160[pi]|4k|uhd", Resolution::UHD2160),
    (r"1440[pi]", Resolution::QHD1440),
    (r"1080[pi]", Resolution::FHD1080),
    (r"720[pi]", Resolution::HD720),
    (r"576[pi]", Resolution::SD576),
    (r"480[pi]", Resolution::SD480),
    (r"360[pi]", Resolution::SD360),
    (r"240[pi]", Resolution::SD240),
];

pub const SOURCES: &[(&str, MediaSource)] = &[
    (r"(?:blu-?ray|bd|uhd)[ -]?remux", MediaSource::BluRayRemux),
    (r"remux", MediaSource::BluRayRemux),
    (r"dvd-?scr|dvd-?screener", MediaSource::DVDScreener),
    (r"bd-?scr", MediaSource::Screener),
    (r"screener|scr", MediaSource::Screener),
    (r"uhd[ -]?blu-?ray|blu-?ray|bd-?rip|br-?rip|bd(?:25|50|mv)?", MediaSource::BluRay),
    (r"web-?dl", MediaSource::WebDL),
    (r"web-?rip", MediaSource::WebRip),
    (r"web", MediaSource::Web),
    (r"hd-?rip", MediaSource::HDRip),
    (r"hdtv(?:-?rip)?|tv-?rip", MediaSource::HDTV),
    (r"pdtv", MediaSource::PDTV),
    (r"sdtv", MediaSource::SDTV),
    (r"dsr(?:-?rip)?|dth-?rip|sat-?rip|dvb-?rip", MediaSource::DSR),
    (r"ppv(?:-?rip)?", MediaSource::PPV),
    (r"dvd-?rip|dvd-?mux", MediaSource::DVDRip),
    (r"dvd-?r|dvd[59]|dvd", MediaSource::DVD),
    (r"hd-?cam|cam-?rip|(?-i:CAM)", MediaSource::Cam),
    (r"hd-?ts|tele-?sync|pdvd|(?-i:TS)", MediaSource::Telesync),
    (r"hd-?tc|tele-?cine|(?-i:TC)", MediaSource::Telecine),
    (r"workprint|(?-i:WP)", MediaSource::Workprint),
    (r"vhs(?:-?rip)?", MediaSource::VHS),
    (r"laser-?disc|ld-?rip", MediaSource::LaserDisc),
];

pub const VIDEO_CODECS: &[(&str, VideoCodec)] = &[
    (r"[xh][ -]?265|hevc", VideoCodec::HEVC),
    (r"[xh][ -]?264|avc", VideoCodec::H264),
    (r"av1", VideoCodec::AV1),
    (r"vp9", VideoCodec::VP9),
    (r"xvid", VideoCodec::XviD),
    (r"divx", VideoCodec::DivX),
    (r"mpeg-?2", VideoCodec::MPEG2),
];

pub const AUDIO_CODECS: &[(&str, AudioCodec)] = &[
    (r"true-?hd(?:[ ]?atmos)?", AudioCodec::TrueHD),
    (r"dts-?hd[ -]?ma", AudioCodec::DTSHDMA),
    (r"dts[ -]?x", AudioCodec::DTSX),
    (r"dts-?hd(?:[ -]?hra)?", AudioCodec::DTSHD),
    (r"dts(?:-?es)?", AudioCodec::DTS),
    (r"ddp|dd\+|e-?ac-?3|dolby[ ]?digital[ ]?plus", AudioCodec::EAC3),
    (r"ac-?3|dolby[ ]?digital", AudioCodec::AC3),
    (r"dd", AudioCodec::AC3),
    (r"he-?aac|aac(?:-?lc)?", AudioCodec::AAC),
    (r"flac", AudioCodec::FLAC),
    (r"opus", AudioCodec::Opus),
    (r"mp3", AudioCodec::MP3),
    (r"l?pcm", AudioCodec::LPCM),
    (r"vorbis", AudioCodec::Vorbis),
];

pub const LANGUAGES: &[(&str, &str)] = &[
    (r"english|eng", "en"),
    (r"truefrench|french|vff|vfq|fre", "fr"),
    (r"german|deutsch|ger", "de"),
    (r"latino", "es-419"),
    (r"spanish|castellano|espanol|spa|esp", "es"),
    (r"italian|ita", "it"),
    (r"brazilian|pt-?br", "pt-BR"),
    (r"portuguese|por", "pt"),
    (r"russian|rus", "ru"),
    (r"japanese|jap|jpn", "ja"),
    (r"korean|kor", "ko"),
    (r"chinese|mandarin|cantonese|chs|cht", "zh"),
    (r"hindi", "hi"),
    (r"tamil", "ta"),
    (r"telugu", "te"),
    (r"dutch|flemish|nld", "nl"),
    (r"swedish|swe", "sv"),
    (r"norwegian|nor", "no"),
    (r"danish", "da"),
    (r"finnish", "fi"),
    (r"polish|pol|pldub", "pl"),
    (r"turkish|tur", "tr"),
    (r"arabic", "ar"),
    (r"hungarian|hun", "hu"),
    (r"czech|cze", "cs"),
    (r"ukrainian|ukr", "uk"),
    (r"greek", "el"),
    (r"hebrew|heb", "he"),
    (r"thai", "th"),
    (r"vietnamese|vie", "vi"),
];

pub const FLAGS: &[(&str, Flag)] = &[
    (r"proper", Flag::Proper),
    (r"repack|rerip", Flag::Repack),
    (r"extended(?:[ ]?(?:cut|edition))?", Flag::Extended),
    (r"unrated|uncut|uncensored", Flag::Unrated),
    (r"remastered", Flag::Remastered),
    (r"director'?s?[ ]?cut", Flag::DirectorsCut),
    (r"limited", Flag::Limited),
    (r"internal", Flag::Internal),
    (r"(?-i:REAL)", Flag::Real),
    (r"hard-?coded|hard-?sub(?:bed|s)?|(?-i:HC)", Flag::Hardcoded),
    (r"widescreen|(?-i:WS)", Flag::Widescreen),
    (r"3d", Flag::ThreeD),
    (r"(?:half-?|h-?)?sbs|side[ -]?by[ -]?side", Flag::SideBySide),
    (r"dubbed|dub", Flag::Dubbed),
    (r"subbed|subs", Flag::Subbed),
    (r"read[ -]?nfo", Flag::ReadNfo),
    (r"convert", Flag::Convert),
    (r"dual[ -]?audio|dual", Flag::DualAudio),
    (r"multi(?:[ -]?audio)?", Flag::MultiAudio),
    (r"hdr(?:10(?:\+|plus)?)?", Flag::Hdr),
    (r"dovi|dolby[ ]?vision|(?-i:DV)", Flag::DolbyVision),
    (r"10[ -]?bit|hi10p?", Flag::TenBit),
];

/// Built-in patterns that double as dictionary words; see the module docs.
pub const WEAK_PATTERNS: &[&str] = &["remux", "screener|scr", "web", "dd", "opus"];

/// Container words recognized inside the text. `ts` and `mpg` are left out
/// because they collide with release tags; they still count as extensions.
pub const CONTAINERS: &[(&str, Container)] = &[
    (r"mkv", Container::MKV),
    (r"mp4", Container::MP4),
    (r"m4v", Container::M4V),
    (r"avi", Container::AVI),
    (r"mov", Container::MOV),
    (r"wmv", Container::WMV),
    (r"flv", Container::FLV),
    (r"webm", Container::WebM),
    (r"m2ts", Container::M2TS),
    (r"ogm", Container::OGM),
];

/// Trailing file extensions stripped by the normalizer.
pub const EXTENSIONS: &[(&str, Container)] = &[
    ("mkv", Container::MKV),
    ("mp4", Container::MP4),
    ("m4v", Container::M4V),
    ("avi", Container::AVI),
    ("mov", Container::MOV),
    ("wmv", Container::WMV),
    ("flv", Container::FLV),
    ("webm", Container::WebM),
    ("ts", Container::TS),
    ("m2ts", Container::M2TS),
    ("mpg", Container::MPG),
    ("mpeg", Container::MPG),
    ("ogm", Container::OGM),
];

/// Looks up a file extension (case-insensitive) in [`EXTENSIONS`].
#[must_use]
pub fn container_for_extension(ext: &str) -> Option<Container> {
    EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, container)| *container)
}

/// One vocabulary entry: a regex fragment and the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub pattern: String,
    pub value: T,
    /// Only claimed at or after the metadata boundary, even in a strong table.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub weak: bool,
}

impl<T> Entry<T> {
    pub fn new(pattern: impl Into<String>, value: T) -> Self {
        Self {
            pattern: pattern.into(),
            value,
            weak: false,
        }
    }

    /// An entry for a token that is also a common word.
    pub fn weak(pattern: impl Into<String>, value: T) -> Self {
        Self {
            weak: true,
            ..Self::new(pattern, value)
        }
    }
}

/// The full set of vocabulary tables a parser is built from.
///
/// `Default` is the empty set, which is what a partial configuration file
/// deserializes into; use [`Vocabularies::builtin`] for the shipped tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabularies {
    pub resolution: Vec<Entry<Resolution>>,
    pub source: Vec<Entry<MediaSource>>,
    pub video_codec: Vec<Entry<VideoCodec>>,
    pub audio_codec: Vec<Entry<AudioCodec>>,
    pub language: Vec<Entry<String>>,
    pub flag: Vec<Entry<Flag>>,
    pub container: Vec<Entry<Container>>,
}

fn table<T: Copy>(entries: &[(&str, T)]) -> Vec<Entry<T>> {
    entries
        .iter()
        .map(|(pattern, value)| {
            if WEAK_PATTERNS.contains(pattern) {
                Entry::weak(*pattern, *value)
            } else {
                Entry::new(*pattern, *value)
            }
        })
        .collect()
}

impl Vocabularies {
    /// The built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            resolution: table(RESOLUTIONS),
            source: table(SOURCES),
            video_codec: table(VIDEO_CODECS),
            audio_codec: table(AUDIO_CODECS),
            language: LANGUAGES
                .iter()
                .map(|(pattern, code)| Entry::new(*pattern, (*code).to_string()))
                .collect(),
            flag: table(FLAGS),
            container: table(CONTAINERS),
        }
    }

    /// Returns `true` if every table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolution.is_empty()
            && self.source.is_empty()
            && self.video_codec.is_empty()
            && self.audio_codec.is_empty()
            && self.language.is_empty()
            && self.flag.is_empty()
            && self.container.is_empty()
    }

    /// Puts `extra` entries in front of the existing ones, table by table,
    /// so they take precedence.
    #[must_use]
    pub fn with_overrides(mut self, extra: Vocabularies) -> Self {
        fn prepend<T>(base: &mut Vec<Entry<T>>, mut front: Vec<Entry<T>>) {
            front.append(base);
            *base = front;
        }

        prepend(&mut self.resolution, extra.resolution);
        prepend(&mut self.source, extra.source);
        prepend(&mut self.video_codec, extra.video_codec);
        prepend(&mut self.audio_codec, extra.audio_codec);
        prepend(&mut self.language, extra.language);
        prepend(&mut self.flag, extra.flag);
        prepend(&mut self.container, extra.container);
        self
    }
}
