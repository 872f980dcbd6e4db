use std::fmt;

use serde::{Deserialize, Serialize};

/// Video resolution, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resolution {
    /// 240p
    SD240,
    /// 360p
    SD360,
    /// 480p: Standard Definition
    SD480,
    /// 576p: PAL Standard Definition
    SD576,
    /// 720p: High Definition
    HD720,
    /// 1080p: Full HD
    FHD1080,
    /// 1440p: Quad HD
    QHD1440,
    /// 2160p: Ultra HD / 4K
    UHD2160,
}

impl Resolution {
    /// Maps a vertical pixel count onto a known resolution.
    #[must_use]
    pub fn from_height(height: u32) -> Option<Self> {
        match height {
            240 => Some(Self::SD240),
            360 => Some(Self::SD360),
            480 => Some(Self::SD480),
            576 => Some(Self::SD576),
            720 => Some(Self::HD720),
            1080 => Some(Self::FHD1080),
            1440 => Some(Self::QHD1440),
            2160 => Some(Self::UHD2160),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SD240 => write!(f, "240p"),
            Self::SD360 => write!(f, "360p"),
            Self::SD480 => write!(f, "480p"),
            Self::SD576 => write!(f, "576p"),
            Self::HD720 => write!(f, "720p"),
            Self::FHD1080 => write!(f, "1080p"),
            Self::QHD1440 => write!(f, "1440p"),
            Self::UHD2160 => write!(f, "2160p"),
        }
    }
}

/// Acquisition origin of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// Untouched disc stream remuxed into a new container.
    BluRayRemux,
    /// Blu-ray disc rip (BluRay, BDRip, BRRip).
    BluRay,
    /// Lossless capture from a streaming service.
    WebDL,
    /// Re-encoded capture from a streaming service.
    WebRip,
    /// Bare "WEB" tag, unspecified web origin.
    Web,
    /// Re-encode from an unspecified HD source.
    HDRip,
    /// High definition broadcast capture.
    HDTV,
    /// Pure digital (SD) broadcast capture.
    PDTV,
    /// Standard definition broadcast capture.
    SDTV,
    /// Digital satellite capture.
    DSR,
    /// Pay-per-view capture.
    PPV,
    /// Full DVD image.
    DVD,
    /// DVD rip.
    DVDRip,
    /// Screener sent out on DVD.
    DVDScreener,
    /// Promotional screener.
    Screener,
    /// Camera capture in a theater.
    Cam,
    /// Theater capture with direct audio.
    Telesync,
    /// Telecine film transfer.
    Telecine,
    /// Unfinished workprint.
    Workprint,
    /// VHS tape capture.
    VHS,
    /// LaserDisc capture.
    LaserDisc,
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BluRayRemux => "Blu-ray Remux",
            Self::BluRay => "Blu-ray",
            Self::WebDL => "WEB-DL",
            Self::WebRip => "WEBRip",
            Self::Web => "WEB",
            Self::HDRip => "HDRip",
            Self::HDTV => "HDTV",
            Self::PDTV => "PDTV",
            Self::SDTV => "SDTV",
            Self::DSR => "DSR",
            Self::PPV => "PPV",
            Self::DVD => "DVD",
            Self::DVDRip => "DVDRip",
            Self::DVDScreener => "DVDSCR",
            Self::Screener => "Screener",
            Self::Cam => "CAM",
            Self::Telesync => "TS",
            Self::Telecine => "TC",
            Self::Workprint => "Workprint",
            Self::VHS => "VHS",
            Self::LaserDisc => "LaserDisc",
        };
        f.write_str(label)
    }
}

/// Video codec family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodec {
    /// AVC family: x264, H.264, AVC.
    H264,
    /// HEVC family: x265, H.265, HEVC.
    HEVC,
    AV1,
    VP9,
    XviD,
    DivX,
    MPEG2,
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H264 => write!(f, "H.264"),
            Self::HEVC => write!(f, "HEVC"),
            Self::AV1 => write!(f, "AV1"),
            Self::VP9 => write!(f, "VP9"),
            Self::XviD => write!(f, "XviD"),
            Self::DivX => write!(f, "DivX"),
            Self::MPEG2 => write!(f, "MPEG-2"),
        }
    }
}

/// Audio codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCodec {
    TrueHD,
    DTSHDMA,
    DTSX,
    DTSHD,
    DTS,
    /// Dolby Digital Plus (DDP, DD+, E-AC3).
    EAC3,
    /// Dolby Digital (DD, AC3).
    AC3,
    AAC,
    FLAC,
    Opus,
    MP3,
    LPCM,
    Vorbis,
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrueHD => write!(f, "TrueHD"),
            Self::DTSHDMA => write!(f, "DTS-HD MA"),
            Self::DTSX => write!(f, "DTS:X"),
            Self::DTSHD => write!(f, "DTS-HD"),
            Self::DTS => write!(f, "DTS"),
            Self::EAC3 => write!(f, "E-AC3"),
            Self::AC3 => write!(f, "AC3"),
            Self::AAC => write!(f, "AAC"),
            Self::FLAC => write!(f, "FLAC"),
            Self::Opus => write!(f, "Opus"),
            Self::MP3 => write!(f, "MP3"),
            Self::LPCM => write!(f, "LPCM"),
            Self::Vorbis => write!(f, "Vorbis"),
        }
    }
}

/// Audio channel layout, e.g. 5.1 is five full-range channels plus one LFE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioChannels {
    /// Full-range channels.
    pub main: u8,
    /// Low-frequency effect channels.
    pub lfe: u8,
}

impl AudioChannels {
    #[must_use]
    pub const fn new(main: u8, lfe: u8) -> Self {
        Self { main, lfe }
    }
}

impl fmt::Display for AudioChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.main, self.lfe)
    }
}

/// Media container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    MKV,
    MP4,
    M4V,
    AVI,
    MOV,
    WMV,
    FLV,
    WebM,
    TS,
    M2TS,
    MPG,
    OGM,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            Self::MKV => "mkv",
            Self::MP4 => "mp4",
            Self::M4V => "m4v",
            Self::AVI => "avi",
            Self::MOV => "mov",
            Self::WMV => "wmv",
            Self::FLV => "flv",
            Self::WebM => "webm",
            Self::TS => "ts",
            Self::M2TS => "m2ts",
            Self::MPG => "mpg",
            Self::OGM => "ogm",
        };
        f.write_str(ext)
    }
}
