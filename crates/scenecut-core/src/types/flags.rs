use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean release tags.
///
/// A flag is either claimed by a token in the release name or left out of
/// [`ParsedRelease::flags`](crate::types::ParsedRelease::flags) entirely;
/// absence means "not claimed", not "explicitly false".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Proper,
    Repack,
    Extended,
    Unrated,
    Remastered,
    DirectorsCut,
    Limited,
    Internal,
    Real,
    Hardcoded,
    Widescreen,
    ThreeD,
    SideBySide,
    Dubbed,
    Subbed,
    ReadNfo,
    Convert,
    DualAudio,
    MultiAudio,
    Hdr,
    DolbyVision,
    TenBit,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Proper => "PROPER",
            Self::Repack => "REPACK",
            Self::Extended => "EXTENDED",
            Self::Unrated => "UNRATED",
            Self::Remastered => "REMASTERED",
            Self::DirectorsCut => "Director's Cut",
            Self::Limited => "LIMITED",
            Self::Internal => "iNTERNAL",
            Self::Real => "REAL",
            Self::Hardcoded => "HC",
            Self::Widescreen => "WS",
            Self::ThreeD => "3D",
            Self::SideBySide => "SBS",
            Self::Dubbed => "DUBBED",
            Self::Subbed => "SUBBED",
            Self::ReadNfo => "READNFO",
            Self::Convert => "CONVERT",
            Self::DualAudio => "Dual Audio",
            Self::MultiAudio => "MULTi",
            Self::Hdr => "HDR",
            Self::DolbyVision => "DV",
            Self::TenBit => "10bit",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&Flag::DirectorsCut).unwrap(), "\"directors_cut\"");
        assert_eq!(serde_json::to_string(&Flag::ThreeD).unwrap(), "\"three_d\"");
        let back: Flag = serde_json::from_str("\"repack\"").unwrap();
        assert_eq!(back, Flag::Repack);
    }

    #[test]
    fn flag_display() {
        assert_eq!(Flag::Proper.to_string(), "PROPER");
        assert_eq!(Flag::TenBit.to_string(), "10bit");
    }
}
