pub mod episode;
pub mod flags;
pub mod quality;
pub mod result;

pub use episode::EpisodeSpec;
pub use flags::Flag;
pub use quality::{AudioChannels, AudioCodec, Container, MediaSource, Resolution, VideoCodec};
pub use result::ParsedRelease;
