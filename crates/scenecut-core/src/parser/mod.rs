pub mod assemble;
pub mod episode;
pub mod group;
pub mod normalizer;
pub mod pipeline;
pub mod quality;
pub mod recognizer;
pub mod tags;
pub mod title;
pub mod working;
pub mod year;

pub use assemble::RecordAssembler;
pub use normalizer::{Normalized, Normalizer};
pub use pipeline::{Claim, Extraction, Parser, parse};
pub use recognizer::{Field, FieldValue, Match, Recognizer};
pub use title::TitleResolver;
pub use working::{Span, WorkingText};
