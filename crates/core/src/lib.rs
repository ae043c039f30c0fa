//! Morphological codec for an agglutinative constructed language: parses
//! surface words into formative and referential records and generates words
//! back from records.

pub mod config;
pub mod error;
pub mod grammar;
pub mod language;
pub mod types;
pub mod word;

pub use config::{CodecConfig, ConfigError};
pub use error::{CodecError, Result};
pub use types::{Affix, Formative, Referential, ReferentialShape, Relation, Root, Word};
pub use word::{generate, generate_with, parse, parse_with, ParsedWord};
