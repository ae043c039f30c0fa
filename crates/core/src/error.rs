//! Error taxonomy for the codec.
//!
//! Every parse failure is fatal for the call that raised it; the variants
//! carry the offending text and the slot it was found in.

use thiserror::Error;

/// Errors raised while parsing or generating a word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A vowel run that is not in the vowel-form table.
    #[error("invalid vowel form '{form}' in {slot}")]
    InvalidVowelForm { form: String, slot: &'static str },

    /// A consonant cluster that cannot fill the slot it occupies.
    #[error("invalid consonant form '{form}' in {slot}")]
    InvalidConsonantForm { form: String, slot: &'static str },

    #[error("multiple stress marks in '{word}'")]
    MultipleStressMarks { word: String },

    /// Stress further back than the antepenultimate syllable, or a stress
    /// position the word class does not use.
    #[error("invalid stress position in '{word}': {detail}")]
    InvalidStressPosition { word: String, detail: String },

    /// The token stream does not alternate the way the slot template needs.
    #[error("unexpected token pattern near '{near}': expected {expected}")]
    UnexpectedTokenPattern { near: String, expected: &'static str },

    #[error("unknown Ca form '{form}'")]
    UnknownCaForm { form: String },

    #[error("unknown case form '{form}' in {slot}")]
    UnknownCaseForm { form: String, slot: &'static str },

    /// A reserved or forbidden affix consonant.
    #[error("invalid affix consonant '{form}': {reason}")]
    InvalidAffixConsonant { form: String, reason: &'static str },

    /// A referential-affix marker whose referent part does not resolve to
    /// exactly one referent.
    #[error("ambiguous referential affix '{form}'")]
    AmbiguousReferentialAffix { form: String },

    /// A record whose categories cannot be realized together. Raised only by
    /// the generator.
    #[error("invalid category combination: {detail}")]
    InvalidCategoryCombination { detail: String },
}

pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    pub(crate) fn vowel(form: impl Into<String>, slot: &'static str) -> Self {
        CodecError::InvalidVowelForm { form: form.into(), slot }
    }

    pub(crate) fn consonant(form: impl Into<String>, slot: &'static str) -> Self {
        CodecError::InvalidConsonantForm { form: form.into(), slot }
    }

    pub(crate) fn pattern(near: impl Into<String>, expected: &'static str) -> Self {
        CodecError::UnexpectedTokenPattern { near: near.into(), expected }
    }

    pub(crate) fn combination(detail: impl Into<String>) -> Self {
        CodecError::InvalidCategoryCombination { detail: detail.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_slot() {
        let e = CodecError::vowel("aia", "Vr");
        assert_eq!(e.to_string(), "invalid vowel form 'aia' in Vr");
        let e = CodecError::pattern("kl", "CsVx form");
        assert!(e.to_string().contains("CsVx form"));
    }
}
