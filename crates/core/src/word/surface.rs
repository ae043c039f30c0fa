//! Assembles slot pieces into a surface string.

use crate::error::Result;
use crate::grammar::VowelForm;
use crate::language::stress::syllable_count;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Consonant(String),
    Vowel(VowelForm),
}

/// Pieces of a word in surface order.
#[derive(Debug, Clone, Default)]
pub(crate) struct SurfaceBuilder {
    pieces: Vec<Piece>,
}

impl SurfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consonant(&mut self, text: impl Into<String>) -> &mut Self {
        self.pieces.push(Piece::Consonant(text.into()));
        self
    }

    pub fn vowel(&mut self, vowel: VowelForm) -> &mut Self {
        self.pieces.push(Piece::Vowel(vowel));
        self
    }

    /// Mark the most recently added vowel with a glottal stop.
    pub fn glottalize_last_vowel(&mut self) -> &mut Self {
        if let Some(Piece::Vowel(v)) = self.pieces.iter_mut().rev().find(|p| matches!(p, Piece::Vowel(_))) {
            *v = v.with_glottal_stop(true);
        }
        self
    }

    /// Render with series-3 alternates after `w`/`y` and glottal stops
    /// placed for their position.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        let mut previous: Option<&str> = None;
        let last = self.pieces.len().saturating_sub(1);
        for (i, piece) in self.pieces.iter().enumerate() {
            match piece {
                Piece::Consonant(text) => {
                    out.push_str(text);
                    previous = Some(text.as_str());
                }
                Piece::Vowel(v) => {
                    out.push_str(&v.render(previous, i == last)?);
                    previous = None;
                }
            }
        }
        Ok(out)
    }

    pub fn syllables(&self) -> Result<usize> {
        Ok(syllable_count(&self.render()?))
    }
}
