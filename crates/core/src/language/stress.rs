//! Syllable nuclei and stress position.
//!
//! Nuclei are single vowels, except that a falling diphthong (`ai au ei eu
//! ëi ëu oi ou iu ui`) whose second letter is unaccented is one nucleus. A
//! glottal stop or any consonant ends the current nucleus.

use super::letters::{accented, is_accented, is_vowel, unaccented};
use crate::error::{CodecError, Result};

const FALLING_DIPHTHONGS: [(char, char); 10] = [
    ('a', 'i'),
    ('a', 'u'),
    ('e', 'i'),
    ('e', 'u'),
    ('ë', 'i'),
    ('ë', 'u'),
    ('o', 'i'),
    ('o', 'u'),
    ('i', 'u'),
    ('u', 'i'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stress {
    Monosyllabic,
    Zerosyllabic,
    Ultimate,
    Penultimate,
    Antepenultimate,
    /// No accent written; read as penultimate.
    Unmarked,
}

impl Stress {
    /// Whether the word is stressed on its last syllable, counting a
    /// monosyllable as such.
    pub fn is_ultimate(self) -> bool {
        matches!(self, Stress::Ultimate | Stress::Monosyllabic)
    }
}

/// Stress and syllable count of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressInfo {
    pub stress: Stress,
    pub syllables: usize,
}

/// One syllable nucleus: its first character index, length in characters,
/// and whether it carries an accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Nucleus {
    start: usize,
    len: usize,
    accented: bool,
}

fn nuclei(chars: &[char]) -> Vec<Nucleus> {
    let mut found: Vec<Nucleus> = Vec::new();
    let mut previous_vowel = false;
    for (i, &c) in chars.iter().enumerate() {
        if !is_vowel(c) {
            previous_vowel = false;
            continue;
        }
        if previous_vowel {
            if let Some(last) = found.last_mut() {
                let first = unaccented(chars[last.start]);
                if last.len == 1
                    && !is_accented(c)
                    && FALLING_DIPHTHONGS.contains(&(first, c))
                {
                    last.len = 2;
                    continue;
                }
            }
        }
        found.push(Nucleus { start: i, len: 1, accented: is_accented(c) });
        previous_vowel = true;
    }
    found
}

/// Number of syllables in a word.
pub fn syllable_count(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    nuclei(&chars).len()
}

/// Determine stress from the written accents of a normalized word.
///
/// With `strict`, an accent on a monosyllable is rejected.
pub fn analyze(word: &str, strict: bool) -> Result<StressInfo> {
    let chars: Vec<char> = word.chars().collect();
    let found = nuclei(&chars);
    let marked: Vec<usize> = found
        .iter()
        .enumerate()
        .filter(|(_, n)| n.accented)
        .map(|(i, _)| i)
        .collect();
    if marked.len() > 1 {
        return Err(CodecError::MultipleStressMarks { word: word.to_string() });
    }
    let syllables = found.len();
    let stress = match (syllables, marked.first()) {
        (0, _) => Stress::Zerosyllabic,
        (1, Some(_)) if strict => {
            return Err(CodecError::InvalidStressPosition {
                word: word.to_string(),
                detail: "accent on a monosyllable".to_string(),
            })
        }
        (1, _) => Stress::Monosyllabic,
        (_, None) => Stress::Unmarked,
        (n, Some(&i)) => match n - i {
            1 => Stress::Ultimate,
            2 => Stress::Penultimate,
            3 => Stress::Antepenultimate,
            _ => {
                return Err(CodecError::InvalidStressPosition {
                    word: word.to_string(),
                    detail: format!("syllable {} of {}", i + 1, n),
                })
            }
        },
    };
    log::trace!("stress of '{}': {:?} over {} syllables", word, stress, syllables);
    Ok(StressInfo { stress, syllables })
}

/// Write an accent on the syllable `from_end` positions from the end
/// (1 = ultimate). The word must be unaccented.
pub fn apply_stress(word: &str, from_end: usize) -> Result<String> {
    let mut chars: Vec<char> = word.chars().collect();
    let found = nuclei(&chars);
    if from_end == 0 || from_end > found.len() {
        return Err(CodecError::combination(format!(
            "cannot stress syllable {} from the end of '{}'",
            from_end, word
        )));
    }
    let target = found[found.len() - from_end];
    let c = chars[target.start];
    chars[target.start] = accented(c).unwrap_or(c);
    Ok(chars.into_iter().collect())
}
