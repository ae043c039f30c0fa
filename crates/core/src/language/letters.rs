//! Letter normalization and the vowel/consonant run classifier.

use crate::error::{CodecError, Result};
use crate::grammar::VowelForm;

pub const GLOTTAL_STOP: char = '\'';

/// Plain vowel letters after accent folding.
pub const VOWELS: &str = "aäeëioöuü";

/// The consonant alphabet.
pub const CONSONANTS: &str = "pbtdkgfvţḑszšžçxhļcẓčjmnňrlwyř";

/// Stressed spelling of each plain vowel, in `VOWELS` order.
const ACCENTED: &str = "áâéêíóôúû";
const ACCENT_BASES: &str = "aäeëioöuü";

lazy_static::lazy_static! {
    /// Variant letters folded onto the canonical alphabet.
    static ref VARIANTS: std::collections::HashMap<char, char> = {
        let mut m = std::collections::HashMap::new();
        for c in ['’', 'ʼ', '‘'] { m.insert(c, GLOTTAL_STOP); }
        m.insert('ṭ', 'ţ');
        m.insert('ḍ', 'ḑ');
        m.insert('ŗ', 'ř');
        m.insert('ṛ', 'ř');
        m.insert('ṇ', 'ň');
        m.insert('ż', 'ẓ');
        m.insert('ł', 'ļ');
        m.insert('ḷ', 'ļ');
        m
    };

    /// Base letter + combining mark → precomposed letter.
    static ref COMPOSED: std::collections::HashMap<(char, char), char> = {
        let mut m = std::collections::HashMap::new();
        // acute
        for (b, c) in [('a', 'á'), ('e', 'é'), ('i', 'í'), ('o', 'ó'), ('u', 'ú')] {
            m.insert((b, '\u{301}'), c);
        }
        // circumflex
        for (b, c) in [('a', 'â'), ('e', 'ê'), ('o', 'ô'), ('u', 'û')] {
            m.insert((b, '\u{302}'), c);
        }
        // diaeresis
        for (b, c) in [('a', 'ä'), ('e', 'ë'), ('o', 'ö'), ('u', 'ü')] {
            m.insert((b, '\u{308}'), c);
        }
        // cedilla
        for (b, c) in [('c', 'ç'), ('t', 'ţ'), ('d', 'ḑ'), ('l', 'ļ'), ('r', 'ř')] {
            m.insert((b, '\u{327}'), c);
        }
        // caron
        for (b, c) in [('c', 'č'), ('s', 'š'), ('z', 'ž'), ('r', 'ř'), ('n', 'ň')] {
            m.insert((b, '\u{30c}'), c);
        }
        // dot below
        for (b, c) in [('z', 'ẓ'), ('t', 'ţ'), ('d', 'ḑ'), ('r', 'ř'), ('n', 'ň'), ('l', 'ļ')] {
            m.insert((b, '\u{323}'), c);
        }
        m
    };
}

/// Lower-case, compose combining marks, fold variant letters, and strip a
/// leading glottal stop. Accents are kept for the stress analyzer.
pub fn normalize(raw: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(raw.len());
    for c in raw.trim().chars().flat_map(char::to_lowercase) {
        if let Some(prev) = out.last().copied() {
            if let Some(&composed) = COMPOSED.get(&(prev, c)) {
                out.pop();
                out.push(composed);
                continue;
            }
        }
        out.push(VARIANTS.get(&c).copied().unwrap_or(c));
    }
    let start = usize::from(out.first() == Some(&GLOTTAL_STOP));
    out[start..].iter().collect()
}

/// Replace stressed vowels with their plain forms.
pub fn fold_accents(word: &str) -> String {
    word.chars().map(unaccented).collect()
}

pub fn unaccented(c: char) -> char {
    match ACCENTED.chars().position(|a| a == c) {
        Some(i) => ACCENT_BASES.chars().nth(i).unwrap_or(c),
        None => c,
    }
}

/// Stressed spelling of a plain vowel.
pub fn accented(c: char) -> Option<char> {
    ACCENT_BASES.chars().position(|b| b == c).and_then(|i| ACCENTED.chars().nth(i))
}

pub fn is_accented(c: char) -> bool {
    ACCENTED.contains(c)
}

/// Vowel letter, stressed or not.
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(c) || is_accented(c)
}

pub fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsonantKind {
    Standard,
    /// Exactly `w` or `y`, or any `h`-led cluster.
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsonantForm {
    pub text: String,
    pub kind: ConsonantKind,
    pub is_geminated: bool,
}

impl ConsonantForm {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text == "w" || text == "y" || text.starts_with('h') {
            ConsonantKind::Special
        } else {
            ConsonantKind::Standard
        };
        let chars: Vec<char> = text.chars().collect();
        let is_geminated = chars.windows(2).any(|w| w[0] == w[1]);
        ConsonantForm { text, kind, is_geminated }
    }

    pub fn is_special(&self) -> bool {
        self.kind == ConsonantKind::Special
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterForm {
    Vowel(VowelForm),
    Consonant(ConsonantForm),
}

impl LetterForm {
    pub fn as_vowel(&self) -> Option<VowelForm> {
        match self {
            LetterForm::Vowel(v) => Some(*v),
            LetterForm::Consonant(_) => None,
        }
    }

    pub fn as_consonant(&self) -> Option<&ConsonantForm> {
        match self {
            LetterForm::Consonant(c) => Some(c),
            LetterForm::Vowel(_) => None,
        }
    }
}

/// Split an accent-folded word into alternating vowel and consonant runs.
///
/// The glottal stop belongs to vowel runs.
pub fn classify(word: &str) -> Result<Vec<LetterForm>> {
    let mut forms = Vec::new();
    let mut chars = word.chars().peekable();
    while let Some(&c) = chars.peek() {
        let mut run = String::new();
        if is_vowel(c) || c == GLOTTAL_STOP {
            while let Some(&v) = chars.peek() {
                if !(is_vowel(v) || v == GLOTTAL_STOP) {
                    break;
                }
                run.push(v);
                chars.next();
            }
            forms.push(LetterForm::Vowel(VowelForm::parse(&run, "vowel run")?));
        } else if is_consonant(c) {
            while let Some(&k) = chars.peek() {
                if !is_consonant(k) {
                    break;
                }
                run.push(k);
                chars.next();
            }
            forms.push(LetterForm::Consonant(ConsonantForm::new(run)));
        } else {
            return Err(CodecError::consonant(c.to_string(), "alphabet"));
        }
    }
    Ok(forms)
}
