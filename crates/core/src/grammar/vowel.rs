//! The vowel-form table: (series, degree) ↔ spelling.

use std::collections::HashMap;

use crate::error::{CodecError, Result};
use crate::language::letters::GLOTTAL_STOP;

/// Spellings by series (rows) and degree (columns 0–9).
#[rustfmt::skip]
const SERIES: [[&str; 10]; 4] = [
    ["ae", "a",  "ä",  "e",  "i",  "ëi", "ö",  "o",  "ü",  "u"],
    ["ea", "ai", "au", "ei", "eu", "ëu", "ou", "oi", "iu", "ui"],
    ["üo", "ia", "ie", "io", "iö", "eë", "uö", "uo", "ue", "ua"],
    ["üö", "ao", "aö", "eo", "eö", "oë", "öe", "oe", "öa", "oa"],
];

/// Series 3 spellings used after a consonant ending in `y` (degrees 1–4) or
/// `w` (degrees 6–9).
#[rustfmt::skip]
const SERIES_3_ALTERNATES: [&str; 10] = [
    "", "uä", "uë", "üä", "üë", "", "öë", "ië", "öä", "iä",
];

lazy_static::lazy_static! {
    static ref BY_SPELLING: HashMap<&'static str, (u8, u8)> = {
        let mut m = HashMap::new();
        for (s, row) in SERIES.iter().enumerate() {
            for (d, spelling) in row.iter().enumerate() {
                m.insert(*spelling, (s as u8 + 1, d as u8));
            }
        }
        for (d, spelling) in SERIES_3_ALTERNATES.iter().enumerate() {
            if !spelling.is_empty() {
                m.insert(*spelling, (3, d as u8));
            }
        }
        m
    };
}

pub(crate) fn preload_table() {
    lazy_static::initialize(&BY_SPELLING);
}

/// A vowel form: one cell of the vowel table, optionally carrying a glottal
/// stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VowelForm {
    pub sequence: u8,
    pub degree: u8,
    pub has_glottal_stop: bool,
}

impl VowelForm {
    /// Panics on a cell outside the table; callers pass table coordinates.
    pub const fn new(sequence: u8, degree: u8) -> Self {
        assert!(sequence >= 1 && sequence <= 4 && degree <= 9);
        VowelForm { sequence, degree, has_glottal_stop: false }
    }

    pub fn with_glottal_stop(self, has_glottal_stop: bool) -> Self {
        VowelForm { has_glottal_stop, ..self }
    }

    /// Look up a vowel run, which may contain one glottal stop.
    pub fn parse(run: &str, slot: &'static str) -> Result<Self> {
        let stops = run.chars().filter(|&c| c == GLOTTAL_STOP).count();
        if stops > 1 {
            return Err(CodecError::vowel(run, slot));
        }
        let mut stripped: String = run.chars().filter(|&c| c != GLOTTAL_STOP).collect();
        if stops == 1 {
            // a'a is the word-final spelling of a
            let chars: Vec<char> = stripped.chars().collect();
            if chars.len() == 2 && chars[0] == chars[1] {
                stripped = chars[0].to_string();
            }
        }
        match BY_SPELLING.get(stripped.as_str()) {
            Some(&(sequence, degree)) => Ok(VowelForm {
                sequence,
                degree,
                has_glottal_stop: stops == 1,
            }),
            None => Err(CodecError::vowel(run, slot)),
        }
    }

    /// Standard spelling, ignoring the glottal stop.
    pub fn as_str(&self) -> &'static str {
        SERIES[self.sequence as usize - 1][self.degree as usize]
    }

    /// Spelling after `preceding` (the consonant form written just before
    /// this vowel, if any), with the glottal stop placed for a word-final or
    /// word-internal position.
    pub fn render(&self, preceding: Option<&str>, at_end: bool) -> Result<String> {
        let text = match (self.sequence, preceding.and_then(|c| c.chars().last())) {
            (3, Some('y')) if (1..=4).contains(&self.degree) => {
                SERIES_3_ALTERNATES[self.degree as usize]
            }
            (3, Some('w')) if (6..=9).contains(&self.degree) => {
                SERIES_3_ALTERNATES[self.degree as usize]
            }
            _ => self.as_str(),
        };
        if self.has_glottal_stop {
            insert_glottal_stop(text, at_end)
        } else {
            Ok(text.to_string())
        }
    }
}

impl std::fmt::Display for VowelForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())?;
        if self.has_glottal_stop {
            write!(f, "{}", GLOTTAL_STOP)?;
        }
        Ok(())
    }
}

/// Insert a glottal stop into a vowel spelling.
///
/// Word-final forms infix the stop (`a` → `a'a`, `ai` → `a'i`); word-internal
/// forms take it after the vowel (`a'`).
pub fn insert_glottal_stop(text: &str, at_end: bool) -> Result<String> {
    if text.contains(GLOTTAL_STOP) {
        return Ok(text.to_string());
    }
    if !at_end {
        return Ok(format!("{}{}", text, GLOTTAL_STOP));
    }
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [v] => Ok(format!("{v}{GLOTTAL_STOP}{v}")),
        [a, b] => Ok(format!("{a}{GLOTTAL_STOP}{b}")),
        _ => Err(CodecError::vowel(text, "glottal stop insertion")),
    }
}
