//! Positional consonant-cluster legality.

use std::collections::HashSet;

use super::letters::{classify, fold_accents, LetterForm, GLOTTAL_STOP};
use crate::error::{CodecError, Result};

lazy_static::lazy_static! {
    static ref VOICED_STOPS: HashSet<char> = "bdg".chars().collect();
    static ref VOICELESS_STOPS: HashSet<char> = "ptk".chars().collect();

    /// Two-letter clusters allowed at the end of a word.
    static ref LEGAL_FINAL_PAIRS: HashSet<String> = {
        let sonorant_tails = "pbtdkgfvţḑszšžcẓčjçx";
        let rows: [(char, &str); 28] = [
            ('p', "tksšfţçx"),
            ('t', "sšfţçx"),
            ('k', "tsšfţç"),
            ('b', "dgzžvḑ"),
            ('d', "zžvḑ"),
            ('g', "dzžvḑ"),
            ('f', "tksšçx"),
            ('v', "dgzžḑ"),
            ('ţ', "tksšfx"),
            ('ḑ', "dgv"),
            ('s', "ptkfţçx"),
            ('z', "bdgvḑ"),
            ('š', "ptkfţçx"),
            ('ž', "bdgvḑ"),
            ('ç', "tkp"),
            ('x', "tpsš"),
            ('c', "tkp"),
            ('č', "tkp"),
            ('ẓ', "dgb"),
            ('j', "dgb"),
            ('m', sonorant_tails),
            ('n', sonorant_tails),
            ('ň', sonorant_tails),
            ('l', "pbtdkgfvţḑszšžcẓčjçxmnň"),
            ('r', "pbtdkgfvţḑszšžcẓčjçxlmnň"),
            ('ř', "pbtdkgfvţḑszšžcẓčjçxlmnň"),
            ('ļ', "ptkfţsšçxmn"),
            ('h', "lrřmnň"),
        ];
        let mut set = HashSet::new();
        for (first, seconds) in rows {
            for second in seconds.chars() {
                set.insert(format!("{first}{second}"));
            }
        }
        set
    };
}

/// Where a cluster sits in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterPosition {
    General,
    WordFinal,
}

/// Rules every cluster must satisfy.
pub fn check_general(cluster: &str) -> Result<()> {
    let chars: Vec<char> = cluster.chars().collect();
    let violation = || CodecError::consonant(cluster, "consonant cluster");
    if chars.len() > 5 {
        return Err(violation());
    }
    if chars.iter().filter(|&&c| c == GLOTTAL_STOP).count() > 1 {
        return Err(violation());
    }
    let body = &chars[..chars.len().saturating_sub(1)];
    if body.iter().any(|&c| c == 'w' || c == 'y') {
        return Err(violation());
    }
    for pair in chars.windows(2) {
        let mixed = (VOICED_STOPS.contains(&pair[0]) && VOICELESS_STOPS.contains(&pair[1]))
            || (VOICELESS_STOPS.contains(&pair[0]) && VOICED_STOPS.contains(&pair[1]));
        if mixed {
            return Err(violation());
        }
    }
    Ok(())
}

/// Rules for a cluster that ends the word.
pub fn check_final(cluster: &str) -> Result<()> {
    let chars: Vec<char> = cluster.chars().collect();
    let violation = || CodecError::consonant(cluster, "word-final cluster");
    match chars.len() {
        0 | 1 => Ok(()),
        2 => {
            if LEGAL_FINAL_PAIRS.contains(cluster) {
                check_general(cluster)
            } else {
                Err(violation())
            }
        }
        3 | 4 => {
            let tail: String = chars[chars.len() - 2..].iter().collect();
            if !LEGAL_FINAL_PAIRS.contains(&tail) {
                return Err(violation());
            }
            check_general(cluster).map_err(|_| violation())
        }
        _ => Err(violation()),
    }
}

pub fn check_cluster(cluster: &str, position: ClusterPosition) -> Result<()> {
    match position {
        ClusterPosition::General => check_general(cluster),
        ClusterPosition::WordFinal => check_final(cluster),
    }
}

/// Check every consonant cluster of a word.
pub fn validate_word(word: &str) -> Result<()> {
    let folded = fold_accents(word);
    let forms = classify(&folded)?;
    let last = forms.len().saturating_sub(1);
    for (i, form) in forms.iter().enumerate() {
        if let LetterForm::Consonant(c) = form {
            let position = if i == last {
                ClusterPosition::WordFinal
            } else {
                ClusterPosition::General
            };
            check_cluster(&c.text, position)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_stop_pairs() {
        assert!(check_final("kt").is_ok());
        assert!(check_final("tk").is_err());
    }

    #[test]
    fn test_general_rules() {
        assert!(check_general("kl").is_ok());
        assert!(check_general("hw").is_ok());
        assert!(check_general("wl").is_err());
        assert!(check_general("kd").is_err());
        assert!(check_general("lkstrp").is_err());
    }

    #[test]
    fn test_longer_final_clusters() {
        assert!(check_final("lkt").is_ok());
        assert!(check_final("ltk").is_err());
        assert!(check_final("bkt").is_err());
        assert!(check_final("rlkst").is_err());
    }

    #[test]
    fn test_validate_word() {
        assert!(validate_word("hwacäpoukliossahruö").is_ok());
        assert!(validate_word("alatk").is_err());
        assert!(validate_word("alakt").is_ok());
    }
}
