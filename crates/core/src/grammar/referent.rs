//! Personal referents and referent lists (the C1/C2 consonants of a
//! referential, referential roots, and referential affixes).

use serde::{Deserialize, Serialize};

use super::ca::Perspective;
use crate::error::{CodecError, Result};

category! {
    pub enum ReferentTarget {
        M1 => "1m",
        M2 => "2m",
        P2 => "2p",
        Ma => "ma",
        Pa => "pa",
        Mi => "mi",
        Pi => "pi",
        Mx => "Mx",
        Rdp => "Rdp",
    }
}

category! {
    pub enum ReferentEffect {
        Neu => "NEU",
        Ben => "BEN",
        Det => "DET",
    }
}

/// Consonants by target, in NEU/BEN/DET order.
#[rustfmt::skip]
const REFERENTS: [[&str; 3]; 9] = [
    ["l", "r", "ř"],
    ["s", "š", "ž"],
    ["n", "t", "d"],
    ["m", "p", "b"],
    ["ň", "k", "g"],
    ["z", "ţ", "ḑ"],
    ["ẓ", "č", "j"],
    ["c", "f", "v"],
    ["th", "ph", "kh"],
];

/// Perspective suffix of a referent list, indexed by perspective.
const PERSPECTIVE_SUFFIX: [&str; 4] = ["", "ļ", "ç", "w"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Referent {
    pub target: ReferentTarget,
    #[serde(default)]
    pub effect: ReferentEffect,
}

impl Referent {
    pub fn new(target: ReferentTarget, effect: ReferentEffect) -> Self {
        Referent { target, effect }
    }

    pub fn consonant(self) -> &'static str {
        REFERENTS[self.target.index()][self.effect.index()]
    }

    /// Longest referent spelling at the start of `text`.
    fn match_prefix(text: &str) -> Option<(Referent, usize)> {
        let mut best: Option<(Referent, usize)> = None;
        for (t, row) in REFERENTS.iter().enumerate() {
            for (e, form) in row.iter().enumerate() {
                if text.starts_with(form) && best.map_or(true, |(_, len)| form.len() > len) {
                    let referent = Referent {
                        target: ReferentTarget::ALL[t],
                        effect: ReferentEffect::ALL[e],
                    };
                    best = Some((referent, form.len()));
                }
            }
        }
        best
    }

    pub fn abbr(self) -> String {
        if self.effect.is_default() {
            self.target.abbr().to_string()
        } else {
            format!("{}.{}", self.target.abbr(), self.effect.abbr())
        }
    }
}

/// One or more referents sharing a perspective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferentList {
    pub referents: Vec<Referent>,
    #[serde(default)]
    pub perspective: Perspective,
}

impl ReferentList {
    pub fn single(referent: Referent) -> Self {
        ReferentList { referents: vec![referent], perspective: Perspective::M }
    }

    pub fn is_empty(&self) -> bool {
        self.referents.is_empty()
    }

    /// The consonant cluster spelling of the list.
    pub fn cluster(&self) -> String {
        let mut s: String = self.referents.iter().map(|r| r.consonant()).collect();
        s.push_str(PERSPECTIVE_SUFFIX[self.perspective.index()]);
        s
    }

    /// Parse a cluster greedily, longest referent first, with an optional
    /// trailing perspective suffix.
    pub fn parse(text: &str, slot: &'static str) -> Result<Self> {
        let mut referents = Vec::new();
        let mut rest = text;
        while let Some((referent, len)) = Referent::match_prefix(rest) {
            referents.push(referent);
            rest = &rest[len..];
        }
        let perspective = match PERSPECTIVE_SUFFIX.iter().skip(1).position(|s| *s == rest) {
            Some(i) => Perspective::ALL[i + 1],
            None if rest.is_empty() => Perspective::M,
            None => return Err(CodecError::consonant(text, slot)),
        };
        if referents.is_empty() {
            return Err(CodecError::consonant(text, slot));
        }
        Ok(ReferentList { referents, perspective })
    }

    pub fn abbr(&self) -> String {
        let mut s = self
            .referents
            .iter()
            .map(|r| r.abbr())
            .collect::<Vec<_>>()
            .join("+");
        if !self.perspective.is_default() {
            s.push('/');
            s.push_str(self.perspective.abbr());
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_referent_spellings_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for row in REFERENTS {
            for form in row {
                assert!(seen.insert(form), "duplicate referent {form}");
            }
        }
        assert_eq!(seen.len(), 27);
    }

    #[test]
    fn test_parse_prefers_longest_match() {
        let list = ReferentList::parse("th", "C1").unwrap();
        assert_eq!(list.referents, vec![Referent::new(ReferentTarget::Rdp, ReferentEffect::Neu)]);

        let list = ReferentList::parse("tl", "C1").unwrap();
        assert_eq!(list.referents.len(), 2);
        assert_eq!(list.referents[0].target, ReferentTarget::P2);
        assert_eq!(list.referents[1].target, ReferentTarget::M1);
    }

    #[test]
    fn test_perspective_suffix() {
        let list = ReferentList::parse("lç", "C1").unwrap();
        assert_eq!(list.perspective, Perspective::N);
        assert_eq!(list.cluster(), "lç");
        assert_eq!(list.abbr(), "1m/N");
    }

    #[test]
    fn test_parse_rejects_leftovers() {
        assert!(ReferentList::parse("lx", "C1").is_err());
        assert!(ReferentList::parse("w", "C1").is_err());
        assert!(ReferentList::parse("", "C1").is_err());
    }

    #[test]
    fn test_cluster_roundtrip() {
        let list = ReferentList {
            referents: vec![
                Referent::new(ReferentTarget::Ma, ReferentEffect::Det),
                Referent::new(ReferentTarget::Rdp, ReferentEffect::Ben),
            ],
            perspective: Perspective::A,
        };
        assert_eq!(list.cluster(), "bphw");
        assert_eq!(ReferentList::parse("bphw", "C1").unwrap(), list);
    }
}
