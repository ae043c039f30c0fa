//! Referential slots ↔ record, and referential generation.

use super::affix;
use super::surface::SurfaceBuilder;
use super::tokenizer::{ReferentialSlots, ReferentialTail};
use crate::error::{CodecError, Result};
use crate::grammar::{Case, Essence, ReferentList, Specification, VowelForm};
use crate::language::stress::{apply_stress, Stress, StressInfo};
use crate::types::{Referential, ReferentialShape};

/// Epenthetic vowel that lets a one-syllable referential carry stress.
pub(crate) const EPENTHETIC_VOWEL: char = 'ë';

const CZ_FORMS: [&str; 4] = ["x", "xt", "xp", "xx"];

fn case_of(vc: VowelForm, slot: &'static str) -> Result<Case> {
    Case::from_vowel(vc.with_glottal_stop(false), vc.has_glottal_stop, slot)
}

pub(crate) fn from_slots(slots: ReferentialSlots, stress: StressInfo, word: &str) -> Result<Referential> {
    let referents = ReferentList::parse(&slots.c1, "C1")?;
    let case = case_of(slots.vc1, "Vc1")?;
    let essence = match stress.stress {
        Stress::Ultimate => Essence::Rpv,
        Stress::Penultimate | Stress::Unmarked | Stress::Monosyllabic => Essence::Nrm,
        Stress::Antepenultimate | Stress::Zerosyllabic => {
            return Err(CodecError::InvalidStressPosition {
                word: word.to_string(),
                detail: "referentials take penultimate or ultimate stress".to_string(),
            })
        }
    };

    let shape = match slots.tail {
        ReferentialTail::Single => ReferentialShape::Single,
        ReferentialTail::Dual { vc2, c2 } => ReferentialShape::Dual {
            referents: ReferentList::parse(&c2, "C2")?,
            case: case_of(vc2, "Vc2")?,
        },
        ReferentialTail::Combination { cz, affixes, vc2 } => {
            let index = CZ_FORMS
                .iter()
                .position(|f| *f == cz)
                .ok_or_else(|| CodecError::consonant(cz.as_str(), "Cz"))?;
            let specification = Specification::from_index(index)
                .ok_or_else(|| CodecError::consonant(cz.as_str(), "Cz"))?;
            let affixes = affixes
                .iter()
                .map(|a| affix::decode(&a.cs, a.vx))
                .collect::<Result<Vec<_>>>()?;
            let case = match vc2 {
                Some(v) => case_of(v, "Vc2")?,
                None => Case::Thm,
            };
            ReferentialShape::Combination { specification, affixes, case }
        }
    };

    Ok(Referential { referents, case, essence, shape })
}

pub(crate) fn generate(r: &Referential) -> Result<String> {
    if r.referents.is_empty() {
        return Err(CodecError::combination("referential without referents"));
    }
    let mut b = SurfaceBuilder::new();
    b.consonant(r.referents.cluster()).vowel(r.case.vc());
    match &r.shape {
        ReferentialShape::Single => {}
        ReferentialShape::Dual { referents, case } => {
            if referents.is_empty() {
                return Err(CodecError::combination("dual referential without second referents"));
            }
            b.consonant("w").vowel(case.vc()).consonant(referents.cluster());
        }
        ReferentialShape::Combination { specification, affixes, case } => {
            b.consonant(CZ_FORMS[specification.index()]);
            for a in affixes {
                let (cs, vx) = affix::encode(a)?;
                b.vowel(vx).consonant(cs);
            }
            if *case != Case::Thm {
                b.vowel(case.vc());
            }
        }
    }

    let plain = b.render()?;
    match r.essence {
        Essence::Nrm => Ok(plain),
        Essence::Rpv => {
            let word = if b.syllables()? < 2 {
                format!("{EPENTHETIC_VOWEL}{plain}")
            } else {
                plain
            };
            apply_stress(&word, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Perspective, Referent, ReferentEffect, ReferentTarget};
    use crate::types::Affix;

    fn list(target: ReferentTarget) -> ReferentList {
        ReferentList::single(Referent::new(target, ReferentEffect::Neu))
    }

    #[test]
    fn test_single() {
        let mut r = Referential::new(list(ReferentTarget::M1));
        assert_eq!(generate(&r).unwrap(), "la");
        r.case = Case::Erg;
        assert_eq!(generate(&r).unwrap(), "lo");
        r.case = Case::Prn;
        assert_eq!(generate(&r).unwrap(), "la'a");
    }

    #[test]
    fn test_rpv_takes_epenthetic_vowel() {
        let mut r = Referential::new(list(ReferentTarget::M2));
        r.essence = Essence::Rpv;
        assert_eq!(generate(&r).unwrap(), "ësá");
        r.case = Case::Prn;
        assert_eq!(generate(&r).unwrap(), "sa'á");
    }

    #[test]
    fn test_dual() {
        let mut r = Referential::new(list(ReferentTarget::M1));
        r.shape = ReferentialShape::Dual {
            referents: ReferentList { perspective: Perspective::A, ..list(ReferentTarget::M2) },
            case: Case::Abs,
        };
        assert_eq!(generate(&r).unwrap(), "lawesw");
    }

    #[test]
    fn test_combination() {
        let mut r = Referential::new(list(ReferentTarget::M1));
        r.shape = ReferentialShape::Combination {
            specification: Specification::Cte,
            affixes: vec![Affix::standard(1, 7, "k")],
            case: Case::Thm,
        };
        assert_eq!(generate(&r).unwrap(), "laxtok");
    }

    #[test]
    fn test_empty_referents_rejected() {
        let r = Referential::new(ReferentList::default());
        assert!(matches!(generate(&r), Err(CodecError::InvalidCategoryCombination { .. })));
    }
}
