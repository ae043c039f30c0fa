//! Abbreviation glosses of parsed records.

use crate::grammar::{Ca, Case};
use crate::types::{Affix, Formative, Referential, ReferentialShape, Relation, Root, Word};

impl Affix {
    pub fn gloss(&self) -> String {
        match self {
            Affix::Standard { affix_type, degree, cs } => format!("{cs}/{affix_type}.{degree}"),
            Affix::Ca(ca) => format!("[{}]", ca_gloss(ca)),
            Affix::Referential { referent, perspective, case } => {
                let mut s = referent.abbr();
                if !perspective.is_default() {
                    s.push('/');
                    s.push_str(perspective.abbr());
                }
                format!("{s}:{case}")
            }
        }
    }
}

fn ca_gloss(ca: &Ca) -> String {
    if ca.is_default() {
        "CSL".to_string()
    } else {
        ca.abbr()
    }
}

fn root_gloss(root: &Root) -> String {
    match root {
        Root::Consonant(cr) => cr.clone(),
        Root::Affix { cs, degree } => format!("{cs}/{degree}"),
        Root::Numeral(n) => n.to_string(),
        Root::Referents(list) => list.abbr(),
    }
}

fn push_case(parts: &mut Vec<String>, case: Case) {
    if !case.is_default() {
        parts.push(case.abbr().to_string());
    }
}

impl Formative {
    pub fn gloss(&self) -> String {
        let mut parts = Vec::new();
        if let Some(concatenation) = self.relation.concatenation() {
            parts.push(format!("T{concatenation}"));
        }
        parts.push(root_gloss(&self.root));
        for (default, abbr) in [
            (self.stem.is_default(), self.stem.abbr()),
            (self.version.is_default(), self.version.abbr()),
            (self.function.is_default(), self.function.abbr()),
            (self.specification.is_default(), self.specification.abbr()),
            (self.context.is_default(), self.context.abbr()),
        ] {
            if !default {
                parts.push(abbr.to_string());
            }
        }
        parts.extend(self.slot_v_affixes.iter().map(Affix::gloss));
        if !self.ca.is_default() {
            parts.push(self.ca.abbr());
        }
        parts.extend(self.slot_vii_affixes.iter().map(Affix::gloss));
        if !self.vn.is_default() {
            parts.push(self.vn.abbr().to_string());
        }

        match self.relation {
            Relation::Nominal { case_scope, case } | Relation::Concatenated { case_scope, case, .. } => {
                if !case_scope.is_default() {
                    parts.push(case_scope.abbr().to_string());
                }
                push_case(&mut parts, case);
            }
            Relation::UnframedVerbal { mood, illocution_validation } => {
                parts.push("UNF/K".to_string());
                if !mood.is_default() {
                    parts.push(mood.abbr().to_string());
                }
                if !illocution_validation.is_default() {
                    parts.push(illocution_validation.abbr());
                }
            }
            Relation::FramedVerbal { mood, case } => {
                parts.push("FRM".to_string());
                if !mood.is_default() {
                    parts.push(mood.abbr().to_string());
                }
                push_case(&mut parts, case);
            }
        }
        parts.join("-")
    }
}

impl Referential {
    pub fn gloss(&self) -> String {
        let mut parts = vec![self.referents.abbr()];
        push_case(&mut parts, self.case);
        match &self.shape {
            ReferentialShape::Single => {}
            ReferentialShape::Dual { referents, case } => {
                parts.push(referents.abbr());
                push_case(&mut parts, *case);
            }
            ReferentialShape::Combination { specification, affixes, case } => {
                if !specification.is_default() {
                    parts.push(specification.abbr().to_string());
                }
                parts.extend(affixes.iter().map(Affix::gloss));
                push_case(&mut parts, *case);
            }
        }
        if !self.essence.is_default() {
            parts.push(self.essence.abbr().to_string());
        }
        parts.join("-")
    }
}

impl Word {
    /// Hyphen-separated abbreviations of every non-default category.
    pub fn gloss(&self) -> String {
        match self {
            Word::Formative(f) => f.gloss(),
            Word::Referential(r) => r.gloss(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{
        CaseScope, Concatenation, Configuration, Essence, IllocutionValidation, Illocution,
        Perspective, Referent, ReferentEffect, ReferentList, ReferentTarget, Specification,
    };

    #[test]
    fn test_default_formative_gloss_is_root() {
        let f = Formative::new(Root::Consonant("k".into()));
        assert_eq!(Word::from(f).gloss(), "k");
    }

    #[test]
    fn test_concatenated_gloss() {
        let mut f = Formative::new(Root::Consonant("c".into()));
        f.specification = Specification::Cte;
        f.slot_v_affixes = vec![Affix::standard(2, 6, "p"), Affix::standard(3, 3, "kl")];
        f.ca.configuration = Configuration::Dpx;
        f.relation = Relation::Concatenated {
            concatenation: Concatenation::Two,
            case_scope: CaseScope::Ccs,
            case: Case::Tsp,
        };
        assert_eq!(f.gloss(), "T2-c-CTE-p/2.6-kl/3.3-DPX-CCS-TSP");
    }

    #[test]
    fn test_verbal_gloss() {
        let mut f = Formative::new(Root::Numeral(3));
        f.relation = Relation::UnframedVerbal {
            mood: Default::default(),
            illocution_validation: IllocutionValidation::Performative(Illocution::Dir),
        };
        assert_eq!(f.gloss(), "3-UNF/K-DIR");
    }

    #[test]
    fn test_affix_glosses() {
        let ca = Affix::Ca(Ca { perspective: Perspective::G, ..Ca::default() });
        assert_eq!(ca.gloss(), "[G]");
        let r = Affix::Referential {
            referent: Referent::new(ReferentTarget::M1, ReferentEffect::Ben),
            perspective: Perspective::M,
            case: Case::Erg,
        };
        assert_eq!(r.gloss(), "1m.BEN:ERG");
    }

    #[test]
    fn test_referential_gloss() {
        let mut r = Referential::new(ReferentList::single(Referent::new(
            ReferentTarget::M2,
            ReferentEffect::Neu,
        )));
        r.case = Case::Erg;
        r.essence = Essence::Rpv;
        assert_eq!(r.gloss(), "2m-ERG-RPV");
    }
}
