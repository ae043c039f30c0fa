use serde::{Deserialize, Serialize};

use crate::grammar::{
    Ca, Case, CaseScope, Concatenation, Context, Essence, FormativeType, Function,
    IllocutionValidation, Mood, Perspective, Referent, ReferentList, Specification, Stem,
    Version, Vn,
};

/// Slot III of a formative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Root {
    /// An ordinary consonant stem.
    Consonant(String),
    /// An affix used as a root; `degree` comes from Vr.
    Affix { cs: String, degree: u8 },
    Numeral(u32),
    Referents(ReferentList),
}

/// A slot V or slot VII affix. The variant is resolved from the Vx and Cs
/// forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affix {
    Standard { affix_type: u8, degree: u8, cs: String },
    /// A stacked Ca complex.
    Ca(Ca),
    /// A single referent with an optional perspective, in a case.
    Referential {
        referent: Referent,
        #[serde(default)]
        perspective: Perspective,
        case: Case,
    },
}

impl Affix {
    pub fn standard(affix_type: u8, degree: u8, cs: impl Into<String>) -> Self {
        Affix::Standard { affix_type, degree, cs: cs.into() }
    }
}

/// Slots VIII and IX plus the relation shown by stress. Exactly one
/// interpretation exists per formative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// UNF/C: case-scope in Cn, case in Vc.
    Nominal {
        #[serde(default)]
        case_scope: CaseScope,
        #[serde(default)]
        case: Case,
    },
    /// UNF/K: mood in Cn, illocution and validation in Vk.
    UnframedVerbal {
        #[serde(default)]
        mood: Mood,
        #[serde(default)]
        illocution_validation: IllocutionValidation,
    },
    /// FRM: mood in Cn, case in Vc.
    FramedVerbal {
        #[serde(default)]
        mood: Mood,
        #[serde(default)]
        case: Case,
    },
    /// A concatenated formative, marked by Cc.
    Concatenated {
        concatenation: Concatenation,
        #[serde(default)]
        case_scope: CaseScope,
        #[serde(default)]
        case: Case,
    },
}

impl Default for Relation {
    fn default() -> Self {
        Relation::Nominal { case_scope: CaseScope::Ccn, case: Case::Thm }
    }
}

impl Relation {
    /// Stress-marked type; `None` for concatenated formatives.
    pub fn formative_type(&self) -> Option<FormativeType> {
        match self {
            Relation::Nominal { .. } => Some(FormativeType::Nominal),
            Relation::UnframedVerbal { .. } => Some(FormativeType::Verbal),
            Relation::FramedVerbal { .. } => Some(FormativeType::Framed),
            Relation::Concatenated { .. } => None,
        }
    }

    pub fn concatenation(&self) -> Option<Concatenation> {
        match self {
            Relation::Concatenated { concatenation, .. } => Some(*concatenation),
            _ => None,
        }
    }

    /// Index of the mood or case-scope carried by Cn.
    pub fn cn_index(&self) -> usize {
        match self {
            Relation::Nominal { case_scope, .. } | Relation::Concatenated { case_scope, .. } => {
                case_scope.index()
            }
            Relation::UnframedVerbal { mood, .. } | Relation::FramedVerbal { mood, .. } => {
                mood.index()
            }
        }
    }

    pub fn case(&self) -> Option<Case> {
        match self {
            Relation::Nominal { case, .. }
            | Relation::FramedVerbal { case, .. }
            | Relation::Concatenated { case, .. } => Some(*case),
            Relation::UnframedVerbal { .. } => None,
        }
    }
}

/// A content word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formative {
    pub root: Root,
    #[serde(default)]
    pub stem: Stem,
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub function: Function,
    #[serde(default)]
    pub specification: Specification,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub slot_v_affixes: Vec<Affix>,
    #[serde(default)]
    pub ca: Ca,
    #[serde(default)]
    pub slot_vii_affixes: Vec<Affix>,
    #[serde(default)]
    pub vn: Vn,
    #[serde(default)]
    pub relation: Relation,
}

impl Formative {
    /// A formative with every category at its default.
    pub fn new(root: Root) -> Self {
        Formative {
            root,
            stem: Stem::default(),
            version: Version::default(),
            function: Function::default(),
            specification: Specification::default(),
            context: Context::default(),
            slot_v_affixes: Vec::new(),
            ca: Ca::default(),
            slot_vii_affixes: Vec::new(),
            vn: Vn::default(),
            relation: Relation::default(),
        }
    }

    pub fn formative_type(&self) -> Option<FormativeType> {
        self.relation.formative_type()
    }
}

/// The part of a referential after its first referent list and case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialShape {
    /// `C1 Vc1`
    #[default]
    Single,
    /// `C1 Vc1 w Vc2 C2`
    Dual { referents: ReferentList, case: Case },
    /// `C1 Vc1 Cz (Vx Cs)* Vc2`
    Combination {
        #[serde(default)]
        specification: Specification,
        #[serde(default)]
        affixes: Vec<Affix>,
        #[serde(default)]
        case: Case,
    },
}

/// A personal-reference word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Referential {
    pub referents: ReferentList,
    #[serde(default)]
    pub case: Case,
    #[serde(default)]
    pub essence: Essence,
    #[serde(default)]
    pub shape: ReferentialShape,
}

impl Referential {
    pub fn new(referents: ReferentList) -> Self {
        Referential {
            referents,
            case: Case::default(),
            essence: Essence::default(),
            shape: ReferentialShape::Single,
        }
    }
}

/// A parsed or to-be-generated word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Word {
    Formative(Formative),
    Referential(Referential),
}

impl From<Formative> for Word {
    fn from(f: Formative) -> Self {
        Word::Formative(f)
    }
}

impl From<Referential> for Word {
    fn from(r: Referential) -> Self {
        Word::Referential(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Configuration, ReferentEffect, ReferentTarget};

    #[test]
    fn test_formative_defaults_from_json() {
        let json = r#"{"root": {"Consonant": "c"}}"#;
        let f: Formative = serde_json::from_str(json).unwrap();
        assert_eq!(f, Formative::new(Root::Consonant("c".into())));
        assert_eq!(f.formative_type(), Some(FormativeType::Nominal));
    }

    #[test]
    fn test_formative_json_uses_abbreviations() {
        let mut f = Formative::new(Root::Consonant("c".into()));
        f.specification = Specification::Cte;
        f.ca.configuration = Configuration::Dpx;
        f.relation = Relation::Concatenated {
            concatenation: Concatenation::Two,
            case_scope: CaseScope::Ccs,
            case: Case::Tsp,
        };
        let json = serde_json::to_string(&Word::Formative(f.clone())).unwrap();
        assert!(json.contains("\"CTE\""));
        assert!(json.contains("\"DPX\""));
        assert!(json.contains("\"TSP\""));
        let back: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Word::Formative(f));
    }

    #[test]
    fn test_referential_json() {
        let json = r#"{"referents": {"referents": [{"target": "2m"}]}, "case": "ERG"}"#;
        let r: Referential = serde_json::from_str(json).unwrap();
        assert_eq!(
            r.referents.referents[0],
            Referent::new(ReferentTarget::M2, ReferentEffect::Neu)
        );
        assert_eq!(r.case, Case::Erg);
        assert_eq!(r.shape, ReferentialShape::Single);
    }

    #[test]
    fn test_relation_accessors() {
        let r = Relation::UnframedVerbal {
            mood: Mood::Hyp,
            illocution_validation: IllocutionValidation::default(),
        };
        assert_eq!(r.cn_index(), 5);
        assert_eq!(r.case(), None);
        assert_eq!(r.concatenation(), None);
    }
}
