//! Closed categories of slots II, IV, VIII and IX, with their vowel and
//! consonant tables.

use serde::{Deserialize, Serialize};

use super::ca::CaShortcut;
use super::vowel::VowelForm;
use crate::error::{CodecError, Result};

category! {
    pub enum Stem {
        S1 => "S1",
        S2 => "S2",
        S3 => "S3",
        S0 => "S0",
    }
}

category! {
    pub enum Version {
        Prc => "PRC",
        Cpt => "CPT",
    }
}

category! {
    pub enum Function {
        Sta => "STA",
        Dyn => "DYN",
    }
}

category! {
    pub enum Specification {
        Bsc => "BSC",
        Cte => "CTE",
        Csv => "CSV",
        Obj => "OBJ",
    }
}

category! {
    pub enum Context {
        Exs => "EXS",
        Fnc => "FNC",
        Rps => "RPS",
        Amg => "AMG",
    }
}

category! {
    /// The formative's relation, shown by stress.
    pub enum FormativeType {
        Nominal => "UNF/C",
        Verbal => "UNF/K",
        Framed => "FRM",
    }
}

category! {
    pub enum Concatenation {
        One => "1",
        Two => "2",
    }
}

category! {
    pub enum Valence {
        Mno => "MNO",
        Prl => "PRL",
        Cro => "CRO",
        Rcp => "RCP",
        Cpl => "CPL",
        Dup => "DUP",
        Dem => "DEM",
        Cng => "CNG",
        Pti => "PTI",
    }
}

category! {
    pub enum Phase {
        Pun => "PUN",
        Itr => "ITR",
        Rep => "REP",
        Itm => "ITM",
        Rct => "RCT",
        Fre => "FRE",
        Frg => "FRG",
        Vac => "VAC",
        Flc => "FLC",
    }
}

category! {
    pub enum Effect {
        Ben1 => "1:BEN",
        Ben2 => "2:BEN",
        Ben3 => "3:BEN",
        BenSlf => "SLF:BEN",
        Unk => "UNK",
        DetSlf => "SLF:DET",
        Det3 => "3:DET",
        Det2 => "2:DET",
        Det1 => "1:DET",
    }
}

category! {
    pub enum Level {
        Min => "MIN",
        Sbe => "SBE",
        Ifr => "IFR",
        Dfc => "DFC",
        Equ => "EQU",
        Sur => "SUR",
        Spl => "SPL",
        Spq => "SPQ",
        Max => "MAX",
    }
}

category! {
    pub enum Aspect {
        Rtr => "RTR", Prs => "PRS", Hab => "HAB", Prg => "PRG", Imm => "IMM",
        Pcs => "PCS", Reg => "REG", Smm => "SMM", Atp => "ATP",
        Rsm => "RSM", Css => "CSS", Pau => "PAU", Rgr => "RGR", Pcl => "PCL",
        Cnt => "CNT", Ics => "ICS", Exp => "EXP", Irp => "IRP",
        Pmp => "PMP", Clm => "CLM", Dlt => "DLT", Tmp => "TMP", Xpd => "XPD",
        Lim => "LIM", Epd => "EPD", Ptc => "PTC", Ppr => "PPR",
        Dcl => "DCL", Ccl => "CCL", Cul => "CUL", Imd => "IMD", Trd => "TRD",
        Tns => "TNS", Itc => "ITC", Mtv => "MTV", Sqn => "SQN",
    }
}

category! {
    pub enum Mood {
        Fac => "FAC",
        Sub => "SUB",
        Asm => "ASM",
        Spc => "SPC",
        Cou => "COU",
        Hyp => "HYP",
    }
}

category! {
    pub enum CaseScope {
        Ccn => "CCN",
        Cca => "CCA",
        Ccs => "CCS",
        Ccq => "CCQ",
        Ccp => "CCP",
        Ccv => "CCV",
    }
}

category! {
    pub enum Validation {
        Obs => "OBS",
        Rec => "REC",
        Pup => "PUP",
        Rpr => "RPR",
        Usp => "USP",
        Ima => "IMA",
        Cvn => "CVN",
        Itu => "ITU",
        Inf => "INF",
    }
}

category! {
    /// Illocutions other than the assertive, which pairs with a validation.
    pub enum Illocution {
        Dir => "DIR",
        Dec => "DEC",
        Irg => "IRG",
        Ver => "VER",
        Adm => "ADM",
        Pot => "POT",
        Hor => "HOR",
        Cnj => "CNJ",
    }
}

// ─── Slot II: Vv ─────────────────────────────────────────────────

/// Vv degrees 1–9 (degree 5 is the special-root marker).
const VV_STEMS: [(Stem, Version); 8] = [
    (Stem::S1, Version::Prc),
    (Stem::S1, Version::Cpt),
    (Stem::S2, Version::Prc),
    (Stem::S2, Version::Cpt),
    (Stem::S0, Version::Cpt),
    (Stem::S0, Version::Prc),
    (Stem::S3, Version::Cpt),
    (Stem::S3, Version::Prc),
];

fn degree_to_octet(degree: u8) -> Option<usize> {
    match degree {
        1..=4 => Some(degree as usize - 1),
        6..=9 => Some(degree as usize - 2),
        _ => None,
    }
}

fn octet_to_degree(index: usize) -> u8 {
    if index < 4 {
        index as u8 + 1
    } else {
        index as u8 + 2
    }
}

/// Vv degree for a stem and version.
pub fn vv_degree(stem: Stem, version: Version) -> u8 {
    let index = VV_STEMS
        .iter()
        .position(|&p| p == (stem, version))
        .unwrap_or_default();
    octet_to_degree(index)
}

pub fn vv_stem_version(degree: u8) -> Option<(Stem, Version)> {
    degree_to_octet(degree).map(|i| VV_STEMS[i])
}

/// Kind of root announced by a degree-5 Vv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialRoot {
    Affix,
    Referential,
}

/// Degree-5 Vv: series 1/2 mark an affix root, series 3/4 a referential root;
/// odd series are PRC, even series CPT.
pub fn special_vv(kind: SpecialRoot, version: Version) -> VowelForm {
    let base = match kind {
        SpecialRoot::Affix => 1,
        SpecialRoot::Referential => 3,
    };
    VowelForm::new(base + version.index() as u8, 5)
}

pub fn parse_special_vv(vv: VowelForm) -> Option<(SpecialRoot, Version)> {
    if vv.degree != 5 {
        return None;
    }
    let kind = if vv.sequence <= 2 { SpecialRoot::Affix } else { SpecialRoot::Referential };
    let version = if vv.sequence % 2 == 1 { Version::Prc } else { Version::Cpt };
    Some((kind, version))
}

// ─── Slot I: Cc ──────────────────────────────────────────────────

/// Slot I consonant for a concatenation marker and/or Ca shortcut.
pub fn cc_form(
    concatenation: Option<Concatenation>,
    shortcut: Option<CaShortcut>,
) -> Option<&'static str> {
    match (concatenation, shortcut) {
        (None, None) => None,
        (Some(Concatenation::One), None) => Some("h"),
        (Some(Concatenation::Two), None) => Some("hw"),
        (None, Some(CaShortcut::W)) => Some("w"),
        (None, Some(CaShortcut::Y)) => Some("y"),
        (Some(Concatenation::One), Some(CaShortcut::W)) => Some("hl"),
        (Some(Concatenation::One), Some(CaShortcut::Y)) => Some("hr"),
        (Some(Concatenation::Two), Some(CaShortcut::W)) => Some("hm"),
        (Some(Concatenation::Two), Some(CaShortcut::Y)) => Some("hn"),
    }
}

pub fn parse_cc(text: &str) -> Option<(Option<Concatenation>, Option<CaShortcut>)> {
    let parsed = match text {
        "h" => (Some(Concatenation::One), None),
        "hw" => (Some(Concatenation::Two), None),
        "w" => (None, Some(CaShortcut::W)),
        "y" => (None, Some(CaShortcut::Y)),
        "hl" => (Some(Concatenation::One), Some(CaShortcut::W)),
        "hr" => (Some(Concatenation::One), Some(CaShortcut::Y)),
        "hm" => (Some(Concatenation::Two), Some(CaShortcut::W)),
        "hn" => (Some(Concatenation::Two), Some(CaShortcut::Y)),
        _ => return None,
    };
    Some(parsed)
}

// ─── Slot IV: Vr ─────────────────────────────────────────────────

/// Vr for function, specification and context.
pub fn vr_form(function: Function, specification: Specification, context: Context) -> VowelForm {
    let degree = match function {
        Function::Sta => specification.index() as u8 + 1,
        Function::Dyn => 9 - specification.index() as u8,
    };
    VowelForm::new(context.index() as u8 + 1, degree)
}

pub fn parse_vr(vr: VowelForm) -> Result<(Function, Specification, Context)> {
    let context = Context::from_index(vr.sequence as usize - 1)
        .ok_or_else(|| CodecError::vowel(vr.to_string(), "Vr"))?;
    let (function, spec_index) = match vr.degree {
        1..=4 => (Function::Sta, vr.degree - 1),
        6..=9 => (Function::Dyn, 9 - vr.degree),
        _ => return Err(CodecError::vowel(vr.to_string(), "Vr")),
    };
    let specification = Specification::from_index(spec_index as usize)
        .ok_or_else(|| CodecError::vowel(vr.to_string(), "Vr"))?;
    Ok((function, specification, context))
}

// ─── Slot VIII: Vn + Cn ──────────────────────────────────────────

/// Slot VIII vowel: valence, phase, effect, level, or (with an aspectual Cn)
/// aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vn {
    Valence(Valence),
    Phase(Phase),
    Effect(Effect),
    Level(Level),
    Aspect(Aspect),
}

impl Default for Vn {
    fn default() -> Self {
        Vn::Valence(Valence::Mno)
    }
}

impl Vn {
    pub fn is_aspectual(self) -> bool {
        matches!(self, Vn::Aspect(_))
    }

    pub fn is_default(self) -> bool {
        self == Vn::default()
    }

    pub fn abbr(self) -> &'static str {
        match self {
            Vn::Valence(v) => v.abbr(),
            Vn::Phase(v) => v.abbr(),
            Vn::Effect(v) => v.abbr(),
            Vn::Level(v) => v.abbr(),
            Vn::Aspect(v) => v.abbr(),
        }
    }

    pub fn to_vowel(self) -> VowelForm {
        let (sequence, index) = match self {
            Vn::Valence(v) => (1, v.index()),
            Vn::Phase(v) => (2, v.index()),
            Vn::Effect(v) => (3, v.index()),
            Vn::Level(v) => (4, v.index()),
            Vn::Aspect(a) => (a.index() / 9 + 1, a.index() % 9),
        };
        VowelForm::new(sequence as u8, index as u8 + 1)
    }

    pub fn from_vowel(vn: VowelForm, aspectual: bool) -> Result<Self> {
        if vn.degree == 0 || vn.has_glottal_stop {
            return Err(CodecError::vowel(vn.to_string(), "Vn"));
        }
        let index = vn.degree as usize - 1;
        let parsed = if aspectual {
            Aspect::from_index((vn.sequence as usize - 1) * 9 + index).map(Vn::Aspect)
        } else {
            match vn.sequence {
                1 => Valence::from_index(index).map(Vn::Valence),
                2 => Phase::from_index(index).map(Vn::Phase),
                3 => Effect::from_index(index).map(Vn::Effect),
                4 => Level::from_index(index).map(Vn::Level),
                _ => None,
            }
        };
        parsed.ok_or_else(|| CodecError::vowel(vn.to_string(), "Vn"))
    }
}

/// Cn forms indexed by mood/case-scope: non-aspectual and aspectual.
const CN_FORMS: [(&str, &str); 6] = [
    ("h", "w"),
    ("hl", "hw"),
    ("hr", "hrw"),
    ("hm", "hmw"),
    ("hn", "hnw"),
    ("hň", "hňw"),
];

/// `index` is a `Mood` or `CaseScope` index; both have one row per variant.
pub fn cn_form(index: usize, aspectual: bool) -> &'static str {
    let (plain, aspect) = CN_FORMS[index];
    if aspectual {
        aspect
    } else {
        plain
    }
}

/// Returns the mood/case-scope index and whether the Cn is aspectual.
pub fn parse_cn(text: &str) -> Option<(usize, bool)> {
    CN_FORMS.iter().enumerate().find_map(|(i, (plain, aspect))| {
        if text == *plain {
            Some((i, false))
        } else if text == *aspect {
            Some((i, true))
        } else {
            None
        }
    })
}

// ─── Slot IX: Vk ─────────────────────────────────────────────────

/// Illocution and validation of an unframed verbal formative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllocutionValidation {
    Assertive(Validation),
    Performative(Illocution),
}

impl Default for IllocutionValidation {
    fn default() -> Self {
        IllocutionValidation::Assertive(Validation::Obs)
    }
}

impl IllocutionValidation {
    pub fn is_default(self) -> bool {
        self == Self::default()
    }

    pub fn abbr(self) -> String {
        match self {
            IllocutionValidation::Assertive(v) => format!("ASR/{}", v.abbr()),
            IllocutionValidation::Performative(i) => i.abbr().to_string(),
        }
    }

    pub fn to_vowel(self) -> VowelForm {
        match self {
            IllocutionValidation::Assertive(v) => VowelForm::new(1, v.index() as u8 + 1),
            IllocutionValidation::Performative(i) => VowelForm::new(2, octet_to_degree(i.index())),
        }
    }

    pub fn from_vowel(vk: VowelForm) -> Result<Self> {
        let parsed = match (vk.sequence, vk.has_glottal_stop) {
            (1, false) if vk.degree > 0 => {
                Validation::from_index(vk.degree as usize - 1).map(IllocutionValidation::Assertive)
            }
            (2, false) => degree_to_octet(vk.degree)
                .and_then(Illocution::from_index)
                .map(IllocutionValidation::Performative),
            _ => None,
        };
        parsed.ok_or_else(|| CodecError::vowel(vk.to_string(), "Vk"))
    }
}

// ─── Slot III: numeral roots ─────────────────────────────────────

const NUMERAL_ROOTS: [(u32, &str); 13] = [
    (0, "vr"),
    (1, "ll"),
    (2, "ks"),
    (3, "z"),
    (4, "pš"),
    (5, "st"),
    (6, "cp"),
    (7, "ns"),
    (8, "čk"),
    (9, "lẓ"),
    (10, "j"),
    (100, "gz"),
    (10000, "pc"),
];

pub fn numeral_root(value: u32) -> Option<&'static str> {
    NUMERAL_ROOTS.iter().find(|(n, _)| *n == value).map(|(_, cr)| *cr)
}

pub fn parse_numeral_root(cr: &str) -> Option<u32> {
    NUMERAL_ROOTS.iter().find(|(_, form)| *form == cr).map(|(n, _)| *n)
}

pub(crate) fn skip_five_degree(index: usize) -> u8 {
    octet_to_degree(index)
}

pub(crate) fn skip_five_index(degree: u8) -> Option<usize> {
    degree_to_octet(degree)
}
