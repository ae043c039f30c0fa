//! Slot VI: the Ca complex and its 864-entry consonant table.
//!
//! A Ca form is the concatenation of four sub-forms drawn from disjoint
//! letter sets (affiliation, configuration, extension, perspective+essence),
//! so the cross product is uniquely decodable. The geminated spelling doubles
//! the first letter.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

category! {
    pub enum Affiliation {
        Csl => "CSL",
        Aso => "ASO",
        Coa => "COA",
        Var => "VAR",
    }
}

category! {
    pub enum Configuration {
        Uni => "UNI",
        Dpx => "DPX",
        Dct => "DCT",
        Agg => "AGG",
        Seg => "SEG",
        Cpn => "CPN",
        Coh => "COH",
        Cst => "CST",
        Mlt => "MLT",
    }
}

category! {
    pub enum Extension {
        Del => "DEL",
        Prx => "PRX",
        Icp => "ICP",
    }
}

category! {
    pub enum Perspective {
        M => "M",
        G => "G",
        N => "N",
        A => "A",
    }
}

category! {
    pub enum Essence {
        Nrm => "NRM",
        Rpv => "RPV",
    }
}

const AFFILIATION: [&str; 4] = ["", "r", "ř", "ļ"];
const CONFIGURATION: [&str; 9] = ["", "s", "š", "z", "ž", "c", "č", "ẓ", "j"];
const EXTENSION: [&str; 3] = ["", "t", "k"];
/// Indexed by essence, then perspective.
const PERSPECTIVE_ESSENCE: [[&str; 4]; 2] = [["", "p", "m", "n"], ["f", "b", "ň", "ţ"]];

/// Surface form of the all-default Ca when it stands alone in slot VI.
pub const DEFAULT_CA_SURFACE: &str = "l";

/// The five categories of slot VI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Ca {
    pub affiliation: Affiliation,
    pub configuration: Configuration,
    pub extension: Extension,
    pub perspective: Perspective,
    pub essence: Essence,
}

/// The w/y Ca shortcuts of slot I.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaShortcut {
    W,
    Y,
}

pub(crate) struct CaTable {
    base: HashMap<Ca, String>,
    by_base: HashMap<String, Ca>,
    by_geminated: HashMap<String, Ca>,
}

static CA_TABLE: OnceLock<CaTable> = OnceLock::new();

pub(crate) fn table() -> &'static CaTable {
    CA_TABLE.get_or_init(|| {
        let mut base = HashMap::new();
        let mut by_base = HashMap::new();
        let mut by_geminated = HashMap::new();
        for &affiliation in Affiliation::ALL {
            for &configuration in Configuration::ALL {
                for &extension in Extension::ALL {
                    for &perspective in Perspective::ALL {
                        for &essence in Essence::ALL {
                            let ca = Ca { affiliation, configuration, extension, perspective, essence };
                            let form = build_form(&ca);
                            let surface = surface_of(&form);
                            by_geminated.insert(geminate(&surface), ca);
                            by_base.insert(surface, ca);
                            base.insert(ca, form);
                        }
                    }
                }
            }
        }
        log::debug!("built Ca table with {} entries", base.len());
        CaTable { base, by_base, by_geminated }
    })
}

fn build_form(ca: &Ca) -> String {
    let mut s = String::new();
    s.push_str(AFFILIATION[ca.affiliation.index()]);
    s.push_str(CONFIGURATION[ca.configuration.index()]);
    s.push_str(EXTENSION[ca.extension.index()]);
    s.push_str(PERSPECTIVE_ESSENCE[ca.essence.index()][ca.perspective.index()]);
    s
}

fn surface_of(form: &str) -> String {
    if form.is_empty() {
        DEFAULT_CA_SURFACE.to_string()
    } else {
        form.to_string()
    }
}

/// Double the first letter of a consonant form.
pub fn geminate(form: &str) -> String {
    let mut chars = form.chars();
    match chars.next() {
        Some(first) => {
            let mut s = String::with_capacity(form.len() + first.len_utf8());
            s.push(first);
            s.push(first);
            s.extend(chars);
            s
        }
        None => String::new(),
    }
}

impl Ca {
    pub fn is_default(&self) -> bool {
        *self == Ca::default()
    }

    /// Table form; the all-default complex maps to the empty string.
    pub fn base_form(&self) -> &'static str {
        table().base.get(self).map(String::as_str).unwrap_or_default()
    }

    /// Spelling in slot VI, geminated when slot V is filled.
    pub fn surface(&self, geminated: bool) -> String {
        let surface = surface_of(self.base_form());
        if geminated {
            geminate(&surface)
        } else {
            surface
        }
    }

    /// Look up a slot-VI consonant, plain or geminated.
    pub fn parse(text: &str) -> Result<Ca> {
        let t = table();
        t.by_base
            .get(text)
            .or_else(|| t.by_geminated.get(text))
            .copied()
            .ok_or_else(|| CodecError::UnknownCaForm { form: text.to_string() })
    }

    /// Whether `text` is a geminated table form.
    pub fn is_geminated_form(text: &str) -> bool {
        table().by_geminated.contains_key(text)
    }

    /// The shortcut and Vv series that express this Ca, if any.
    pub fn shortcut(&self) -> Option<(CaShortcut, u8)> {
        SHORTCUTS
            .iter()
            .find(|(_, _, ca)| ca == self)
            .map(|&(shortcut, series, _)| (shortcut, series))
    }

    pub fn from_shortcut(shortcut: CaShortcut, series: u8) -> Option<Ca> {
        SHORTCUTS
            .iter()
            .find(|(s, n, _)| *s == shortcut && *n == series)
            .map(|&(_, _, ca)| ca)
    }

    /// Abbreviations of the non-default values, e.g. `DPX/G`.
    pub fn abbr(&self) -> String {
        let parts: Vec<&str> = [
            (!self.affiliation.is_default()).then(|| self.affiliation.abbr()),
            (!self.configuration.is_default()).then(|| self.configuration.abbr()),
            (!self.extension.is_default()).then(|| self.extension.abbr()),
            (!self.perspective.is_default()).then(|| self.perspective.abbr()),
            (!self.essence.is_default()).then(|| self.essence.abbr()),
        ]
        .into_iter()
        .flatten()
        .collect();
        parts.join("/")
    }
}

const fn ca(extension: Extension, perspective: Perspective, essence: Essence) -> Ca {
    Ca {
        affiliation: Affiliation::Csl,
        configuration: Configuration::Uni,
        extension,
        perspective,
        essence,
    }
}

const SHORTCUTS: [(CaShortcut, u8, Ca); 8] = [
    (CaShortcut::W, 1, ca(Extension::Del, Perspective::M, Essence::Nrm)),
    (CaShortcut::W, 2, ca(Extension::Del, Perspective::G, Essence::Nrm)),
    (CaShortcut::W, 3, ca(Extension::Del, Perspective::N, Essence::Nrm)),
    (CaShortcut::W, 4, ca(Extension::Del, Perspective::G, Essence::Rpv)),
    (CaShortcut::Y, 1, ca(Extension::Prx, Perspective::M, Essence::Nrm)),
    (CaShortcut::Y, 2, ca(Extension::Del, Perspective::M, Essence::Rpv)),
    (CaShortcut::Y, 3, ca(Extension::Del, Perspective::A, Essence::Nrm)),
    (CaShortcut::Y, 4, ca(Extension::Prx, Perspective::M, Essence::Rpv)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_size() {
        assert_eq!(table().base.len(), 4 * 9 * 3 * 4 * 2);
        assert_eq!(table().base.len(), 864);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Ca::default().base_form(), "");
        assert_eq!(Ca::default().surface(false), "l");
        assert_eq!(Ca::default().surface(true), "ll");
    }

    #[test]
    fn test_base_forms_are_unique_and_non_empty() {
        let forms: HashSet<&String> = table().base.values().collect();
        assert_eq!(forms.len(), 864);
        let empty = table().base.iter().filter(|(_, f)| f.is_empty()).count();
        assert_eq!(empty, 1);
    }

    #[test]
    fn test_geminated_forms_are_unique() {
        assert_eq!(table().by_geminated.len(), 864);
        for g in table().by_geminated.keys() {
            assert!(!table().by_base.contains_key(g), "{g} collides with a base form");
        }
    }

    #[test]
    fn test_parse_both_spellings() {
        let ca = Ca { configuration: Configuration::Dpx, ..Ca::default() };
        assert_eq!(ca.surface(false), "s");
        assert_eq!(ca.surface(true), "ss");
        assert_eq!(Ca::parse("s").unwrap(), ca);
        assert_eq!(Ca::parse("ss").unwrap(), ca);
        assert!(Ca::is_geminated_form("ss"));
        assert!(matches!(Ca::parse("x"), Err(CodecError::UnknownCaForm { .. })));
    }

    #[test]
    fn test_shortcuts_roundtrip() {
        for (shortcut, series, ca) in SHORTCUTS {
            assert_eq!(ca.shortcut(), Some((shortcut, series)));
            assert_eq!(Ca::from_shortcut(shortcut, series), Some(ca));
        }
        let dpx = Ca { configuration: Configuration::Dpx, ..Ca::default() };
        assert_eq!(dpx.shortcut(), None);
    }

    #[test]
    fn test_abbr() {
        let ca = Ca {
            configuration: Configuration::Dpx,
            perspective: Perspective::G,
            ..Ca::default()
        };
        assert_eq!(ca.abbr(), "DPX/G");
        assert_eq!(Ca::default().abbr(), "");
    }
}
