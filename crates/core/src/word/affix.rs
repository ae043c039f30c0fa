//! Affix Cs/Vx decoding and encoding.

use crate::error::{CodecError, Result};
use crate::grammar::{Ca, Case, ReferentList, VowelForm};
use crate::language::letters::{is_consonant, GLOTTAL_STOP};
use crate::language::ConsonantForm;
use crate::types::Affix;

/// Split a referential-affix Cs into its referent part and the upper-case
/// flag (`xw` marks cases 37–68).
fn referential_marker(cs: &str) -> Option<(&str, bool)> {
    cs.strip_suffix("xw")
        .map(|prefix| (prefix, true))
        .or_else(|| cs.strip_suffix('x').map(|prefix| (prefix, false)))
}

/// Reject consonant forms a standard affix may not use.
pub(crate) fn validate_standard_cs(cs: &str) -> Result<()> {
    let invalid = |reason| Err(CodecError::InvalidAffixConsonant { form: cs.to_string(), reason });
    if cs.is_empty() {
        return invalid("empty");
    }
    if cs.contains(GLOTTAL_STOP) {
        return invalid("contains a glottal stop");
    }
    if !cs.chars().all(is_consonant) {
        return invalid("not a consonant cluster");
    }
    let form = ConsonantForm::new(cs);
    if form.is_special() {
        return invalid("reserved for Cc and Cn");
    }
    if form.is_geminated {
        return invalid("geminated");
    }
    if referential_marker(cs).is_some() {
        return invalid("ends in the referential marker");
    }
    if cs.starts_with('x') {
        return invalid("reserved for Cz");
    }
    Ok(())
}

/// Resolve an affix from its consonant and vowel forms. A glottal stop on
/// the Vx belongs to the word, not the affix.
pub(crate) fn decode(cs: &str, vx: VowelForm) -> Result<Affix> {
    let vx = vx.with_glottal_stop(false);
    if let Some((prefix, over_36)) = referential_marker(cs) {
        let ambiguous = || CodecError::AmbiguousReferentialAffix { form: cs.to_string() };
        let list = ReferentList::parse(prefix, "Cs").map_err(|_| ambiguous())?;
        let [referent] = list.referents.as_slice() else {
            return Err(ambiguous());
        };
        let case = Case::from_vowel(vx, over_36, "Vx")?;
        return Ok(Affix::Referential {
            referent: *referent,
            perspective: list.perspective,
            case,
        });
    }
    match (vx.sequence, vx.degree) {
        (4, 0) => Ok(Affix::Ca(Ca::parse(cs)?)),
        (1..=3, degree) => {
            validate_standard_cs(cs)?;
            Ok(Affix::Standard { affix_type: vx.sequence, degree, cs: cs.to_string() })
        }
        _ => Err(CodecError::vowel(vx.to_string(), "Vx")),
    }
}

/// Consonant and vowel forms of an affix.
pub(crate) fn encode(affix: &Affix) -> Result<(String, VowelForm)> {
    match affix {
        Affix::Standard { affix_type, degree, cs } => {
            if !(1..=3).contains(affix_type) || *degree > 9 {
                return Err(CodecError::combination(format!(
                    "affix {} has type {} degree {}",
                    cs, affix_type, degree
                )));
            }
            validate_standard_cs(cs)?;
            Ok((cs.clone(), VowelForm::new(*affix_type, *degree)))
        }
        Affix::Ca(ca) => Ok((ca.surface(false), VowelForm::new(4, 0))),
        Affix::Referential { referent, perspective, case } => {
            let list = ReferentList { referents: vec![*referent], perspective: *perspective };
            let (vx, over_36) = case.vowel();
            let marker = if over_36 { "xw" } else { "x" };
            Ok((format!("{}{}", list.cluster(), marker), vx))
        }
    }
}
