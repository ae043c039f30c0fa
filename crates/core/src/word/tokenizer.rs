//! Assigns classified tokens to grammatical slots.
//!
//! A formative is consumed from both ends: Cc/Vv/Cr/Vr from the left, then
//! the final vowel and slot VIII from the right, and whatever remains is the
//! Ca with its surrounding affixes.

use crate::error::{CodecError, Result};
use crate::grammar::{parse_cc, Ca, CaShortcut, Concatenation, ReferentList, VowelForm};
use crate::language::{ConsonantForm, LetterForm};

/// Unconsumed range `left..right` of the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    left: usize,
    right: usize,
}

impl Cursor {
    fn new(len: usize) -> Self {
        Cursor { left: 0, right: len }
    }

    fn remaining(self) -> usize {
        self.right - self.left
    }

    fn is_empty(self) -> bool {
        self.left >= self.right
    }
}

/// Run an optional step, restoring the cursor when it yields nothing.
fn attempt<T>(cursor: &mut Cursor, step: impl FnOnce(&mut Cursor) -> Option<T>) -> Option<T> {
    let checkpoint = *cursor;
    let result = step(cursor);
    if result.is_none() {
        *cursor = checkpoint;
    }
    result
}

struct Tokens<'a> {
    forms: &'a [LetterForm],
}

impl<'a> Tokens<'a> {
    fn vowel_left(&self, cur: &mut Cursor) -> Option<VowelForm> {
        if cur.is_empty() {
            return None;
        }
        let v = self.forms[cur.left].as_vowel()?;
        cur.left += 1;
        Some(v)
    }

    fn consonant_left(&self, cur: &mut Cursor) -> Option<&'a ConsonantForm> {
        if cur.is_empty() {
            return None;
        }
        let c = self.forms[cur.left].as_consonant()?;
        cur.left += 1;
        Some(c)
    }

    fn vowel_right(&self, cur: &mut Cursor) -> Option<VowelForm> {
        if cur.is_empty() {
            return None;
        }
        let v = self.forms[cur.right - 1].as_vowel()?;
        cur.right -= 1;
        Some(v)
    }

    fn consonant_right(&self, cur: &mut Cursor) -> Option<&'a ConsonantForm> {
        if cur.is_empty() {
            return None;
        }
        let c = self.forms[cur.right - 1].as_consonant()?;
        cur.right -= 1;
        Some(c)
    }

    /// Text of the next token, for error messages.
    fn near(&self, cur: Cursor) -> String {
        match self.forms.get(cur.left) {
            Some(LetterForm::Vowel(v)) => v.to_string(),
            Some(LetterForm::Consonant(c)) => c.text.clone(),
            None => "end of word".to_string(),
        }
    }
}

/// A Cs/Vx pair, in whichever order the slot writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AffixSlot {
    pub cs: String,
    pub vx: VowelForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormativeSlots {
    pub concatenation: Option<Concatenation>,
    pub shortcut: Option<CaShortcut>,
    pub vv: Option<VowelForm>,
    pub cr: String,
    pub vr: VowelForm,
    pub slot_v: Vec<AffixSlot>,
    /// Absent in a shortcut formative.
    pub ca: Option<String>,
    pub slot_vii: Vec<AffixSlot>,
    pub slot_viii: Option<(VowelForm, String)>,
    pub final_vowel: Option<VowelForm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReferentialTail {
    Single,
    Dual { vc2: VowelForm, c2: String },
    Combination { cz: String, affixes: Vec<AffixSlot>, vc2: Option<VowelForm> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReferentialSlots {
    pub c1: String,
    pub vc1: VowelForm,
    pub tail: ReferentialTail,
}

/// Whether a token stream has the shape of a referential.
pub(crate) fn is_referential(forms: &[LetterForm]) -> bool {
    match forms {
        [LetterForm::Consonant(_), LetterForm::Vowel(_)] => true,
        [LetterForm::Consonant(c1), LetterForm::Vowel(_), LetterForm::Consonant(c3), ..] => {
            (c3.text == "w" || c3.text.starts_with('x'))
                && ReferentList::parse(&c1.text, "C1").is_ok()
        }
        _ => false,
    }
}

pub(crate) fn tokenize_formative(forms: &[LetterForm]) -> Result<FormativeSlots> {
    let tokens = Tokens { forms };
    let mut cur = Cursor::new(forms.len());

    let mut concatenation = None;
    let mut shortcut = None;
    let vv = match forms.first() {
        Some(LetterForm::Vowel(_)) => tokens.vowel_left(&mut cur),
        Some(LetterForm::Consonant(c)) if c.is_special() => {
            let (concat, short) =
                parse_cc(&c.text).ok_or_else(|| CodecError::consonant(c.text.as_str(), "Cc"))?;
            cur.left += 1;
            concatenation = concat;
            shortcut = short;
            let vv = tokens
                .vowel_left(&mut cur)
                .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Vv after Cc"))?;
            Some(vv)
        }
        Some(LetterForm::Consonant(_)) => None,
        None => return Err(CodecError::pattern("", "a formative")),
    };

    let cr = tokens
        .consonant_left(&mut cur)
        .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Cr"))?;
    if cr.is_special() {
        return Err(CodecError::consonant(cr.text.as_str(), "Cr"));
    }
    let vr = tokens
        .vowel_left(&mut cur)
        .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Vr"))?;

    let mut slots = FormativeSlots {
        concatenation,
        shortcut,
        vv,
        cr: cr.text.clone(),
        vr,
        slot_v: Vec::new(),
        ca: None,
        slot_vii: Vec::new(),
        slot_viii: None,
        final_vowel: None,
    };

    if shortcut.is_some() {
        shortcut_affixes(&tokens, cur, &mut slots)?;
    } else {
        ca_and_affixes(&tokens, cur, &mut slots)?;
    }
    log::trace!("formative slots: {:?}", slots);
    Ok(slots)
}

/// `(Cs Vx)*` after Vr. Slot V runs through the first Vx carrying a glottal
/// stop; the rest is slot VII.
fn shortcut_affixes(tokens: &Tokens<'_>, mut cur: Cursor, slots: &mut FormativeSlots) -> Result<()> {
    if cur.remaining() % 2 == 1 {
        return Err(CodecError::pattern(tokens.near(cur), "Cs Vx pairs after Vr"));
    }
    let mut pairs = Vec::new();
    while !cur.is_empty() {
        let near = tokens.near(cur);
        let cs = tokens
            .consonant_left(&mut cur)
            .ok_or_else(|| CodecError::pattern(near.as_str(), "Cs"))?;
        let vx = tokens
            .vowel_left(&mut cur)
            .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Vx"))?;
        pairs.push(AffixSlot { cs: cs.text.clone(), vx });
    }
    match pairs.iter().position(|p| p.vx.has_glottal_stop) {
        Some(i) => {
            slots.slot_vii = pairs.split_off(i + 1);
            slots.slot_v = pairs;
        }
        None => slots.slot_vii = pairs,
    }
    Ok(())
}

fn ca_and_affixes(tokens: &Tokens<'_>, mut cur: Cursor, slots: &mut FormativeSlots) -> Result<()> {
    slots.final_vowel = attempt(&mut cur, |c| {
        if c.remaining() > 1 {
            tokens.vowel_right(c)
        } else {
            None
        }
    });
    slots.slot_viii = attempt(&mut cur, |c| {
        if c.remaining() < 3 {
            return None;
        }
        let cn = tokens.consonant_right(c).filter(|cn| cn.is_special())?;
        let vn = tokens.vowel_right(c)?;
        Some((vn, cn.text.clone()))
    });

    let middle = &tokens.forms[cur.left..cur.right];
    let alternating = middle.len() % 2 == 1
        && middle.iter().enumerate().all(|(i, f)| match f {
            LetterForm::Consonant(_) => i % 2 == 0,
            LetterForm::Vowel(_) => i % 2 == 1,
        });
    if !alternating {
        return Err(CodecError::pattern(tokens.near(cur), "Ca with alternating affixes"));
    }

    let consonant = |i: usize| middle[i].as_consonant().map(|c| c.text.clone()).unwrap_or_default();
    let vowel = |i: usize| middle[i].as_vowel();

    let ca_index = (0..middle.len())
        .step_by(2)
        .find(|&i| Ca::is_geminated_form(&consonant(i)))
        .unwrap_or(0);

    for i in (0..ca_index).step_by(2) {
        if let Some(vx) = vowel(i + 1) {
            slots.slot_v.push(AffixSlot { cs: consonant(i), vx });
        }
    }
    slots.ca = Some(consonant(ca_index));
    for i in (ca_index + 1..middle.len()).step_by(2) {
        if let Some(vx) = vowel(i) {
            slots.slot_vii.push(AffixSlot { cs: consonant(i + 1), vx });
        }
    }
    Ok(())
}

pub(crate) fn tokenize_referential(forms: &[LetterForm]) -> Result<ReferentialSlots> {
    let tokens = Tokens { forms };
    let mut cur = Cursor::new(forms.len());

    let c1 = tokens
        .consonant_left(&mut cur)
        .ok_or_else(|| CodecError::pattern(tokens.near(cur), "C1"))?;
    let vc1 = tokens
        .vowel_left(&mut cur)
        .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Vc1"))?;

    let tail = if cur.is_empty() {
        ReferentialTail::Single
    } else {
        let next = tokens
            .consonant_left(&mut cur)
            .ok_or_else(|| CodecError::pattern(tokens.near(cur), "w or Cz"))?;
        if next.text == "w" {
            let vc2 = tokens
                .vowel_left(&mut cur)
                .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Vc2"))?;
            let c2 = tokens
                .consonant_left(&mut cur)
                .ok_or_else(|| CodecError::pattern(tokens.near(cur), "C2"))?;
            if !cur.is_empty() {
                return Err(CodecError::pattern(tokens.near(cur), "end of dual referential"));
            }
            ReferentialTail::Dual { vc2, c2: c2.text.clone() }
        } else if next.text.starts_with('x') {
            let mut affixes = Vec::new();
            let mut vc2 = None;
            while !cur.is_empty() {
                let vx = tokens
                    .vowel_left(&mut cur)
                    .ok_or_else(|| CodecError::pattern(tokens.near(cur), "Vx"))?;
                match tokens.consonant_left(&mut cur) {
                    Some(cs) => affixes.push(AffixSlot { cs: cs.text.clone(), vx }),
                    None if cur.is_empty() => vc2 = Some(vx),
                    None => return Err(CodecError::pattern(tokens.near(cur), "Cs")),
                }
            }
            ReferentialTail::Combination { cz: next.text.clone(), affixes, vc2 }
        } else {
            return Err(CodecError::pattern(next.text.as_str(), "w or Cz"));
        }
    };

    let slots = ReferentialSlots { c1: c1.text.clone(), vc1, tail };
    log::trace!("referential slots: {:?}", slots);
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::classify;

    fn forms(word: &str) -> Vec<LetterForm> {
        classify(word).unwrap()
    }

    #[test]
    fn test_attempt_restores_cursor() {
        let mut cur = Cursor::new(4);
        let r: Option<()> = attempt(&mut cur, |c| {
            c.left += 2;
            None
        });
        assert!(r.is_none());
        assert_eq!(cur, Cursor::new(4));
    }

    #[test]
    fn test_formative_slots() {
        let slots = tokenize_formative(&forms("hwacäpoukliossahruö")).unwrap();
        assert_eq!(slots.concatenation, Some(Concatenation::Two));
        assert_eq!(slots.cr, "c");
        assert_eq!(slots.slot_v.len(), 2);
        assert_eq!(slots.slot_v[1].cs, "kl");
        assert_eq!(slots.ca.as_deref(), Some("ss"));
        assert!(slots.slot_vii.is_empty());
        assert_eq!(slots.slot_viii.as_ref().map(|(_, cn)| cn.as_str()), Some("hr"));
        assert_eq!(slots.final_vowel.map(|v| v.as_str()), Some("uö"));
    }

    #[test]
    fn test_ungeminated_first_consonant_is_ca() {
        let slots = tokenize_formative(&forms("lalapek")).unwrap();
        assert_eq!(slots.vv, None);
        assert_eq!(slots.ca.as_deref(), Some("l"));
        assert!(slots.slot_v.is_empty());
        assert_eq!(slots.slot_vii.len(), 2);
        assert_eq!(slots.slot_vii[1].cs, "k");
    }

    #[test]
    fn test_shortcut_odd_token_count() {
        assert!(matches!(
            tokenize_formative(&forms("walal")),
            Err(CodecError::UnexpectedTokenPattern { .. })
        ));
    }

    #[test]
    fn test_shortcut_glottal_stop_boundary() {
        let slots = tokenize_formative(&forms("walapa'ka")).unwrap();
        assert_eq!(slots.shortcut, Some(CaShortcut::W));
        assert_eq!(slots.slot_v.len(), 1);
        assert_eq!(slots.slot_vii.len(), 1);
        assert_eq!(slots.ca, None);
    }

    #[test]
    fn test_invalid_cc() {
        assert!(matches!(
            tokenize_formative(&forms("hňala")),
            Err(CodecError::InvalidConsonantForm { slot: "Cc", .. })
        ));
    }

    #[test]
    fn test_classification() {
        assert!(is_referential(&forms("la")));
        assert!(is_referential(&forms("lawas")));
        assert!(is_referential(&forms("laxta")));
        assert!(!is_referential(&forms("lal")));
        assert!(!is_referential(&forms("walapa")));
    }

    #[test]
    fn test_referential_shapes() {
        let slots = tokenize_referential(&forms("lawes")).unwrap();
        assert!(matches!(slots.tail, ReferentialTail::Dual { ref c2, .. } if c2 == "s"));

        let slots = tokenize_referential(&forms("laxtepo")).unwrap();
        match slots.tail {
            ReferentialTail::Combination { cz, affixes, vc2 } => {
                assert_eq!(cz, "xt");
                assert_eq!(affixes.len(), 1);
                assert_eq!(vc2.map(|v| v.as_str()), Some("o"));
            }
            other => panic!("unexpected tail {other:?}"),
        }

        assert!(tokenize_referential(&forms("lawesa")).is_err());
    }
}
