//! Formative slots ↔ record, and formative generation.

use super::affix;
use super::surface::SurfaceBuilder;
use super::tokenizer::FormativeSlots;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::grammar::{
    cc_form, cn_form, numeral_root, parse_cn, parse_numeral_root, parse_special_vv, parse_vr,
    special_vv, vr_form, vv_degree, vv_stem_version, Ca, Case, CaseScope, Context, Function,
    IllocutionValidation, Mood, ReferentList, SpecialRoot, Specification, Stem, Vn, VowelForm,
};
use crate::language::letters::is_consonant;
use crate::language::stress::{apply_stress, Stress, StressInfo};
use crate::language::ConsonantForm;
use crate::types::{Formative, Relation, Root};

// ─── Parse ───────────────────────────────────────────────────────

pub(crate) fn from_slots(slots: FormativeSlots, stress: StressInfo, word: &str) -> Result<Formative> {
    let vv = slots.vv.unwrap_or(VowelForm::new(1, 1));
    if vv.has_glottal_stop {
        return Err(CodecError::vowel(vv.to_string(), "Vv"));
    }
    if slots.vr.has_glottal_stop {
        return Err(CodecError::vowel(slots.vr.to_string(), "Vr"));
    }

    let special = if slots.shortcut.is_some() { None } else { parse_special_vv(vv) };
    let (stem, version) = match special {
        Some((_, version)) => (Stem::S1, version),
        None if slots.shortcut.is_some() || vv.sequence == 1 => {
            vv_stem_version(vv.degree).ok_or_else(|| CodecError::vowel(vv.to_string(), "Vv"))?
        }
        None => return Err(CodecError::vowel(vv.to_string(), "Vv")),
    };

    let mut function = Function::Sta;
    let mut specification = Specification::Bsc;
    let context;
    let root = match special {
        Some((SpecialRoot::Affix, _)) => {
            affix::validate_standard_cs(&slots.cr)?;
            context = Context::from_index(slots.vr.sequence as usize - 1)
                .ok_or_else(|| CodecError::vowel(slots.vr.to_string(), "Vr"))?;
            Root::Affix { cs: slots.cr.clone(), degree: slots.vr.degree }
        }
        other => {
            (function, specification, context) = parse_vr(slots.vr)?;
            match other {
                Some((SpecialRoot::Referential, _)) => {
                    Root::Referents(ReferentList::parse(&slots.cr, "Cr")?)
                }
                _ => match parse_numeral_root(&slots.cr) {
                    Some(n) => Root::Numeral(n),
                    None => Root::Consonant(slots.cr.clone()),
                },
            }
        }
    };

    let ca = match (slots.shortcut, &slots.ca) {
        (Some(shortcut), _) => Ca::from_shortcut(shortcut, vv.sequence)
            .ok_or_else(|| CodecError::vowel(vv.to_string(), "Vv"))?,
        (None, Some(text)) => Ca::parse(text)?,
        (None, None) => Ca::default(),
    };

    let slot_v_affixes = slots
        .slot_v
        .iter()
        .map(|a| affix::decode(&a.cs, a.vx))
        .collect::<Result<Vec<_>>>()?;
    let slot_vii_affixes = slots
        .slot_vii
        .iter()
        .map(|a| affix::decode(&a.cs, a.vx))
        .collect::<Result<Vec<_>>>()?;

    let (cn_index, vn) = match &slots.slot_viii {
        Some((vn, cn)) => {
            let (index, aspectual) =
                parse_cn(cn).ok_or_else(|| CodecError::consonant(cn.as_str(), "Cn"))?;
            (index, Vn::from_vowel(*vn, aspectual)?)
        }
        None => (0, Vn::default()),
    };

    let relation = relation(&slots, stress, cn_index, word)?;

    Ok(Formative {
        root,
        stem,
        version,
        function,
        specification,
        context,
        slot_v_affixes,
        ca,
        slot_vii_affixes,
        vn,
        relation,
    })
}

fn relation(
    slots: &FormativeSlots,
    stress: StressInfo,
    cn_index: usize,
    word: &str,
) -> Result<Relation> {
    let word_stress_error = |detail: &str| CodecError::InvalidStressPosition {
        word: word.to_string(),
        detail: detail.to_string(),
    };
    let case_scope = CaseScope::from_index(cn_index).unwrap_or_default();
    let mood = Mood::from_index(cn_index).unwrap_or_default();
    let marked_case = |vc: Option<VowelForm>| -> Result<Case> {
        match vc {
            Some(v) => Case::from_vowel(v.with_glottal_stop(false), v.has_glottal_stop, "Vc"),
            None => Ok(Case::Thm),
        }
    };

    if let Some(concatenation) = slots.concatenation {
        let over_36 = match stress.stress {
            Stress::Ultimate => true,
            Stress::Penultimate | Stress::Unmarked => false,
            _ => return Err(word_stress_error("concatenated formatives take penultimate or ultimate stress")),
        };
        let case = match slots.final_vowel {
            Some(v) if v.has_glottal_stop => return Err(CodecError::vowel(v.to_string(), "Vc")),
            Some(v) => Case::from_vowel(v, over_36, "Vc")?,
            None if over_36 => return Err(word_stress_error("ultimate stress without a Vc")),
            None => Case::Thm,
        };
        return Ok(Relation::Concatenated { concatenation, case_scope, case });
    }

    match stress.stress {
        Stress::Ultimate | Stress::Monosyllabic => {
            let illocution_validation = match slots.final_vowel {
                Some(vk) => IllocutionValidation::from_vowel(vk)?,
                None => IllocutionValidation::default(),
            };
            Ok(Relation::UnframedVerbal { mood, illocution_validation })
        }
        Stress::Antepenultimate => Ok(Relation::FramedVerbal {
            mood,
            case: marked_case(slots.final_vowel)?,
        }),
        Stress::Penultimate | Stress::Unmarked => Ok(Relation::Nominal {
            case_scope,
            case: marked_case(slots.final_vowel)?,
        }),
        Stress::Zerosyllabic => Err(word_stress_error("no syllables")),
    }
}

// ─── Generate ────────────────────────────────────────────────────

/// Check the record for combinations no surface form can carry.
fn check(f: &Formative) -> Result<()> {
    match &f.root {
        Root::Affix { cs, degree } => {
            if f.stem != Stem::S1 || f.function != Function::Sta || f.specification != Specification::Bsc {
                return Err(CodecError::combination(
                    "affix roots take S1, STA and BSC".to_string(),
                ));
            }
            if *degree > 9 {
                return Err(CodecError::combination(format!("affix root degree {degree}")));
            }
            affix::validate_standard_cs(cs)?;
        }
        Root::Referents(list) => {
            if f.stem != Stem::S1 {
                return Err(CodecError::combination("referential roots take S1"));
            }
            if list.is_empty() {
                return Err(CodecError::combination("empty referent list"));
            }
        }
        Root::Numeral(n) => {
            if numeral_root(*n).is_none() {
                return Err(CodecError::combination(format!("no numeral root for {n}")));
            }
        }
        Root::Consonant(cs) => {
            if parse_numeral_root(cs).is_some() {
                return Err(CodecError::combination(format!("root {cs} is a numeral root")));
            }
            if cs.is_empty() || !cs.chars().all(is_consonant) || ConsonantForm::new(cs.as_str()).is_special() {
                return Err(CodecError::combination(format!("'{cs}' cannot be a root")));
            }
        }
    }
    Ok(())
}

fn root_cr(root: &Root) -> String {
    match root {
        Root::Consonant(cs) | Root::Affix { cs, .. } => cs.clone(),
        Root::Numeral(n) => numeral_root(*n).unwrap_or_default().to_string(),
        Root::Referents(list) => list.cluster(),
    }
}

fn is_slot_viii_default(f: &Formative) -> bool {
    f.vn.is_default() && f.relation.cn_index() == 0
}

fn is_slot_ix_default(relation: &Relation) -> bool {
    match relation {
        Relation::UnframedVerbal { illocution_validation, .. } => illocution_validation.is_default(),
        other => other.case() == Some(Case::Thm),
    }
}

/// Vv written for the formative, and whether it may be elided.
fn vv_for(f: &Formative) -> (VowelForm, bool) {
    match &f.root {
        Root::Affix { .. } => (special_vv(SpecialRoot::Affix, f.version), false),
        Root::Referents(_) => (special_vv(SpecialRoot::Referential, f.version), false),
        _ => {
            let vv = VowelForm::new(1, vv_degree(f.stem, f.version));
            let elidable = vv == VowelForm::new(1, 1) && f.relation.concatenation().is_none();
            (vv, elidable)
        }
    }
}

fn vr_for(f: &Formative) -> VowelForm {
    match &f.root {
        Root::Affix { degree, .. } => VowelForm::new(f.context.index() as u8 + 1, *degree),
        _ => vr_form(f.function, f.specification, f.context),
    }
}

/// Vc or Vk for the relation. Concatenated formatives mark the upper cases
/// with stress instead of a glottal stop.
fn final_vowel(relation: &Relation) -> VowelForm {
    match relation {
        Relation::UnframedVerbal { illocution_validation, .. } => illocution_validation.to_vowel(),
        Relation::Concatenated { case, .. } => case.vowel().0,
        Relation::Nominal { case, .. } | Relation::FramedVerbal { case, .. } => case.vc(),
    }
}

pub(crate) fn generate(f: &Formative, config: &CodecConfig) -> Result<String> {
    check(f)?;
    let slot_v = f.slot_v_affixes.iter().map(affix::encode).collect::<Result<Vec<_>>>()?;
    let slot_vii = f.slot_vii_affixes.iter().map(affix::encode).collect::<Result<Vec<_>>>()?;

    if config.prefer_shortcuts {
        if let Some(word) = shortcut(f, &slot_v, &slot_vii)? {
            return Ok(word);
        }
    }

    let (vv, vv_elidable) = vv_for(f);
    let build = |write_vv: bool, write_final: bool| {
        let mut b = SurfaceBuilder::new();
        if let Some(cc) = cc_form(f.relation.concatenation(), None) {
            b.consonant(cc);
        }
        if write_vv {
            b.vowel(vv);
        }
        b.consonant(root_cr(&f.root)).vowel(vr_for(f));
        for (cs, vx) in &slot_v {
            b.consonant(cs.as_str()).vowel(*vx);
        }
        b.consonant(f.ca.surface(!slot_v.is_empty()));
        for (cs, vx) in &slot_vii {
            b.vowel(*vx).consonant(cs.as_str());
        }
        if !is_slot_viii_default(f) {
            b.vowel(f.vn.to_vowel());
            b.consonant(cn_form(f.relation.cn_index(), f.vn.is_aspectual()));
        }
        if write_final {
            b.vowel(final_vowel(&f.relation));
        }
        b
    };

    let slot_ix_elidable = is_slot_ix_default(&f.relation);
    let (builder, from_end) = match f.relation {
        Relation::Nominal { .. } => {
            let short = build(!vv_elidable, false);
            let b = if slot_ix_elidable && short.syllables()? >= 2 {
                short
            } else {
                build(!vv_elidable, true)
            };
            (b, None)
        }
        Relation::UnframedVerbal { .. } => (build(!vv_elidable, !slot_ix_elidable), Some(1)),
        Relation::FramedVerbal { .. } => {
            let mut chosen = None;
            for (write_vv, write_final) in [(false, false), (true, false), (false, true), (true, true)] {
                if (!write_vv && !vv_elidable) || (!write_final && !slot_ix_elidable) {
                    continue;
                }
                let b = build(write_vv, write_final);
                if b.syllables()? >= 3 {
                    chosen = Some(b);
                    break;
                }
            }
            let b = chosen.ok_or_else(|| {
                CodecError::combination("framed formatives need three syllables")
            })?;
            (b, Some(3))
        }
        Relation::Concatenated { case, .. } => {
            let b = build(true, !slot_ix_elidable);
            (b, case.is_over_36().then_some(1))
        }
    };

    finish(builder, from_end)
}

/// Write the stress accent, leaving monosyllables unmarked.
fn finish(builder: SurfaceBuilder, from_end: Option<usize>) -> Result<String> {
    let plain = builder.render()?;
    let syllables = builder.syllables()?;
    match from_end {
        Some(1) if syllables < 2 => Ok(plain),
        Some(n) => apply_stress(&plain, n),
        None => Ok(plain),
    }
}

/// The Ca-shortcut spelling, when the record allows one.
fn shortcut(
    f: &Formative,
    slot_v: &[(String, VowelForm)],
    slot_vii: &[(String, VowelForm)],
) -> Result<Option<String>> {
    if !matches!(f.root, Root::Consonant(_) | Root::Numeral(_))
        || f.ca.is_default()
        || !is_slot_viii_default(f)
        || !is_slot_ix_default(&f.relation)
    {
        return Ok(None);
    }
    let Some((kind, series)) = f.ca.shortcut() else {
        return Ok(None);
    };
    let Some(cc) = cc_form(f.relation.concatenation(), Some(kind)) else {
        return Ok(None);
    };

    let mut b = SurfaceBuilder::new();
    b.consonant(cc)
        .vowel(VowelForm::new(series, vv_degree(f.stem, f.version)))
        .consonant(root_cr(&f.root))
        .vowel(vr_for(f));
    for (cs, vx) in slot_v {
        b.consonant(cs.as_str()).vowel(*vx);
    }
    if !slot_v.is_empty() {
        b.glottalize_last_vowel();
    }
    for (cs, vx) in slot_vii {
        b.consonant(cs.as_str()).vowel(*vx);
    }

    let from_end = match f.relation {
        Relation::Nominal { .. } | Relation::Concatenated { .. } => None,
        Relation::UnframedVerbal { .. } => Some(1),
        Relation::FramedVerbal { .. } => {
            if b.syllables()? < 3 {
                return Ok(None);
            }
            Some(3)
        }
    };
    finish(b, from_end).map(Some)
}
