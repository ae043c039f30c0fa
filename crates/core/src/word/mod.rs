//! Word-level parsing and generation.
//!
//! Parsing runs normalize → stress → classify → tokenize → map; generation
//! assembles slot pieces and writes the stress accent.

mod affix;
mod formative;
mod gloss;
mod referential;
mod surface;
mod tokenizer;

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::language::letters::{fold_accents, is_consonant};
use crate::language::{analyze, classify, normalize, validate_word, LetterForm, StressInfo};
use crate::types::Word;

use referential::EPENTHETIC_VOWEL;

/// A normalized word with its stress and letter runs, before slot
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWord {
    pub source: String,
    pub normalized: String,
    pub stress: StressInfo,
    /// Letter runs, without any epenthetic prefix.
    pub forms: Vec<LetterForm>,
    /// Whether a leading epenthetic `ë` was stripped.
    pub epenthetic: bool,
}

impl ParsedWord {
    pub fn scan(text: &str, config: &CodecConfig) -> Result<Self> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(CodecError::pattern("", "a word"));
        }
        let stress = analyze(&normalized, config.strict_stress)?;
        let folded = fold_accents(&normalized);

        // A leading ë before a consonant only ever pads a referential.
        let (body, epenthetic) = match folded.strip_prefix(EPENTHETIC_VOWEL) {
            Some(rest) if rest.starts_with(is_consonant) => (rest, true),
            _ => (folded.as_str(), false),
        };
        let forms = classify(body)?;
        Ok(ParsedWord { source: text.to_string(), normalized, stress, forms, epenthetic })
    }

    pub fn is_referential(&self) -> bool {
        self.epenthetic || tokenizer::is_referential(&self.forms)
    }
}

/// Parse a word with the default options.
pub fn parse(text: &str) -> Result<Word> {
    parse_with(text, &CodecConfig::default())
}

pub fn parse_with(text: &str, config: &CodecConfig) -> Result<Word> {
    let scanned = ParsedWord::scan(text, config)?;
    let word = if scanned.is_referential() {
        let slots = tokenizer::tokenize_referential(&scanned.forms)?;
        Word::Referential(referential::from_slots(slots, scanned.stress, &scanned.normalized)?)
    } else {
        let slots = tokenizer::tokenize_formative(&scanned.forms)?;
        Word::Formative(formative::from_slots(slots, scanned.stress, &scanned.normalized)?)
    };
    log::debug!("parsed '{}' as {}", scanned.source, word.gloss());
    Ok(word)
}

/// Generate the surface form of a record with the default options.
pub fn generate(word: &Word) -> Result<String> {
    generate_with(word, &CodecConfig::default())
}

pub fn generate_with(word: &Word, config: &CodecConfig) -> Result<String> {
    let text = match word {
        Word::Formative(f) => formative::generate(f, config)?,
        Word::Referential(r) => referential::generate(r)?,
    };
    if config.validate_phonotactics {
        validate_word(&text)?;
    }
    log::debug!("generated '{}' from {}", text, word.gloss());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{
        Affiliation, Aspect, Ca, Case, CaseScope, Concatenation, Configuration, Context, Effect,
        Essence, Extension, Function, Illocution, IllocutionValidation, Level, Mood, Perspective,
        Phase, Referent, ReferentEffect, ReferentList, ReferentTarget, Specification, Stem,
        Validation, Valence, Version, Vn,
    };
    use crate::types::{Affix, Formative, Referential, ReferentialShape, Relation, Root};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn fixture() -> Formative {
        let mut f = Formative::new(Root::Consonant("c".into()));
        f.specification = Specification::Cte;
        f.slot_v_affixes = vec![Affix::standard(2, 6, "p"), Affix::standard(3, 3, "kl")];
        f.ca.configuration = Configuration::Dpx;
        f.relation = Relation::Concatenated {
            concatenation: Concatenation::Two,
            case_scope: CaseScope::Ccs,
            case: Case::Tsp,
        };
        f
    }

    #[test]
    fn test_fixture_word() {
        let word = Word::from(fixture());
        assert_eq!(generate(&word).unwrap(), "hwacäpoukliossahruö");
        assert_eq!(parse("hwacäpoukliossahruö").unwrap(), word);
    }

    #[test]
    fn test_fixture_record_json() {
        let json = include_str!("../../../../demos/fixture.json");
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word, Word::from(fixture()));
        assert_eq!(word.gloss(), "T2-c-CTE-p/2.6-kl/3.3-DPX-CCS-TSP");
    }

    #[test]
    fn test_parse_normalizes_input() {
        let word = parse("  HWACÄPOUKLIOSSAHRUÖ ").unwrap();
        assert_eq!(word, Word::from(fixture()));
        let word = parse("’hwacäpoukliossahruö").unwrap();
        assert_eq!(word, Word::from(fixture()));
    }

    #[test]
    fn test_scan_strips_epenthetic_vowel() {
        let scanned = ParsedWord::scan("ësá", &CodecConfig::default()).unwrap();
        assert!(scanned.epenthetic);
        assert!(scanned.is_referential());
        assert_eq!(scanned.forms.len(), 2);
        assert_eq!(scanned.stress.syllables, 2);

        let scanned = ParsedWord::scan("ëikleal", &CodecConfig::default()).unwrap();
        assert!(!scanned.epenthetic);
        assert!(!scanned.is_referential());
    }

    #[test]
    fn test_empty_word() {
        assert!(matches!(parse("   "), Err(CodecError::UnexpectedTokenPattern { .. })));
    }

    #[test]
    fn test_bad_letter() {
        assert!(matches!(parse("kaqa"), Err(CodecError::InvalidConsonantForm { .. })));
    }

    #[test]
    fn test_stress_errors() {
        assert!(matches!(parse("kálá"), Err(CodecError::MultipleStressMarks { .. })));
        assert!(matches!(parse("kálalala"), Err(CodecError::InvalidStressPosition { .. })));
        let strict = CodecConfig { strict_stress: true, ..CodecConfig::default() };
        assert!(matches!(
            parse_with("kál", &strict),
            Err(CodecError::InvalidStressPosition { .. })
        ));
        assert!(parse("kál").is_ok());
    }

    #[test]
    fn test_epenthetic_referential() {
        let word = parse("ësá").unwrap();
        let expected = Referential {
            essence: Essence::Rpv,
            ..Referential::new(ReferentList::single(Referent::new(
                ReferentTarget::M2,
                ReferentEffect::Neu,
            )))
        };
        assert_eq!(word, Word::from(expected.clone()));
        assert_eq!(generate(&word).unwrap(), "ësá");
    }

    #[test]
    fn test_referential_antepenultimate_rejected() {
        assert!(matches!(parse("láxtoko"), Err(CodecError::InvalidStressPosition { .. })));
    }

    #[test]
    fn test_validate_phonotactics() {
        let config = CodecConfig { validate_phonotactics: true, ..CodecConfig::default() };
        let mut f = Formative::new(Root::Consonant("k".into()));
        f.slot_vii_affixes = vec![Affix::standard(1, 1, "tk")];
        assert!(generate(&Word::from(f.clone())).is_ok());
        assert!(generate_with(&Word::from(f), &config).is_err());
        assert!(generate_with(&Word::from(fixture()), &config).is_ok());
    }

    #[test]
    fn test_shortcut_preference() {
        let mut f = Formative::new(Root::Consonant("k".into()));
        f.ca.perspective = Perspective::G;
        let word = Word::from(f);
        let short = generate(&word).unwrap();
        let long = generate_with(
            &word,
            &CodecConfig { prefer_shortcuts: false, ..CodecConfig::default() },
        )
        .unwrap();
        assert_eq!(short, "waika");
        assert_eq!(long, "kapa");
        assert_eq!(parse(&short).unwrap(), word);
        assert_eq!(parse(&long).unwrap(), word);
    }

    #[test]
    fn test_affix_consonant_cannot_start_with_x() {
        // "kaxtall" and "caxmall" would read as referentials with a Cz
        for (cr, cs) in [("k", "xt"), ("c", "xm"), ("r", "xt")] {
            let mut f = Formative::new(Root::Consonant(cr.into()));
            f.slot_v_affixes = vec![Affix::standard(1, 1, cs)];
            assert!(matches!(
                generate(&Word::from(f.clone())),
                Err(CodecError::InvalidAffixConsonant { .. })
            ));
            f.slot_v_affixes.clear();
            f.slot_vii_affixes = vec![Affix::standard(1, 1, cs)];
            assert!(matches!(
                generate(&Word::from(f)),
                Err(CodecError::InvalidAffixConsonant { .. })
            ));
        }
        assert!(!matches!(parse("kaxtall"), Ok(Word::Formative(_))));
    }

    #[test]
    fn test_referent_shaped_root_with_slot_v() {
        let mut f = Formative::new(Root::Consonant("k".into()));
        f.slot_v_affixes = vec![Affix::standard(1, 1, "t")];
        let word = Word::from(f);
        assert_roundtrip(&word, &CodecConfig::default());
    }

    // ─── Randomized round trips ──────────────────────────────────

    // Several roots and affix consonants also spell referents.
    const ROOTS: [&str; 11] = ["k", "kl", "pr", "tr", "m", "ml", "ř", "gv", "l", "s", "c"];
    const AFFIX_CS: [&str; 8] = ["p", "kl", "t", "ňk", "sk", "l", "š", "ř"];
    const NUMERALS: [u32; 13] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 100, 10000];

    fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
        items[rng.gen_range(0..items.len())]
    }

    fn random_ca(rng: &mut StdRng) -> Ca {
        Ca {
            affiliation: pick(rng, Affiliation::ALL),
            configuration: pick(rng, Configuration::ALL),
            extension: pick(rng, Extension::ALL),
            perspective: pick(rng, Perspective::ALL),
            essence: pick(rng, Essence::ALL),
        }
    }

    fn random_referent(rng: &mut StdRng) -> Referent {
        Referent::new(pick(rng, ReferentTarget::ALL), pick(rng, ReferentEffect::ALL))
    }

    fn random_affix(rng: &mut StdRng) -> Affix {
        match rng.gen_range(0..10) {
            0 => Affix::Ca(random_ca(rng)),
            1 => Affix::Referential {
                referent: random_referent(rng),
                perspective: pick(rng, Perspective::ALL),
                case: pick(rng, Case::ALL),
            },
            _ => Affix::standard(rng.gen_range(1..=3), rng.gen_range(0..=9), pick(rng, &AFFIX_CS)),
        }
    }

    fn random_affixes(rng: &mut StdRng) -> Vec<Affix> {
        let n = rng.gen_range(0..=2);
        (0..n).map(|_| random_affix(rng)).collect()
    }

    fn random_vn(rng: &mut StdRng) -> Vn {
        match rng.gen_range(0..6) {
            0 => Vn::Valence(pick(rng, Valence::ALL)),
            1 => Vn::Phase(pick(rng, Phase::ALL)),
            2 => Vn::Effect(pick(rng, Effect::ALL)),
            3 => Vn::Level(pick(rng, Level::ALL)),
            4 => Vn::Aspect(pick(rng, Aspect::ALL)),
            _ => Vn::default(),
        }
    }

    fn random_relation(rng: &mut StdRng) -> Relation {
        match rng.gen_range(0..4) {
            0 => Relation::Nominal {
                case_scope: pick(rng, CaseScope::ALL),
                case: pick(rng, Case::ALL),
            },
            1 => Relation::UnframedVerbal {
                mood: pick(rng, Mood::ALL),
                illocution_validation: if rng.gen_bool(0.5) {
                    IllocutionValidation::Assertive(pick(rng, Validation::ALL))
                } else {
                    IllocutionValidation::Performative(pick(rng, Illocution::ALL))
                },
            },
            2 => Relation::FramedVerbal {
                mood: pick(rng, Mood::ALL),
                case: pick(rng, Case::ALL),
            },
            _ => Relation::Concatenated {
                concatenation: pick(rng, Concatenation::ALL),
                case_scope: pick(rng, CaseScope::ALL),
                case: pick(rng, Case::ALL),
            },
        }
    }

    fn random_root(rng: &mut StdRng) -> Root {
        match rng.gen_range(0..10) {
            0 => Root::Affix { cs: pick(rng, &AFFIX_CS).to_string(), degree: rng.gen_range(0..=9) },
            1 => Root::Numeral(pick(rng, &NUMERALS)),
            2 => Root::Referents(random_list(rng)),
            _ => Root::Consonant(pick(rng, &ROOTS).to_string()),
        }
    }

    fn random_formative(rng: &mut StdRng) -> Formative {
        let mut f = Formative::new(random_root(rng));
        f.stem = pick(rng, Stem::ALL);
        f.version = pick(rng, Version::ALL);
        f.function = pick(rng, Function::ALL);
        f.specification = pick(rng, Specification::ALL);
        f.context = pick(rng, Context::ALL);
        match f.root {
            Root::Affix { .. } => {
                f.stem = Stem::S1;
                f.function = Function::Sta;
                f.specification = Specification::Bsc;
            }
            Root::Referents(_) => f.stem = Stem::S1,
            _ => {}
        }
        f.slot_v_affixes = random_affixes(rng);
        if rng.gen_bool(0.6) {
            f.ca = random_ca(rng);
        }
        f.slot_vii_affixes = random_affixes(rng);
        if rng.gen_bool(0.3) {
            f.vn = random_vn(rng);
        }
        f.relation = random_relation(rng);
        f
    }

    fn random_list(rng: &mut StdRng) -> ReferentList {
        let n = rng.gen_range(1..=2);
        ReferentList {
            referents: (0..n).map(|_| random_referent(rng)).collect(),
            perspective: pick(rng, Perspective::ALL),
        }
    }

    fn random_referential(rng: &mut StdRng) -> Referential {
        let mut r = Referential::new(random_list(rng));
        r.case = pick(rng, Case::ALL);
        r.essence = pick(rng, Essence::ALL);
        r.shape = match rng.gen_range(0..3) {
            0 => ReferentialShape::Single,
            1 => ReferentialShape::Dual { referents: random_list(rng), case: pick(rng, Case::ALL) },
            _ => ReferentialShape::Combination {
                specification: pick(rng, Specification::ALL),
                affixes: random_affixes(rng),
                case: pick(rng, Case::ALL),
            },
        };
        r
    }

    fn assert_roundtrip(word: &Word, config: &CodecConfig) {
        let text = generate_with(word, config)
            .unwrap_or_else(|e| panic!("generating {:?}: {}", word, e));
        let parsed = parse_with(&text, config)
            .unwrap_or_else(|e| panic!("parsing '{}' from {:?}: {}", text, word, e));
        assert_eq!(&parsed, word, "round trip through '{}'", text);
        assert_eq!(generate_with(&parsed, config).unwrap(), text);
    }

    #[test]
    fn test_random_formatives_roundtrip() {
        let mut rng = StdRng::seed_from_u64(42);
        let configs = [
            CodecConfig::default(),
            CodecConfig { prefer_shortcuts: false, ..CodecConfig::default() },
        ];
        for _ in 0..800 {
            let word = Word::from(random_formative(&mut rng));
            for config in &configs {
                assert_roundtrip(&word, config);
            }
        }
    }

    #[test]
    fn test_random_referentials_roundtrip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..300 {
            let word = Word::from(random_referential(&mut rng));
            assert_roundtrip(&word, &CodecConfig::default());
        }
    }
}
