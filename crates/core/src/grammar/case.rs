//! The 68 cases and their Vc forms.
//!
//! Cases 1–36 fill series 1–4 × degrees 1–9. Cases 37–68 reuse series 1–4 at
//! degrees 1–4 and 6–9 and are told apart by a glottal stop (or, in
//! concatenated formatives, by ultimate stress).

use super::categories::{skip_five_degree, skip_five_index};
use super::vowel::VowelForm;
use crate::error::{CodecError, Result};

category! {
    pub enum Case {
        // Transrelative
        Thm => "THM", Ins => "INS", Abs => "ABS", Aff => "AFF", Stm => "STM",
        Eff => "EFF", Erg => "ERG", Dat => "DAT", Ind => "IND",
        // Appositive
        Pos => "POS", Prp => "PRP", Gen => "GEN", Att => "ATT", Pdc => "PDC",
        Itp => "ITP", Ogn => "OGN", Idp => "IDP", Par => "PAR",
        // Associative
        Apl => "APL", Pur => "PUR", Tra => "TRA", Dfr => "DFR", Crs => "CRS",
        Tsp => "TSP", Cmm => "CMM", Cmp => "CMP", Csd => "CSD",
        // Adverbial
        Fun => "FUN", Tfm => "TFM", Cla => "CLA", Rsl => "RSL", Csm => "CSM",
        Con => "CON", Avr => "AVR", Cvs => "CVS", Sit => "SIT",
        // Relational
        Prn => "PRN", Dsp => "DSP", Cor => "COR", Cps => "CPS", Com => "COM",
        Utl => "UTL", Prd => "PRD", Rlt => "RLT",
        // Affinitive
        Act => "ACT", Asi => "ASI", Ess => "ESS", Trm => "TRM", Sel => "SEL",
        Cfm => "CFM", Dep => "DEP", Voc => "VOC",
        // Spatio-temporal I
        Loc => "LOC", Atd => "ATD", All => "ALL", Abl => "ABL", Ori => "ORI",
        Irl => "IRL", Inv => "INV", Nav => "NAV",
        // Spatio-temporal II
        Cnr => "CNR", Ass => "ASS", Per => "PER", Pro => "PRO", Pcv => "PCV",
        Pcr => "PCR", Elp => "ELP", Plm => "PLM",
    }
}

impl Case {
    /// Whether the case belongs to the upper half (cases 37–68).
    pub fn is_over_36(self) -> bool {
        self.index() >= 36
    }

    /// The Vc vowel without any glottal stop, plus the upper-half flag.
    pub fn vowel(self) -> (VowelForm, bool) {
        let i = self.index();
        if i < 36 {
            (VowelForm::new((i / 9) as u8 + 1, (i % 9) as u8 + 1), false)
        } else {
            let j = i - 36;
            (VowelForm::new((j / 8) as u8 + 1, skip_five_degree(j % 8)), true)
        }
    }

    /// Vc with the glottal stop applied for upper-half cases.
    pub fn vc(self) -> VowelForm {
        let (v, over) = self.vowel();
        v.with_glottal_stop(over)
    }

    /// Resolve a Vc vowel given the upper-half flag (derived from a glottal
    /// stop or from stress, depending on the word).
    pub fn from_vowel(vc: VowelForm, over_36: bool, slot: &'static str) -> Result<Case> {
        let unknown = || CodecError::UnknownCaseForm { form: vc.to_string(), slot };
        if vc.degree == 0 {
            return Err(unknown());
        }
        let series = vc.sequence as usize - 1;
        let index = if over_36 {
            36 + series * 8 + skip_five_index(vc.degree).ok_or_else(unknown)?
        } else {
            series * 9 + vc.degree as usize - 1
        };
        Case::from_index(index).ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_count() {
        assert_eq!(Case::ALL.len(), 68);
        assert_eq!(Case::Sit.index(), 35);
        assert_eq!(Case::Plm.index(), 67);
    }

    #[test]
    fn test_lower_half() {
        let (v, over) = Case::Tsp.vowel();
        assert!(!over);
        assert_eq!(v.as_str(), "uö");
        assert_eq!(Case::from_vowel(v, false, "Vc").unwrap(), Case::Tsp);
    }

    #[test]
    fn test_upper_half_skips_degree_five() {
        let (v, over) = Case::Prn.vowel();
        assert!(over);
        assert_eq!(v.as_str(), "a");
        let (v, _) = Case::Com.vowel();
        assert_eq!(v.degree, 6);
        assert!(Case::from_vowel(VowelForm::new(1, 5), true, "Vc").is_err());
    }

    #[test]
    fn test_every_case_roundtrips() {
        for &case in Case::ALL {
            let (v, over) = case.vowel();
            assert_eq!(Case::from_vowel(v, over, "Vc").unwrap(), case);
        }
    }
}
