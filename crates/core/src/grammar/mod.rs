//! Category tables: closed bijections between grammatical categories and
//! their surface vowel/consonant forms.
//!
//! Every table is built once and never mutated afterwards.

/// Declares a closed grammatical category whose variants serialize as their
/// standard abbreviations. The first variant is the default.
macro_rules! category {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $abbr:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $abbr)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Zero-based position in declaration order.
            pub fn index(self) -> usize {
                self as usize
            }

            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            pub fn abbr(self) -> &'static str {
                match self {
                    $($name::$variant => $abbr),+
                }
            }

            pub fn from_abbr(abbr: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.abbr().eq_ignore_ascii_case(abbr))
            }

            pub fn is_default(self) -> bool {
                self.index() == 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.abbr())
            }
        }
    };
}

pub mod ca;
pub mod case;
pub mod categories;
pub mod referent;
pub mod vowel;

pub use ca::{Affiliation, Ca, CaShortcut, Configuration, Essence, Extension, Perspective};
pub use case::Case;
pub use categories::*;
pub use referent::{Referent, ReferentEffect, ReferentList, ReferentTarget};
pub use vowel::VowelForm;

/// Build every lookup table now instead of on first use.
pub fn preload() {
    vowel::preload_table();
    ca::table();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preload_then_lookup() {
        preload();
        preload();
        assert_eq!(Ca::parse("l").unwrap(), Ca::default());
        assert_eq!(VowelForm::parse("ou", "Vx").unwrap(), VowelForm::new(2, 6));
    }
}
