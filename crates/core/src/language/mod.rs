//! Letters, stress, and phonotactics of surface words.

pub mod letters;
pub mod phonotactics;
pub mod stress;

pub use letters::{classify, normalize, ConsonantForm, ConsonantKind, LetterForm};
pub use phonotactics::{check_cluster, validate_word, ClusterPosition};
pub use stress::{analyze, Stress, StressInfo};
