pub mod grid;
pub mod key;
pub mod permutation;

pub use self::grid::{decode, encode, Grid};
pub use self::key::Key;
pub use self::permutation::Permutations;
