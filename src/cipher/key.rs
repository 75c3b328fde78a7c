use crate::error::{CrackError, CrackResult};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column order: a permutation of `1..=k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Key(Vec<usize>);

impl Key {
    /// Validates that `values` is a permutation of `1..=values.len()`.
    pub fn new(values: Vec<usize>) -> CrackResult<Self> {
        if values.is_empty() {
            return Err(CrackError::InvalidKey("key must not be empty".into()));
        }
        let k = values.len();
        let mut seen = vec![false; k];
        for &v in &values {
            if v == 0 || v > k {
                return Err(CrackError::InvalidKey(format!(
                    "value {} is outside 1..={}",
                    v, k
                )));
            }
            if seen[v - 1] {
                return Err(CrackError::InvalidKey(format!("value {} appears twice", v)));
            }
            seen[v - 1] = true;
        }
        Ok(Self(values))
    }

    // Callers guarantee the permutation invariant.
    pub(crate) fn from_permutation(values: Vec<usize>) -> Self {
        debug_assert!(Self::new(values.clone()).is_ok());
        Self(values)
    }

    fn from_ranking(values: &[usize]) -> Self {
        let mut positions: Vec<usize> = (0..values.len()).collect();
        positions.sort_by_key(|&pos| (values[pos], pos));

        let mut ranks = vec![0; values.len()];
        for (rank, &pos) in positions.iter().enumerate() {
            ranks[pos] = rank + 1;
        }
        Self(ranks)
    }

    /// The identity key `[1, 2, ..., k]`.
    pub fn identity(k: usize) -> Self {
        Self((1..=k).collect())
    }

    pub fn random(k: usize, rng: &mut Rng) -> Self {
        let mut values: Vec<usize> = (1..=k).collect();
        rng.shuffle(&mut values);
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[usize] {
        &self.0
    }

    /// Key positions sorted by ascending key value: the order in which
    /// columns are read out (encode) or filled (decode).
    pub fn column_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.0.len()).collect();
        order.sort_by_key(|&pos| self.0[pos]);
        order
    }

    /// Display label, e.g. `[2, 1, 3]`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// Accepts `"31524"` (one digit per column) or a separated list such as
/// `"3,1,5,2,4"`, `"[2, 1]"` or `"10 2 1 ..."`.
///
/// Values that are not already a permutation of `1..=k` are read as a
/// ranking, so `"57183"` becomes `[3, 4, 1, 5, 2]`. Equal values rank left
/// to right. A `0` anywhere is rejected.
impl FromStr for Key {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']').trim();
        let separated = trimmed.contains(|c: char| c == ',' || c.is_whitespace());

        let values: Vec<usize> = if separated {
            trimmed
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<usize>()
                        .map_err(|_| CrackError::InvalidKey(format!("'{}' is not a number", part)))
                })
                .collect::<CrackResult<_>>()?
        } else {
            trimmed
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as usize)
                        .ok_or_else(|| CrackError::InvalidKey(format!("'{}' is not a digit", c)))
                })
                .collect::<CrackResult<_>>()?
        };

        if values.is_empty() {
            return Err(CrackError::InvalidKey("key must not be empty".into()));
        }
        if values.contains(&0) {
            return Err(CrackError::InvalidKey(format!(
                "'{}' contains 0; key values start at 1",
                s.trim()
            )));
        }
        Ok(Key::new(values.clone()).unwrap_or_else(|_| Key::from_ranking(&values)))
    }
}

impl TryFrom<Vec<usize>> for Key {
    type Error = CrackError;

    fn try_from(values: Vec<usize>) -> Result<Self, Self::Error> {
        Key::new(values)
    }
}

impl From<Key> for Vec<usize> {
    fn from(key: Key) -> Self {
        key.0
    }
}
