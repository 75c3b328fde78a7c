use super::key::Key;

const MAX_PREALLOC: usize = 10;

/// Every ordering of `1..=k`, in lexicographic order.
///
/// Starts at the identity key and steps with [`next_permutation`], so memory
/// stays at one key regardless of `k`. Yields nothing for `k = 0`.
pub struct Permutations {
    current: Option<Vec<usize>>,
}

impl Permutations {
    pub fn new(k: usize) -> Self {
        let current = if k == 0 {
            None
        } else {
            Some((1..=k).collect())
        };
        Self { current }
    }
}

impl Iterator for Permutations {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        let current = self.current.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.current = Some(successor);
        }
        Some(Key::from_permutation(current))
    }
}

/// All `k!` keys of size `k`, lexicographic.
pub fn generate(k: usize) -> Vec<Key> {
    let mut keys = Vec::with_capacity(factorial(k).min(factorial(MAX_PREALLOC)));
    keys.extend(Permutations::new(k));
    keys
}

/// Rearranges `values` into the next lexicographically greater ordering.
/// Returns `false` (leaving `values` untouched) when it is already the last.
pub fn next_permutation(values: &mut [usize]) -> bool {
    let n = values.len();
    if n < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `pivot`.
    let mut pivot = n - 1;
    while pivot > 0 && values[pivot - 1] >= values[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }

    let mut successor = n - 1;
    while values[successor] <= values[pivot - 1] {
        successor -= 1;
    }
    values.swap(pivot - 1, successor);
    values[pivot..].reverse();
    true
}

/// `k!`, saturating at `usize::MAX`.
pub fn factorial(k: usize) -> usize {
    (1..=k).fold(1usize, |acc, n| acc.saturating_mul(n))
}
