//! Constrained random digit sequence generation
//!
//! Rules for every generated sequence:
//! - Each digit drawn uniformly from 0-9
//! - No two adjacent digits are equal
//! - The sequence differs from the previous trial's sequence

use rand::Rng;
use std::fmt;

/// An ordered list of single digits (0-9), one trial's stimulus
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence(Vec<u8>);

impl Sequence {
    /// Wrap raw digits. Callers must pass values in 0-9.
    pub fn from_digits(digits: Vec<u8>) -> Self {
        debug_assert!(digits.iter().all(|&d| d <= 9));
        Sequence(digits)
    }

    /// Digits in presentation order
    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// Generate a sequence of `length` digits honoring the generation constraints.
///
/// Builds left-to-right, redrawing each digit until it differs from its
/// predecessor; the finished candidate is redrawn from scratch if it equals
/// `forbidden`. Terminates with probability 1 for any `length >= 1`.
pub fn generate<R: Rng>(rng: &mut R, length: usize, forbidden: Option<&Sequence>) -> Sequence {
    loop {
        let mut digits: Vec<u8> = Vec::with_capacity(length);
        for _ in 0..length {
            loop {
                let next = rng.gen_range(0..=9u8);
                if digits.last() != Some(&next) {
                    digits.push(next);
                    break;
                }
            }
        }

        let candidate = Sequence(digits);
        if Some(&candidate) != forbidden {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_length_and_digit_range() {
        let mut r = rng(1);
        for length in 1..=12 {
            let seq = generate(&mut r, length, None);
            assert_eq!(seq.len(), length);
            assert!(seq.digits().iter().all(|&d| d <= 9));
        }
    }

    #[test]
    fn test_no_adjacent_repeats() {
        let mut r = rng(2);
        for _ in 0..200 {
            let seq = generate(&mut r, 8, None);
            for pair in seq.digits().windows(2) {
                assert_ne!(pair[0], pair[1], "adjacent repeat in {}", seq);
            }
        }
    }

    #[test]
    fn test_never_repeats_forbidden() {
        let mut r = rng(3);
        let mut previous = generate(&mut r, 2, None);
        for _ in 0..500 {
            let next = generate(&mut r, 2, Some(&previous));
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_length_one_degenerate_case() {
        // A single forbidden digit leaves nine alternatives.
        let mut r = rng(4);
        let forbidden = Sequence::from_digits(vec![7]);
        for _ in 0..100 {
            let seq = generate(&mut r, 1, Some(&forbidden));
            assert_eq!(seq.len(), 1);
            assert_ne!(seq, forbidden);
        }
    }

    #[test]
    fn test_display_concatenates_digits() {
        let seq = Sequence::from_digits(vec![4, 0, 9, 2]);
        assert_eq!(seq.to_string(), "4092");
    }
}
