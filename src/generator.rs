//! Policy-driven password generation.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::policy::Policy;
use crate::Password;

/// Generates passwords satisfying a set of [`Policy`] values.
///
/// Construction merges the policies into a sampling alphabet and a combined
/// acceptance check; generation is rejection sampling against that check.
/// A generator is immutable after construction, so sharing one between
/// threads only requires that each caller bring its own RNG.
pub struct Generator {
    alphabet: Vec<char>,
    /// Anchored class over the merged alphabet; `None` when no policy
    /// contributes letters.
    membership: Option<Regex>,
    policies: Vec<Policy>,
}

impl Generator {
    /// Build a generator from the given policies.
    ///
    /// The alphabet is the concatenation of every policy's letters in input
    /// order. Duplicates are kept, so a character contributed by two policies
    /// is sampled proportionally more often. An empty policy list is replaced
    /// by the single default policy.
    ///
    /// The acceptance check is a single anchored re-validation of the whole
    /// candidate: every character must belong to the merged alphabet, and
    /// every policy that contributes no letters (the length bounds) must
    /// accept the candidate. Character classes supplied as separate policies
    /// therefore merge, exactly as their letters do.
    pub fn new(policies: Vec<Policy>) -> Generator {
        let policies = if policies.is_empty() {
            vec![Policy::default()]
        } else {
            policies
        };
        let alphabet: Vec<char> = policies
            .iter()
            .flat_map(|policy| policy.letters().iter().copied())
            .collect();
        let membership = if alphabet.is_empty() {
            None
        } else {
            let class: String = alphabet.iter().collect();
            let re = Regex::new(&format!("^[{}]+$", regex::escape(&class)))
                .expect("an escaped character class always parses");
            Some(re)
        };
        Generator {
            alphabet,
            membership,
            policies,
        }
    }

    /// Generate a password of `length` characters using the thread RNG.
    ///
    /// Candidates are sampled uniformly with replacement from the merged
    /// alphabet and re-validated as a whole; the first accepted candidate is
    /// returned. The loop has no iteration cap: a policy set no string of
    /// the requested length can satisfy (conflicting length bounds, or a
    /// minimum length with no contributing letters) never terminates.
    /// [`Generator::generate_bounded`] fails instead of hanging.
    pub fn generate(&self, length: usize) -> Password {
        self.generate_with(&mut rand::thread_rng(), length)
    }

    /// Generate a password of `length` characters, sampling from the
    /// supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R, length: usize) -> Password {
        loop {
            let candidate = self.sample(rng, length);
            if self.is_valid(&candidate) {
                return Password::from(candidate);
            }
        }
    }

    /// Like [`Generator::generate`], but give up after `max_attempts`
    /// rejected candidates.
    pub fn generate_bounded(
        &self,
        length: usize,
        max_attempts: usize,
    ) -> Result<Password, GenerateError> {
        let mut rng = rand::thread_rng();
        for _ in 0..max_attempts {
            let candidate = self.sample(&mut rng, length);
            if self.is_valid(&candidate) {
                return Ok(Password::from(candidate));
            }
        }
        Err(GenerateError::MaxAttemptsExceeded { max_attempts })
    }

    /// The merged sampling alphabet, in policy order.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn sample<R: Rng>(&self, rng: &mut R, length: usize) -> String {
        if self.alphabet.is_empty() {
            // Length-bound-only policy sets contribute no letters; the only
            // reachable candidate is the empty string.
            return String::new();
        }
        let mut candidate = String::with_capacity(length);
        for _ in 0..length {
            candidate.push(*self.alphabet.choose(rng).unwrap());
        }
        candidate
    }

    fn is_valid(&self, candidate: &str) -> bool {
        let in_alphabet = match &self.membership {
            Some(class) => class.is_match(candidate),
            None => candidate.is_empty(),
        };
        in_alphabet
            && self
                .policies
                .iter()
                .filter(|policy| policy.letters().is_empty())
                .all(|policy| policy.is_valid(candidate))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(
        "no candidate satisfied every policy after {max_attempts} attempts; \
         the policy set may be unsatisfiable"
    )]
    MaxAttemptsExceeded { max_attempts: usize },
}
