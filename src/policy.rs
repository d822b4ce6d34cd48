//! Admissibility policies for generated passwords.

use regex::Regex;

static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static NUMBERS: &str = "0123456789";
static SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A single rule a generated password must satisfy.
///
/// A policy contributes zero or more characters to the sampling alphabet and
/// accepts or rejects whole candidate strings. Policies are immutable once
/// constructed, carry no shared state, and may be reused across any number of
/// [`Generator`](crate::Generator) instances.
#[derive(Debug, Clone)]
pub struct Policy {
    letters: Vec<char>,
    validator: Validator,
}

#[derive(Debug, Clone)]
enum Validator {
    /// Anchored one-or-more character class. `None` when the class is empty
    /// and therefore can never match.
    Characters(Option<Regex>),
    MinLength(usize),
    MaxLength(usize),
}

impl Policy {
    /// Letters `a` through `z`.
    pub fn lowercase() -> Policy {
        Policy::character_class(LOWERCASE, "a-z")
    }

    /// Letters `A` through `Z`.
    pub fn uppercase() -> Policy {
        Policy::character_class(UPPERCASE, "A-Z")
    }

    /// Digits `0` through `9`.
    pub fn numbers() -> Policy {
        Policy::character_class(NUMBERS, "0-9")
    }

    /// The 32 ASCII punctuation characters.
    pub fn symbols() -> Policy {
        Policy::character_class(SYMBOLS, &regex::escape(SYMBOLS))
    }

    /// A caller-chosen character set.
    ///
    /// Behaves like the built-in classes: the letters feed the sampling
    /// alphabet and the predicate accepts exactly the strings made up of
    /// them. An empty set is allowed but its predicate rejects everything.
    pub fn custom(letters: &str) -> Policy {
        Policy::character_class(letters, &regex::escape(letters))
    }

    /// Accept only candidates of at least `min` characters.
    ///
    /// Contributes no letters to the sampling alphabet.
    pub fn min_length(min: usize) -> Policy {
        Policy {
            letters: Vec::new(),
            validator: Validator::MinLength(min),
        }
    }

    /// Accept only candidates of at most `max` characters.
    ///
    /// Contributes no letters to the sampling alphabet.
    pub fn max_length(max: usize) -> Policy {
        Policy {
            letters: Vec::new(),
            validator: Validator::MaxLength(max),
        }
    }

    fn character_class(letters: &str, class: &str) -> Policy {
        Policy {
            letters: letters.chars().collect(),
            validator: Validator::class(class),
        }
    }

    /// The characters this policy contributes to the sampling alphabet.
    /// Empty for the pure length-bound policies.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Whether the whole candidate satisfies this policy.
    pub fn is_valid(&self, candidate: &str) -> bool {
        match &self.validator {
            Validator::Characters(Some(class)) => class.is_match(candidate),
            Validator::Characters(None) => false,
            Validator::MinLength(min) => candidate.chars().count() >= *min,
            Validator::MaxLength(max) => candidate.chars().count() <= *max,
        }
    }
}

impl Default for Policy {
    /// The policy substituted when a generator is given no policies at all:
    /// lowercase, uppercase, numbers, and symbols combined.
    fn default() -> Policy {
        let letters = [LOWERCASE, UPPERCASE, NUMBERS, SYMBOLS].concat();
        let class = format!("a-zA-Z0-9{}", regex::escape(SYMBOLS));
        Policy::character_class(&letters, &class)
    }
}

impl Validator {
    fn class(class: &str) -> Validator {
        if class.is_empty() {
            return Validator::Characters(None);
        }
        // The candidate must consist of one or more class characters, so an
        // empty candidate never satisfies a character-class policy.
        let re = Regex::new(&format!("^[{}]+$", class))
            .expect("an escaped character class always parses");
        Validator::Characters(Some(re))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_accepts_only_its_own_letters() {
        let policy = Policy::lowercase();
        assert_eq!(policy.letters().len(), 26);
        assert!(policy.is_valid("abcxyz"));
        assert!(!policy.is_valid("abcXyz"));
        assert!(!policy.is_valid("abc1"));
        assert!(!policy.is_valid(""));
    }

    #[test]
    fn uppercase_and_numbers_match_their_ranges() {
        assert!(Policy::uppercase().is_valid("AZ"));
        assert!(!Policy::uppercase().is_valid("Az"));
        assert!(Policy::numbers().is_valid("0123456789"));
        assert!(!Policy::numbers().is_valid("012a"));
    }

    #[test]
    fn symbols_rejects_alphanumerics() {
        let policy = Policy::symbols();
        assert_eq!(policy.letters().len(), 32);
        assert!(policy.is_valid("!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"));
        assert!(!policy.is_valid("!a"));
        assert!(!policy.is_valid("!0"));
    }

    #[test]
    fn default_accepts_the_union_of_all_classes() {
        let policy = Policy::default();
        assert_eq!(policy.letters().len(), 26 + 26 + 10 + 32);
        assert!(policy.is_valid("aZ0~"));
        assert!(!policy.is_valid("a Z"));
        assert!(!policy.is_valid(""));
    }

    #[test]
    fn custom_accepts_exactly_the_given_letters() {
        let policy = Policy::custom("abcdef0123456789");
        assert!(policy.is_valid("deadbeef42"));
        assert!(!policy.is_valid("deadbeefg"));
    }

    #[test]
    fn custom_escapes_regex_metacharacters() {
        let policy = Policy::custom("a-z");
        assert!(policy.is_valid("a-z"));
        assert!(policy.is_valid("zza--a"));
        assert!(!policy.is_valid("b"));
    }

    #[test]
    fn empty_custom_rejects_everything() {
        let policy = Policy::custom("");
        assert!(policy.letters().is_empty());
        assert!(!policy.is_valid(""));
        assert!(!policy.is_valid("a"));
    }

    #[test]
    fn length_bounds_count_characters_not_bytes() {
        // Two characters, four bytes.
        let candidate = "éé";
        assert!(Policy::min_length(2).is_valid(candidate));
        assert!(!Policy::min_length(3).is_valid(candidate));
        assert!(Policy::max_length(2).is_valid(candidate));
        assert!(!Policy::max_length(1).is_valid(candidate));
    }

    #[test]
    fn length_bounds_contribute_no_letters() {
        assert!(Policy::min_length(5).letters().is_empty());
        assert!(Policy::max_length(5).letters().is_empty());
        assert!(Policy::min_length(0).is_valid(""));
    }
}
