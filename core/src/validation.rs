//! Field-level validation shared by the reservation and contact forms.
//!
//! Rules return plain booleans; the forms decide which message to attach.
//! Lengths are counted in Unicode scalar values, not bytes or UTF-16 units.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// One message per failing field, ordered by the field enum's declaration
/// order so errors render in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, &'static str>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: F, message: &'static str) {
        self.errors.insert(field, message);
    }

    /// Drops the error for `field`, returning whether one was present.
    pub fn clear(&mut self, field: F) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn get(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }
}

/// Accepted email shape: `local@domain.tld`, no whitespace, one `@`.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn has_max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("jo@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.in"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "bad",
            "jo@",
            "@example.com",
            "jo@example",
            "jo@.com",
            "jo@example.",
            "jo@@example.com",
            "jo@exa@mple.com",
            "jo @example.com",
            "jo@example.com ",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn dot_anywhere_inside_the_domain_is_enough() {
        assert!(is_valid_email("jo@a.b."));
        assert!(is_valid_email("jo@.a.b"));
    }

    #[test]
    fn lengths_count_characters() {
        assert!(has_min_chars("Jo", 2));
        assert!(!has_min_chars("J", 2));
        assert!(has_min_chars("Zé", 2));
        assert!(has_max_chars("Zoë", 3));
        assert!(!has_max_chars("abcd", 3));
    }

    #[test]
    fn astral_characters_count_once() {
        assert!(!has_min_chars("😀", 2));
        assert!(has_min_chars("😀😀", 2));
        assert!(has_max_chars(&"😀".repeat(3), 3));
    }

    #[test]
    fn field_errors_keep_declaration_order() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        enum F {
            A,
            B,
            C,
        }
        let mut errors = FieldErrors::new();
        errors.insert(F::C, "c");
        errors.insert(F::A, "a");
        errors.insert(F::B, "b");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![F::A, F::B, F::C]);
        assert!(errors.clear(F::B));
        assert!(!errors.clear(F::B));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(F::C), Some("c"));
    }
}
