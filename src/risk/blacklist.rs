use std::collections::HashSet;

use crate::domain::order::{normalize_phone, PhoneNumber};

// ============================================================================
// Blacklist Provider - read-only phone lookup
// ============================================================================

/// Anything that can answer "is this phone number blacklisted?"
pub trait BlacklistProvider {
    fn contains(&self, phone: &PhoneNumber) -> bool;
}

/// Exact-match lookup on the raw phone string
impl BlacklistProvider for HashSet<String> {
    fn contains(&self, phone: &PhoneNumber) -> bool {
        HashSet::contains(self, phone.as_str())
    }
}

impl<T: BlacklistProvider + ?Sized> BlacklistProvider for &T {
    fn contains(&self, phone: &PhoneNumber) -> bool {
        (**self).contains(phone)
    }
}

/// Blacklist keyed on the national form of each number
#[derive(Debug, Clone, Default)]
pub struct PhoneBlacklist {
    numbers: HashSet<String>,
}

impl PhoneBlacklist {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            numbers: numbers
                .into_iter()
                .map(|n| normalize_phone(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

impl BlacklistProvider for PhoneBlacklist {
    fn contains(&self, phone: &PhoneNumber) -> bool {
        self.numbers.contains(&phone.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_blacklist_matches_any_format() {
        let blacklist = PhoneBlacklist::new(["+213 555 12 34 56", "0770-11-22-33"]);

        assert_eq!(blacklist.len(), 2);
        assert!(blacklist.contains(&PhoneNumber::new("0555123456")));
        assert!(blacklist.contains(&PhoneNumber::new("00213 770 11 22 33")));
        assert!(!blacklist.contains(&PhoneNumber::new("0661987654")));
    }

    #[test]
    fn test_empty_entries_are_ignored() {
        let blacklist = PhoneBlacklist::new(["", "  "]);
        assert!(blacklist.is_empty());
        assert!(!blacklist.contains(&PhoneNumber::new("")));
    }

    #[test]
    fn test_hash_set_provider_is_exact() {
        let set: HashSet<String> = ["0555123456".to_string()].into_iter().collect();
        assert!(BlacklistProvider::contains(&set, &PhoneNumber::new("0555123456")));
        assert!(!BlacklistProvider::contains(&set, &PhoneNumber::new("+213555123456")));
    }
}
