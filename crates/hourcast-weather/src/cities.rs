//! Ordered, append-only list of tracked cities.

use crate::error::BoardError;

pub const DEFAULT_CITIES: [&str; 3] = ["Austin", "Dallas", "Houston"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityList {
    names: Vec<String>,
}

impl Default for CityList {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES)
    }
}

impl CityList {
    /// Build from seed names. Blank and case-insensitive duplicate seeds are dropped.
    pub fn new<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self { names: Vec::new() };
        for name in seed {
            match list.check_new(name.as_ref()) {
                Ok(name) => list.names.push(name),
                Err(e) => tracing::warn!("Skipping seed city: {}", e),
            }
        }
        list
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.names.iter().any(|n| n.to_lowercase() == wanted)
    }

    /// Validate a candidate name, returning it trimmed with its casing kept.
    pub fn check_new(&self, name: &str) -> Result<String, BoardError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(BoardError::BlankInput);
        }
        if self.contains(trimmed) {
            return Err(BoardError::AlreadyExists(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Append a name already accepted by [`CityList::check_new`].
    pub(crate) fn push(&mut self, name: String) {
        self.names.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        let list = CityList::default();
        assert_eq!(list.names(), ["Austin", "Dallas", "Houston"]);
    }

    #[test]
    fn test_duplicate_any_case() {
        let list = CityList::default();
        assert!(matches!(list.check_new("austin"), Err(BoardError::AlreadyExists(_))));
        assert!(matches!(list.check_new("HOUSTON"), Err(BoardError::AlreadyExists(_))));
        assert!(matches!(list.check_new(" Dallas "), Err(BoardError::AlreadyExists(_))));
    }

    #[test]
    fn test_blank_input() {
        let list = CityList::default();
        assert!(matches!(list.check_new(""), Err(BoardError::BlankInput)));
        assert!(matches!(list.check_new("   "), Err(BoardError::BlankInput)));
    }

    #[test]
    fn test_new_name_keeps_casing() {
        let list = CityList::default();
        assert_eq!(list.check_new("  tULSA ").unwrap(), "tULSA");
    }

    #[test]
    fn test_seed_duplicates_dropped() {
        let list = CityList::new(["Austin", "austin", "", "Tulsa"]);
        assert_eq!(list.names(), ["Austin", "Tulsa"]);
        assert_eq!(list.get(1), Some("Tulsa"));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut list = CityList::default();
        let name = list.check_new("Tulsa").unwrap();
        list.push(name);
        assert_eq!(list.len(), 4);
        assert_eq!(list.names().last().map(String::as_str), Some("Tulsa"));
    }
}
