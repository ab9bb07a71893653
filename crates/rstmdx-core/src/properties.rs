//! Directive field options (`:key: value` lines).

/// An insertion-ordered set of directive options.
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldList(Vec<(String, String)>);

impl FieldList {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set an option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`FieldList::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get an option value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an option and return its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    /// Iterate over options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = FieldList::new();
        for (k, v) in iter {
            list.set(k, v);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut opts = FieldList::new().with("alt", "first").with("width", "200");
        opts.set("alt", "second");
        let keys: Vec<_> = opts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["alt", "width"]);
        assert_eq!(opts.get("alt"), Some("second"));
    }

    #[test]
    fn test_remove() {
        let mut opts: FieldList = [("align", "center")].into_iter().collect();
        assert_eq!(opts.remove("align").as_deref(), Some("center"));
        assert_eq!(opts.iter().count(), 0);
        assert_eq!(opts.remove("align"), None);
    }
}
