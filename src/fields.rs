use indexmap::IndexMap;

/// Insertion-ordered collection of the fields submitted to PayPal.
///
/// Keys are unique; `set` overwrites. Values are accepted as-is, PayPal
/// validates them on its side.
#[derive(Debug, Clone)]
pub struct FieldMap {
    inner: IndexMap<String, String>,
}

impl FieldMap {
    /// Starts with the return method preset to POST (`rm=2`). The caller may
    /// overwrite it like any other field.
    pub fn new() -> Self {
        let mut map = Self {
            inner: IndexMap::new(),
        };
        map.set("rm", "2");
        map
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs sorted by field name, for the debug dump table.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by_key(|(k, _)| *k);
        pairs
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new()
    }
}
