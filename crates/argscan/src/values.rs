use indexmap::IndexMap;

/// Raw parse result: declared key to the ordered values recorded for it.
///
/// Keys iterate in first-recorded order. A key is absent only when nothing
/// was given and no default applied (an optional, non-repeated positional).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMap {
    values: IndexMap<String, Vec<String>>,
}

impl ValueMap {
    /// All values recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first().map(String::as_str))
    }

    /// Get the last value for a key (later occurrences win).
    pub fn last(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.last().map(String::as_str))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.values
    }
}

impl ValueMap {
    pub(crate) fn push(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .entry(key.to_string())
            .or_default()
            .push(value.into());
    }

    /// Ensure `key` exists, possibly with no values.
    pub(crate) fn touch(&mut self, key: &str) {
        self.values.entry(key.to_string()).or_default();
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (key, values) in iter {
            let key = key.into();
            map.touch(&key);
            for v in values {
                map.push(&key, v);
            }
        }
        map
    }
}
