use indexmap::map::Entry;
use indexmap::IndexMap;
use url::form_urlencoded;

/// Value of one raw query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    /// Repeated parameter, e.g. `?tag=a&tag=b`
    Multi(Vec<String>),
}

impl ParamValue {
    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(first) => {
                *self = ParamValue::Multi(vec![std::mem::take(first), value]);
            }
            ParamValue::Multi(values) => values.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Raw parameters in first-appearance order of their keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    entries: IndexMap<String, ParamValue>,
}

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string. A leading `?` is ignored
    /// and repeated keys collapse into one multi-valued entry.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.append(&key, value.into_owned());
        }
        params
    }

    /// Set `key`, replacing any previous value but keeping its position
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Add one more value for `key`, turning it multi-valued if already present
    pub fn append(&mut self, key: &str, value: String) {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut existing) => existing.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(ParamValue::Single(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawParameters
where
    K: AsRef<str>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key.as_ref(), value);
        }
        params
    }
}
