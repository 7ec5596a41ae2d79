//! Raw value sets as reported by a single source

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw string values keyed by parameter set, then parameter name.
///
/// The root set is the empty string. Ordering is lexical, so iterating a
/// value set is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamValues(BTreeMap<String, BTreeMap<String, String>>);

impl ParamValues {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, set_name: &str, param_name: &str) -> Option<&str> {
        self.0
            .get(set_name)
            .and_then(|set| set.get(param_name))
            .map(String::as_str)
    }

    pub fn contains(&self, set_name: &str, param_name: &str) -> bool {
        self.get(set_name, param_name).is_some()
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(
        &mut self,
        set_name: impl Into<String>,
        param_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0
            .entry(set_name.into())
            .or_default()
            .insert(param_name.into(), value.into())
    }

    /// Remove a value; a set left without values is dropped
    pub fn remove(&mut self, set_name: &str, param_name: &str) -> Option<String> {
        let set = self.0.get_mut(set_name)?;
        let removed = set.remove(param_name);
        if set.is_empty() {
            self.0.remove(set_name);
        }
        removed
    }

    /// Values of one parameter set
    pub fn set(&self, set_name: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(set_name)
    }

    /// Iterate `(set, param, value)` triples in lexical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.0.iter().flat_map(|(set_name, params)| {
            params
                .iter()
                .map(move |(param, value)| (set_name.as_str(), param.as_str(), value.as_str()))
        })
    }

    /// Apply `f` to every value in place
    pub fn map_values(&mut self, mut f: impl FnMut(&str) -> String) {
        for params in self.0.values_mut() {
            for value in params.values_mut() {
                *value = f(value);
            }
        }
    }

    /// Total number of values across all sets
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S, P, V> FromIterator<(S, P, V)> for ParamValues
where
    S: Into<String>,
    P: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, P, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (set_name, param_name, value) in iter {
            values.insert(set_name, param_name, value);
        }
        values
    }
}

/// Build a [`ParamValues`] from `set => { param => value }` pairs.
///
/// ```
/// use hotparam_core::param_values;
///
/// let values = param_values! {
///     "" => { "server" => "localhost" },
///     "db" => { "host" => "db.internal", "port" => "5432" },
/// };
/// assert_eq!(values.get("db", "port"), Some("5432"));
/// ```
#[macro_export]
macro_rules! param_values {
    () => { $crate::ParamValues::new() };
    ($($set:expr => { $($param:expr => $value:expr),* $(,)? }),* $(,)?) => {{
        let mut values = $crate::ParamValues::new();
        $($(values.insert($set, $param, $value);)*)*
        values
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut values = ParamValues::new();
        assert!(values.is_empty());
        assert_eq!(values.insert("", "port", "8080"), None);
        assert_eq!(values.insert("", "port", "9090"), Some("8080".to_string()));
        assert_eq!(values.get("", "port"), Some("9090"));
        assert_eq!(values.len(), 1);

        assert_eq!(values.remove("", "port"), Some("9090".to_string()));
        assert!(values.set("").is_none());
        assert!(values.is_empty());
    }

    #[test]
    fn test_iter_is_ordered() {
        let values = crate::param_values! {
            "db" => { "port" => "5432", "host" => "h" },
            "" => { "server" => "s" },
        };
        let triples: Vec<_> = values.iter().collect();
        assert_eq!(
            triples,
            vec![("", "server", "s"), ("db", "host", "h"), ("db", "port", "5432")]
        );
    }

    #[test]
    fn test_map_values() {
        let mut values = crate::param_values! { "" => { "a" => " x ", "b" => "y\n" } };
        values.map_values(|v| v.trim().to_string());
        assert_eq!(values.get("", "a"), Some("x"));
        assert_eq!(values.get("", "b"), Some("y"));
    }

    #[test]
    fn test_serde_round_shape() {
        let values = crate::param_values! { "" => { "server" => "localhost" } };
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"":{"server":"localhost"}}"#);
    }
}
