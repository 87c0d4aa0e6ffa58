//! CGI-style query parameter access on top of the raw query string.

use crate::Uri;
use crate::encode::{decode, encode_component};

fn decode_param(raw: &str) -> String {
    decode(raw).replace('+', " ")
}

impl Uri {
    /// All `(key, value)` pairs in query order, decoded (`+` reads as space).
    /// Keys without `=` get an empty value.
    pub fn all_parameters(&self) -> Vec<(String, String)> {
        let Some(query) = self.raw_query() else {
            return Vec::new();
        };
        query
            .split(['&', '?'])
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode_param(key), decode_param(value)),
                None => (decode_param(pair), String::new()),
            })
            .collect()
    }

    /// Replaces the query with `params`, encoding each key and value.
    /// Empty values are written as a bare key.
    pub fn set_all_parameters<K, V>(&mut self, params: &[(K, V)]) -> &mut Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = String::new();
        for (key, value) in params {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&encode_component(key.as_ref()));
            let value = value.as_ref();
            if !value.is_empty() {
                query.push('=');
                query.push_str(&encode_component(value));
            }
        }
        self.set_raw_query((!query.is_empty()).then_some(query))
    }

    /// Replaces the values stored under `key`, keeping the positions of
    /// existing occurrences and appending any surplus values at the end.
    pub fn set_parameter_values<V: AsRef<str>>(&mut self, key: &str, values: &[V]) -> &mut Self {
        let mut replacements = values.iter().map(|v| v.as_ref().to_string());
        let mut params = Vec::new();
        for (k, v) in self.all_parameters() {
            if k == key {
                if let Some(value) = replacements.next() {
                    params.push((k, value));
                }
            } else {
                params.push((k, v));
            }
        }
        params.extend(replacements.map(|value| (key.to_string(), value)));
        self.set_all_parameters(&params)
    }

    pub fn remove_parameter(&mut self, key: &str) -> &mut Self {
        self.set_parameter_values::<&str>(key, &[])
    }

    pub fn parameter_values(&self, key: &str) -> Vec<String> {
        self.all_parameters()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    /// First value stored under `key`.
    pub fn parameter_value(&self, key: &str) -> Option<String> {
        self.all_parameters()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use crate::Uri;

    fn parse(s: &str) -> Uri {
        Uri::parse(s).unwrap_or_else(|| panic!("failed to parse {s:?}"))
    }

    #[test]
    fn reads_parameters_in_order() {
        let uri = parse("/p?a=1&b=two+words&a=3&flag");
        assert_eq!(
            uri.all_parameters(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
                ("a".to_string(), "3".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
        assert_eq!(uri.parameter_values("a"), vec!["1", "3"]);
        assert_eq!(uri.parameter_value("b").as_deref(), Some("two words"));
        assert_eq!(uri.parameter_value("missing"), None);
    }

    #[test]
    fn rewrites_values_in_place() {
        let mut uri = parse("/p?a=1&b=2&a=3");
        uri.set_parameter_values("a", &["x"]);
        assert_eq!(uri.to_string(), "/p?a=x&b=2");
        uri.set_parameter_values("c", &["y z"]);
        assert_eq!(uri.to_string(), "/p?a=x&b=2&c=y%20z");
    }

    #[test]
    fn removing_last_parameter_clears_query() {
        let mut uri = parse("/p?a=1");
        uri.remove_parameter("a");
        assert_eq!(uri.raw_query(), None);
        assert_eq!(uri.to_string(), "/p");
    }

    #[test]
    fn empty_values_become_bare_keys() {
        let mut uri = parse("http://h/");
        uri.set_all_parameters(&[("k", ""), ("v", "1")]);
        assert_eq!(uri.to_string(), "http://h/?k&v=1");
    }
}
