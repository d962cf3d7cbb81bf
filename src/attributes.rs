//! Host-supplied dial attributes.
//!
//! A dial reads its initial configuration from whatever the host attaches to
//! the drawing surface. Two hosts are supported: raw element attributes, where
//! every dial key is stored under a `data-` prefix, and an already-unpacked
//! data set keyed by the bare name. Both answer the same lookups.

use std::collections::HashMap;

/// Keys a dial understands.
pub const DIAL_KEYS: [&str; 9] = [
    "value",
    "units",
    "sweep",
    "rotation",
    "minvalue",
    "maxvalue",
    "tickmarks",
    "fontfamily",
    "bgcolor",
];

/// Lookup of a dial attribute by its unprefixed name.
pub trait AttributeSource {
    fn attribute(&self, key: &str) -> Option<&str>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// No attributes at all; every key falls back to its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeSource for NoAttributes {
    fn attribute(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// Raw element attributes, e.g. `data-maxvalue="160"`.
#[derive(Debug, Clone, Default)]
pub struct ElementAttributes {
    attrs: HashMap<String, String>,
}

impl ElementAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

impl FromIterator<(String, String)> for ElementAttributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            attrs: iter.into_iter().collect(),
        }
    }
}

impl AttributeSource for ElementAttributes {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attrs
            .get(&format!("data-{key}"))
            .map(String::as_str)
    }
}

/// Data attributes with the `data-` prefix already stripped.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    values: HashMap<String, String>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Parses `key=value` pairs, tolerating a leading `data-` on the key.
    /// Items without `=` are skipped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Self {
        let values = pairs
            .into_iter()
            .filter_map(|pair| pair.split_once('='))
            .map(|(key, value)| {
                let key = key.trim();
                let key = key.strip_prefix("data-").unwrap_or(key);
                (key.to_ascii_lowercase(), value.trim().to_string())
            })
            .collect();
        Self { values }
    }
}

impl AttributeSource for DataSet {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
