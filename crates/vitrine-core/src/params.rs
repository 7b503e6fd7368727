//! Query-string rendering in the backend's bracket notation.
//!
//! A nested parameter mapping serializes to `&`-joined pairs: a value at
//! `parent.child` becomes `parent[child]=value`, an array becomes repeated
//! `key[]=v` pairs in element order. Values and key segments are
//! percent-encoded; the bracket structure itself stays literal.

/// A parameter value: scalar, array, or nested mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    List(Vec<ParamValue>),
    Map(Params),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

impl From<Params> for ParamValue {
    fn from(map: Params) -> Self {
        ParamValue::Map(map)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(items: Vec<ParamValue>) -> Self {
        ParamValue::List(items)
    }
}

/// Insertion-ordered mapping of parameter names to values.
///
/// Order of top-level keys in the rendered string follows insertion order,
/// which keeps serialization deterministic for identical call sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a pair. Duplicate keys are kept; callers that need
    /// replace-by-key semantics enforce them before inserting.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.push((key.into(), value.into()));
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the mapping as a URL query string.
    ///
    /// Pure and total: no I/O, never fails, empty mapping renders as `""`.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in self.iter() {
            push_pairs(&mut pairs, &encode_segment(key), value);
        }
        pairs.join("&")
    }
}

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn push_pairs(out: &mut Vec<String>, key: &str, value: &ParamValue) {
    match value {
        ParamValue::Str(s) => out.push(format!("{key}={}", urlencoding::encode(s))),
        ParamValue::Int(n) => out.push(format!("{key}={n}")),
        ParamValue::List(items) => {
            let item_key = format!("{key}[]");
            for item in items {
                push_pairs(out, &item_key, item);
            }
        }
        ParamValue::Map(map) => {
            for (child, child_value) in map.iter() {
                let child_key = format!("{key}[{}]", encode_segment(child));
                push_pairs(out, &child_key, child_value);
            }
        }
    }
}
