use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{CoreError, Result};
use crate::ordered::OrderedMap;

static NULL: ContentValue = ContentValue::Null;

/// One node of a localized content document.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<ContentValue>),
    Tree(ContentTree),
}

/// Insertion-ordered mapping from key to content node.
///
/// Keys are unique; document order is kept so that every report lists
/// findings in the order the copy was authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTree {
    entries: OrderedMap<ContentValue>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: ContentValue) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&ContentValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a dotted path such as `hero.title.highlight`.
    ///
    /// Tree segments match keys, list segments must be numeric indices.
    /// Returns `None` as soon as a segment cannot be followed.
    pub fn get_path(&self, path: &str) -> Option<&ContentValue> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                ContentValue::Tree(tree) => tree.get(segment)?,
                ContentValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Like [`ContentTree::get_path`], but unresolvable paths yield the
    /// `Null` sentinel so two missing values compare equal.
    pub fn resolve_or_null(&self, path: &str) -> &ContentValue {
        self.get_path(path).unwrap_or(&NULL)
    }

    /// Dotted key paths of every node in pre-order.
    ///
    /// Intermediate trees contribute their own path before their children.
    /// Lists are leaves: their items are not enumerated.
    pub fn key_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_key_paths(self, None, &mut paths);
        paths
    }

    /// Scalar leaves (text and numbers) one per line, in pre-order.
    pub fn flat_text(&self) -> String {
        let mut lines = Vec::new();
        for (_, value) in self.iter() {
            value.push_flat_lines(&mut lines);
        }
        lines.join("\n")
    }
}

fn collect_key_paths(tree: &ContentTree, prefix: Option<&str>, out: &mut Vec<String>) {
    for (key, value) in tree.iter() {
        let full = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.to_string(),
        };
        if let ContentValue::Tree(child) = value {
            out.push(full.clone());
            collect_key_paths(child, Some(&full), out);
        } else {
            out.push(full);
        }
    }
}

impl ContentValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ContentValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&ContentTree> {
        match self {
            ContentValue::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Human-readable rendering: text verbatim, everything else as compact JSON.
    pub fn render(&self) -> String {
        match self {
            ContentValue::Text(text) => text.clone(),
            other => Value::from(other).to_string(),
        }
    }

    /// Scalar leaves of this node, one per line, in pre-order.
    pub fn flat_text(&self) -> String {
        let mut lines = Vec::new();
        self.push_flat_lines(&mut lines);
        lines.join("\n")
    }

    fn push_flat_lines(&self, lines: &mut Vec<String>) {
        match self {
            ContentValue::Text(text) => lines.push(text.clone()),
            ContentValue::Number(number) => lines.push(number.to_string()),
            ContentValue::List(items) => {
                for item in items {
                    item.push_flat_lines(lines);
                }
            }
            ContentValue::Tree(tree) => {
                for (_, value) in tree.iter() {
                    value.push_flat_lines(lines);
                }
            }
            ContentValue::Null | ContentValue::Bool(_) => {}
        }
    }
}

impl From<Value> for ContentValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ContentValue::Null,
            Value::Bool(flag) => ContentValue::Bool(flag),
            Value::Number(number) => ContentValue::Number(number),
            Value::String(text) => ContentValue::Text(text),
            Value::Array(items) => {
                ContentValue::List(items.into_iter().map(ContentValue::from).collect())
            }
            Value::Object(map) => ContentValue::Tree(ContentTree::from(map)),
        }
    }
}

impl From<Map<String, Value>> for ContentTree {
    fn from(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, value)| (key, ContentValue::from(value)))
            .collect();
        Self { entries }
    }
}

impl TryFrom<Value> for ContentTree {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(ContentTree::from(map)),
            other => Err(CoreError::InvalidContent(format!(
                "content root must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<&ContentValue> for Value {
    fn from(value: &ContentValue) -> Self {
        match value {
            ContentValue::Null => Value::Null,
            ContentValue::Bool(flag) => Value::Bool(*flag),
            ContentValue::Number(number) => Value::Number(number.clone()),
            ContentValue::Text(text) => Value::String(text.clone()),
            ContentValue::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            ContentValue::Tree(tree) => Value::from(tree),
        }
    }
}

impl From<&ContentTree> for Value {
    fn from(tree: &ContentTree) -> Self {
        let map = tree
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

impl Serialize for ContentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ContentValue::Null => serializer.serialize_unit(),
            ContentValue::Bool(flag) => serializer.serialize_bool(*flag),
            ContentValue::Number(number) => number.serialize(serializer),
            ContentValue::Text(text) => serializer.serialize_str(text),
            ContentValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ContentValue::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for ContentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContentValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ContentValue::from)
    }
}

impl<'de> Deserialize<'de> for ContentTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ContentTree::try_from(value).map_err(D::Error::custom)
    }
}

/// Read and parse one language's content document.
pub fn load_content(path: &Path) -> Result<ContentTree> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    ContentTree::try_from(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
