use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::FieldPathError;

pub type DraftMap = BTreeMap<String, DraftValue>;

/// A dot-separated location inside a draft record, e.g. `user.full_name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, FieldPathError> {
        if raw.is_empty() {
            return Err(FieldPathError::Empty);
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(FieldPathError::EmptySegment(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One node of a draft record: either a leaf value or a nested mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DraftValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Map(DraftMap),
}

impl DraftValue {
    /// Text rendering used to populate form inputs. Nested mappings render empty.
    pub fn display_string(&self) -> String {
        match self {
            DraftValue::Text(text) => text.clone(),
            DraftValue::Number(number) => format_number(*number),
            DraftValue::Bool(flag) => flag.to_string(),
            DraftValue::Map(_) => String::new(),
        }
    }

    pub fn as_map(&self) -> Option<&DraftMap> {
        match self {
            DraftValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            DraftValue::Text(text) => !text.is_empty() && text != "false",
            DraftValue::Number(number) => *number != 0.0,
            DraftValue::Bool(flag) => *flag,
            DraftValue::Map(_) => true,
        }
    }

    /// Converts a JSON value; `null` has no draft representation and yields `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(DraftValue::Bool(flag)),
            Value::Number(number) => number.as_f64().map(DraftValue::Number),
            Value::String(text) => Some(DraftValue::Text(text)),
            Value::Array(items) => {
                // Arrays are addressed by index segments, as in `badges.0`
                let map = items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        DraftValue::from_json(item).map(|value| (index.to_string(), value))
                    })
                    .collect();
                Some(DraftValue::Map(map))
            }
            Value::Object(object) => {
                let map = object
                    .into_iter()
                    .filter_map(|(key, item)| DraftValue::from_json(item).map(|value| (key, value)))
                    .collect();
                Some(DraftValue::Map(map))
            }
        }
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

impl From<&str> for DraftValue {
    fn from(value: &str) -> Self {
        DraftValue::Text(value.to_string())
    }
}

impl From<String> for DraftValue {
    fn from(value: String) -> Self {
        DraftValue::Text(value)
    }
}

impl From<f64> for DraftValue {
    fn from(value: f64) -> Self {
        DraftValue::Number(value)
    }
}

impl From<i64> for DraftValue {
    fn from(value: i64) -> Self {
        DraftValue::Number(value as f64)
    }
}

impl From<i32> for DraftValue {
    fn from(value: i32) -> Self {
        DraftValue::Number(f64::from(value))
    }
}

impl From<bool> for DraftValue {
    fn from(value: bool) -> Self {
        DraftValue::Bool(value)
    }
}

impl From<DraftRecord> for DraftValue {
    fn from(value: DraftRecord) -> Self {
        DraftValue::Map(value.fields)
    }
}

/// The user-editable copy of a form's data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DraftRecord {
    fields: DraftMap,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used for form defaults; `key` is a top-level field name.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DraftValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Non-object JSON produces an empty draft.
    pub fn from_json(value: Value) -> Self {
        match DraftValue::from_json(value) {
            Some(DraftValue::Map(fields)) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn fields(&self) -> &DraftMap {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Writes `value` at `path`, creating intermediate mappings as needed.
    /// An intermediate segment holding a leaf is replaced with an empty mapping.
    pub fn set(&mut self, path: &FieldPath, value: DraftValue) {
        let Some((leaf, parents)) = path.segments().split_last() else {
            return;
        };

        let mut current = &mut self.fields;
        for segment in parents {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| DraftValue::Map(DraftMap::new()));
            current = ensure_map(slot, segment);
        }

        debug!(path = %path, "draft field written");
        current.insert(leaf.clone(), value);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&DraftValue> {
        let (leaf, parents) = path.segments().split_last()?;

        let mut current = &self.fields;
        for segment in parents {
            current = current.get(segment)?.as_map()?;
        }
        current.get(leaf)
    }

    /// Reads the text at a dotted path; any missing segment reads as `""`.
    pub fn read(&self, path: &str) -> String {
        FieldPath::parse(path)
            .ok()
            .and_then(|path| self.get(&path).map(DraftValue::display_string))
            .unwrap_or_default()
    }

    pub fn read_bool(&self, path: &str) -> bool {
        FieldPath::parse(path)
            .ok()
            .and_then(|path| self.get(&path).map(DraftValue::is_truthy))
            .unwrap_or(false)
    }
}

fn ensure_map<'a>(slot: &'a mut DraftValue, segment: &str) -> &'a mut DraftMap {
    if !matches!(slot, DraftValue::Map(_)) {
        debug!(segment, "replacing leaf with mapping on nested write");
        *slot = DraftValue::Map(DraftMap::new());
    }
    match slot {
        DraftValue::Map(map) => map,
        _ => unreachable!("slot was just replaced with a mapping"),
    }
}
