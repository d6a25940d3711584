use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    EnumRef(EnumRef),
    Enum(EnumMember),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
    Module(Module),
}

/// A named top-level block whose body is a uniform sequence or mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub contents: ModuleContents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleContents {
    Seq(Vec<Value>),
    Map(Vec<(String, Value)>),
}

/// An unresolved enum reference (`:member` or `:Class.member`) as produced by
/// the parser. Resolution replaces these with `Value::Enum` or, under the
/// silent fallback, with their literal text as a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumRef {
    pub class: Option<String>,
    pub member: String,
}

impl EnumRef {
    /// The original source form of the reference.
    pub fn literal(&self) -> String {
        match &self.class {
            Some(class) => format!(":{}.{}", class, self.member),
            None => format!(":{}", self.member),
        }
    }
}

/// A resolved enum binding: the class and member it came from, plus a clone of
/// the member's payload from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub class: String,
    pub name: String,
    pub value: Box<Value>,
}

/// One entry of the caller-supplied enum catalog. The catalog is an ordered
/// `Vec<EnumClass>`; order matters when ambiguity checking is disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumClass {
    pub name: String,
    pub members: IndexMap<String, Value>,
}

impl EnumClass {
    pub fn new(name: impl Into<String>) -> Self {
        EnumClass { name: name.into(), members: IndexMap::new() }
    }

    pub fn member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }
}

/// Parser output: the ordered top-level entries of one document. Transient —
/// callers receive it converted to values via [`Document::into_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub entries: Vec<Value>,
}

impl Document {
    /// Collapse a single-mapping document when `inline` is requested,
    /// otherwise return the entries as an array.
    pub fn into_value(mut self, inline: bool) -> Value {
        if inline
            && self.entries.len() == 1
            && matches!(self.entries[0], Value::Object(_))
        {
            if let Some(entry) = self.entries.pop() {
                return entry;
            }
        }
        Value::Array(self.entries)
    }
}

impl Value {
    pub fn as_object(&self) -> Option<&Vec<(String, Value)>> {
        if let Value::Object(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if let Value::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_module(&self) -> Option<&Module> {
        if let Value::Module(module) = self {
            Some(module)
        } else {
            None
        }
    }
}

/// Insert into an ordered mapping with last-write-wins duplicate handling.
pub(crate) fn insert_entry(items: &mut Vec<(String, Value)>, key: String, value: Value) {
    if let Some(slot) = items.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        items.push((key, value));
    }
}
