//! Dictionaries and the values they hold.
//!
//! A [`Dictionary`] is an ordered mapping from names to [`Value`]s. The order in
//! which keys are inserted is the order in which they are written, so the output
//! of a document is fully deterministic. References to other objects are stored
//! as [`ObjectId`]s and written as `N G R` tokens.

use pdf_writer::{Dict, Name, Null, Obj, Str};

use crate::object::ObjectId;

/// A value that can be stored in a [`Dictionary`] or an array.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null object.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i32),
    /// A real number.
    Real(f32),
    /// A name, without the leading slash.
    Name(String),
    /// A literal string.
    String(String),
    /// A reference to another object.
    Reference(ObjectId),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// A nested dictionary.
    Dictionary(Dictionary),
}

impl Value {
    /// Create a name value.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Create a string value.
    pub fn string(string: impl Into<String>) -> Self {
        Self::String(string.into())
    }

    /// Create an array of real numbers.
    pub fn reals(items: impl IntoIterator<Item = f32>) -> Self {
        Self::Array(items.into_iter().map(Value::Real).collect())
    }

    /// Create an array of references.
    pub fn references(items: impl IntoIterator<Item = ObjectId>) -> Self {
        Self::Array(items.into_iter().map(Value::Reference).collect())
    }

    /// Create an array of names.
    pub fn names<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Array(items.into_iter().map(Value::name).collect())
    }

    /// The referenced object, if this value is a reference.
    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Value::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// The nested dictionary, if this value is a dictionary.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// The items, if this value is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn write(&self, obj: Obj<'_>) {
        match self {
            Value::Null => obj.primitive(Null),
            Value::Bool(b) => obj.primitive(*b),
            Value::Integer(i) => obj.primitive(*i),
            Value::Real(r) => obj.primitive(*r),
            Value::Name(n) => obj.primitive(Name(n.as_bytes())),
            Value::String(s) => obj.primitive(Str(s.as_bytes())),
            Value::Reference(id) => obj.primitive(id.to_pdf_ref()),
            Value::Array(items) => {
                let mut array = obj.array();
                for item in items {
                    item.write(array.push());
                }
            }
            Value::Dictionary(dict) => {
                let mut inner = obj.dict();
                dict.write_into(&mut inner);
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Real(value)
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Self::Reference(value)
    }
}

impl From<Dictionary> for Value {
    fn from(value: Dictionary) -> Self {
        Self::Dictionary(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

/// An ordered mapping from names to values with unique keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: Vec<(String, Value)>,
}

impl Dictionary {
    /// Create a new, empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. If the key already exists, its value is replaced
    /// in place and keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style variant of [`Dictionary::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value stored under a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether the dictionary contains a key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn write_into(&self, dict: &mut Dict<'_>) {
        for (key, value) in &self.entries {
            value.write(dict.insert(Name(key.as_bytes())));
        }
    }
}
