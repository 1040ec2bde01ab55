//! Decoded values produced by the shape decoders.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Display, Formatter, Result},
};

/// Value of one decoded bit field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    /// Single bits and unsigned ranges.
    UInt(u64),
    /// Signed ranges after two's-complement extension.
    Int(i64),
    /// Ranges with a scale factor.
    Float(f64),
    /// Elements of a repetitive subfield nested in a compound item.
    List(Vec<Fields>),
}

impl Value {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            Value::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::UInt(v) => i64::try_from(*v).ok(),
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`; `None` for lists.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::UInt(v) => Some(*v as f64),
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Fields]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for a numeric zero of any representation.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::UInt(v) => *v == 0,
            Value::Int(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            Value::List(_) => false,
        }
    }
}

/// Field name → value mapping in insertion order.
///
/// Inserting a name that is already present replaces its value in place, so
/// merged results keep the position of the first occurrence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    /// Merges `other` into `self`; values from `other` win on collision.
    pub fn merge(&mut self, other: Fields) {
        for (name, value) in other.0 {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// Decoded value of one data item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ItemValue {
    /// Result of a fixed or compound format.
    Fields(Fields),
    /// Result of a repetitive format.
    List(Vec<Fields>),
    /// Result of a variable format with the number of octets it consumed.
    Variable { fields: Fields, len: usize },
}

impl ItemValue {
    /// Field mapping of a fixed, compound or variable value.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            ItemValue::Fields(fields) | ItemValue::Variable { fields, .. } => Some(fields),
            ItemValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Fields]> {
        match self {
            ItemValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Shortcut for `fields()?.get(name)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Merges a later sibling into `self`.
    ///
    /// Mappings merge key by key (later wins) and variable octet counts add
    /// up. A fixed mapping merged with a variable one stays variable. A list
    /// on either side replaces the earlier value.
    pub fn merge(&mut self, later: ItemValue) {
        match (self, later) {
            (ItemValue::Fields(acc), ItemValue::Fields(next)) => acc.merge(next),
            (ItemValue::Variable { fields, .. }, ItemValue::Fields(next)) => fields.merge(next),
            (slot @ ItemValue::Fields(_), ItemValue::Variable { fields: next, len }) => {
                if let ItemValue::Fields(earlier) = slot {
                    let mut fields = std::mem::take(earlier);
                    fields.merge(next);
                    *slot = ItemValue::Variable { fields, len };
                }
            }
            (
                ItemValue::Variable { fields, len },
                ItemValue::Variable {
                    fields: next,
                    len: next_len,
                },
            ) => {
                fields.merge(next);
                *len += next_len;
            }
            (slot, later) => *slot = later,
        }
    }
}

/// One decoded record: data item id → value, in FSPEC order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Vec<(String, ItemValue)>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: ItemValue) {
        let id = id.into();
        match self.0.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((id, value)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ItemValue> {
        self.0.iter().find(|(key, _)| key == id).map(|(_, v)| v)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Records of a single category decoded from one message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    pub category: u8,
    pub records: Vec<Record>,
}

impl Message {
    pub fn new(category: u8) -> Self {
        Self {
            category,
            records: Vec::new(),
        }
    }
}

/// Decoding result of a whole input: records grouped by category in arrival
/// order, plus every category that was reported unsupported.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoded {
    pub records: BTreeMap<u8, Vec<Record>>,
    pub unsupported: BTreeSet<u8>,
}

impl Decoded {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records of `message` to its category.
    pub fn push_message(&mut self, message: Message) {
        self.records
            .entry(message.category)
            .or_default()
            .extend(message.records);
    }

    /// Notes `category` as unsupported; it is listed with no records.
    pub fn push_unsupported(&mut self, category: u8) {
        self.records.entry(category).or_default();
        self.unsupported.insert(category);
    }

    pub fn records(&self, category: u8) -> Option<&[Record]> {
        self.records.get(&category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = u8> + '_ {
        self.records.keys().copied()
    }

    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_unsupported(&self, category: u8) -> bool {
        self.unsupported.contains(&category)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::UInt(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::List(items) => write_list(f, items),
        }
    }
}

impl Display for Fields {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

impl Display for ItemValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ItemValue::Fields(fields) => write!(f, "{fields}"),
            ItemValue::List(items) => write_list(f, items),
            ItemValue::Variable { fields, len } => write!(f, "{fields} ({len} octets)"),
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (id, value) in &self.0 {
            writeln!(f, "{id}: {value}")?;
        }
        Ok(())
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Fields]) -> Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::{Fields, Record};

    impl Serialize for Fields {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (name, value) in &self.0 {
                map.serialize_entry(name, value)?;
            }
            map.end()
        }
    }

    impl Serialize for Record {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (id, value) in &self.0 {
                map.serialize_entry(id, value)?;
            }
            map.end()
        }
    }
}
