use std::collections::HashMap;

use crate::error::SchemaError;

/// Widest bit range a single field may span.
pub const MAX_FIELD_BITS: u16 = 64;

/// Longest fixed block, in octets: the payload a single data block can carry.
pub const MAX_FIXED_LENGTH: usize = u16::MAX as usize;

/// Bits addressed by a [`BitField`], counted from the least significant bit
/// of its fixed block (LSB = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitSpan {
    Bit(u16),
    /// Inclusive range, always stored with `high >= low`.
    Range { high: u16, low: u16 },
}

impl BitSpan {
    /// Builds a range from endpoints given in either order.
    pub fn range(from: u16, to: u16) -> Self {
        BitSpan::Range {
            high: from.max(to),
            low: from.min(to),
        }
    }

    pub fn width(&self) -> u16 {
        match self {
            BitSpan::Bit(_) => 1,
            BitSpan::Range { high, low } => high.abs_diff(*low) + 1,
        }
    }

    pub fn low(&self) -> u16 {
        match self {
            BitSpan::Bit(pos) => *pos,
            BitSpan::Range { high, low } => *high.min(low),
        }
    }

    pub fn high(&self) -> u16 {
        match self {
            BitSpan::Bit(pos) => *pos,
            BitSpan::Range { high, low } => *high.max(low),
        }
    }
}

/// A named bit or bit range inside a fixed block.
#[derive(Debug, Clone, PartialEq)]
pub struct BitField {
    pub name: String,
    pub bits: BitSpan,
    /// Two's-complement interpretation over the range width.
    pub signed: bool,
    /// Multiplier applied after sign handling; yields a floating-point value.
    pub scale: Option<f64>,
}

impl BitField {
    pub fn bit(name: impl Into<String>, pos: u16) -> Self {
        Self {
            name: name.into(),
            bits: BitSpan::Bit(pos),
            signed: false,
            scale: None,
        }
    }

    pub fn range(name: impl Into<String>, from: u16, to: u16) -> Self {
        Self {
            name: name.into(),
            bits: BitSpan::range(from, to),
            signed: false,
            scale: None,
        }
    }

    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Block of `length` octets split into bit fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedFormat {
    pub length: usize,
    pub fields: Vec<BitField>,
}

impl FixedFormat {
    pub fn new(length: usize, fields: Vec<BitField>) -> Self {
        Self { length, fields }
    }
}

/// Fixed blocks chained by their `FX` field.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableFormat {
    pub blocks: Vec<FixedFormat>,
}

/// Count-prefixed list of identical fixed elements.
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitiveFormat {
    pub element: FixedFormat,
}

/// Subfields gated by an indicator octet chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFormat {
    /// Layout of the indicator octets as declared by the descriptor, if any.
    pub indicator: Option<VariableFormat>,
    pub subfields: Vec<ItemFormat>,
}

/// Layout of a data item (or of a compound subfield).
#[derive(Debug, Clone, PartialEq)]
pub enum ItemFormat {
    Fixed(FixedFormat),
    Variable(VariableFormat),
    Repetitive(RepetitiveFormat),
    Compound(CompoundFormat),
}

impl ItemFormat {
    fn validate(&self, item: &str) -> Result<(), SchemaError> {
        match self {
            ItemFormat::Fixed(fixed) => fixed.validate(item),
            ItemFormat::Variable(variable) => variable.validate(item),
            ItemFormat::Repetitive(rep) => rep.element.validate(item),
            ItemFormat::Compound(compound) => {
                if compound.subfields.is_empty() {
                    return Err(SchemaError::EmptyCompound { item: item.into() });
                }
                if let Some(indicator) = &compound.indicator {
                    indicator.validate(item)?;
                }
                compound
                    .subfields
                    .iter()
                    .try_for_each(|subfield| subfield.validate(item))
            }
        }
    }
}

impl FixedFormat {
    fn validate(&self, item: &str) -> Result<(), SchemaError> {
        if self.length == 0 {
            return Err(SchemaError::ZeroLengthFixed { item: item.into() });
        }
        if self.length > MAX_FIXED_LENGTH {
            return Err(SchemaError::FixedTooLong {
                item: item.into(),
                length: self.length,
            });
        }
        let span_bits = self.length.saturating_mul(8);

        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName { item: item.into() });
            }
            for bit in [field.bits.low(), field.bits.high()] {
                if bit == 0 || usize::from(bit) > span_bits {
                    return Err(SchemaError::BitOutOfRange {
                        item: item.into(),
                        field: field.name.clone(),
                        bit,
                        length: self.length,
                    });
                }
            }
            if field.bits.width() > MAX_FIELD_BITS {
                return Err(SchemaError::FieldTooWide {
                    item: item.into(),
                    field: field.name.clone(),
                    width: field.bits.width(),
                });
            }
            if field.scale.is_some_and(|scale| !scale.is_finite()) {
                return Err(SchemaError::InvalidScale {
                    item: item.into(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }
}

impl VariableFormat {
    fn validate(&self, item: &str) -> Result<(), SchemaError> {
        if self.blocks.is_empty() {
            return Err(SchemaError::EmptyVariable { item: item.into() });
        }
        self.blocks.iter().try_for_each(|block| block.validate(item))
    }
}

/// A data item definition: identifier plus one or more sibling formats.
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    pub id: String,
    pub name: Option<String>,
    pub formats: Vec<ItemFormat>,
}

impl DataItem {
    pub fn new(id: impl Into<String>, formats: Vec<ItemFormat>) -> Self {
        Self {
            id: id.into(),
            name: None,
            formats,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One presence position of the User Application Profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UapSlot {
    Item(String),
    Spare,
}

/// Immutable description of one ASTERIX category.
///
/// Lookups by data item id and by UAP position are resolved once here, so
/// record decoding never searches the item list.
#[derive(Debug, Clone)]
pub struct Schema {
    category: u8,
    edition: Option<String>,
    uap: Vec<UapSlot>,
    items: Vec<DataItem>,
    by_id: HashMap<String, usize>,
    /// `uap` position → index into `items`; `None` for spares and unknown ids.
    by_position: Vec<Option<usize>>,
}

impl Schema {
    /// Validates every item format and builds the lookup tables.
    pub fn new(category: u8, uap: Vec<UapSlot>, items: Vec<DataItem>) -> Result<Self, SchemaError> {
        let mut by_id = HashMap::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            if item.formats.is_empty() {
                return Err(SchemaError::EmptyDataItem {
                    item: item.id.clone(),
                });
            }
            for format in &item.formats {
                format.validate(&item.id)?;
            }
            if by_id.insert(item.id.clone(), index).is_some() {
                return Err(SchemaError::DuplicateItem {
                    item: item.id.clone(),
                });
            }
        }

        let by_position = uap
            .iter()
            .map(|slot| match slot {
                UapSlot::Item(id) => by_id.get(id).copied(),
                UapSlot::Spare => None,
            })
            .collect();

        Ok(Self {
            category,
            edition: None,
            uap,
            items,
            by_id,
            by_position,
        })
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = Some(edition.into());
        self
    }

    pub fn category(&self) -> u8 {
        self.category
    }

    pub fn edition(&self) -> Option<&str> {
        self.edition.as_deref()
    }

    pub fn uap(&self) -> &[UapSlot] {
        &self.uap
    }

    pub fn items(&self) -> &[DataItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&DataItem> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Slot for 1-based presence index `position`; `None` past the UAP end.
    pub fn slot(&self, position: usize) -> Option<&UapSlot> {
        position.checked_sub(1).and_then(|i| self.uap.get(i))
    }

    /// Data item bound to 1-based presence index `position`.
    pub fn item_at(&self, position: usize) -> Option<&DataItem> {
        let index = position.checked_sub(1)?;
        self.by_position
            .get(index)
            .copied()
            .flatten()
            .map(|item| &self.items[item])
    }
}
