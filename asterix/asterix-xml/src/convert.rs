//! Conversion from the descriptor element tree to [`Schema`].

use std::str::FromStr;

use asterix_core::{
    BitField, CompoundFormat, DataItem, FixedFormat, ItemFormat, RepetitiveFormat, Schema,
    UapSlot, VariableFormat,
};
use log::{debug, trace};

use crate::{error::XmlSchemaError, tree::Element};

const SPARE: &str = "-";
const FX_SLOT: &str = "FX";
const SHAPES: [&str; 4] = ["Fixed", "Variable", "Repetitive", "Compound"];

pub(crate) fn convert_category(root: &Element) -> Result<Schema, XmlSchemaError> {
    if root.name != "Category" {
        return Err(XmlSchemaError::NotACategory {
            found: root.name.clone(),
        });
    }
    let category: u8 = parse_attribute(root, "id")?;

    let mut items = Vec::new();
    for element in root.children_named("DataItem") {
        let item = convert_data_item(element)?;
        if item.formats.is_empty() {
            debug!("cat {category:03}: data item {} has no supported format, skipped", item.id);
            continue;
        }
        items.push(item);
    }

    let uap = root
        .child("UAP")
        .ok_or_else(|| XmlSchemaError::MissingElement {
            parent: format!("category {category}"),
            element: "UAP",
        })?;

    let schema = Schema::new(category, convert_uap(uap), items)
        .map_err(|source| XmlSchemaError::Schema { category, source })?;

    Ok(match root.attribute("ver") {
        Some(ver) => schema.with_edition(ver),
        None => schema,
    })
}

fn convert_data_item(element: &Element) -> Result<DataItem, XmlSchemaError> {
    let id = element.required_attribute("id")?;
    let format = element
        .child("DataItemFormat")
        .ok_or_else(|| XmlSchemaError::MissingElement {
            parent: format!("data item {id}"),
            element: "DataItemFormat",
        })?;

    let formats = format
        .children
        .iter()
        .map(convert_format)
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>, _>>()?;

    let item = DataItem::new(id, formats);
    Ok(
        match element.child("DataItemName").map(|name| name.text.trim()) {
            Some(name) if !name.is_empty() => item.with_name(name),
            _ => item,
        },
    )
}

/// Converts a shape element; any other element yields `None`.
fn convert_format(element: &Element) -> Result<Option<ItemFormat>, XmlSchemaError> {
    let format = match element.name.as_str() {
        "Fixed" => ItemFormat::Fixed(convert_fixed(element)?),
        "Variable" => ItemFormat::Variable(convert_variable(element)?),
        "Repetitive" => ItemFormat::Repetitive(convert_repetitive(element)?),
        "Compound" => ItemFormat::Compound(convert_compound(element)?),
        other => {
            trace!("ignoring <{other}> in format list");
            return Ok(None);
        }
    };
    Ok(Some(format))
}

fn convert_fixed(element: &Element) -> Result<FixedFormat, XmlSchemaError> {
    let length = parse_attribute(element, "length")?;
    let fields = element
        .children_named("Bits")
        .map(convert_bits)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FixedFormat::new(length, fields))
}

fn convert_bits(element: &Element) -> Result<BitField, XmlSchemaError> {
    let name = element
        .child("BitsShortName")
        .map(|name| name.text.trim())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| XmlSchemaError::MissingElement {
            parent: "<Bits>".to_string(),
            element: "BitsShortName",
        })?;

    let mut field = match element.attribute("bit") {
        Some(_) => BitField::bit(name, parse_attribute(element, "bit")?),
        None => BitField::range(
            name,
            parse_attribute(element, "from")?,
            parse_attribute(element, "to")?,
        ),
    };

    if element.attribute("encode") == Some("signed") {
        field = field.signed();
    }
    if let Some(unit) = element.child("BitsUnit")
        && unit.attribute("scale").is_some()
    {
        field = field.with_scale(parse_attribute(unit, "scale")?);
    }

    Ok(field)
}

fn convert_variable(element: &Element) -> Result<VariableFormat, XmlSchemaError> {
    let blocks = element
        .children_named("Fixed")
        .map(convert_fixed)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VariableFormat { blocks })
}

fn convert_repetitive(element: &Element) -> Result<RepetitiveFormat, XmlSchemaError> {
    let fixed = element
        .child("Fixed")
        .ok_or_else(|| XmlSchemaError::MissingElement {
            parent: "<Repetitive>".to_string(),
            element: "Fixed",
        })?;
    Ok(RepetitiveFormat {
        element: convert_fixed(fixed)?,
    })
}

/// A leading `<Variable>` declares the indicator octets; the remaining shape
/// children are the subfields, in presence order.
fn convert_compound(element: &Element) -> Result<CompoundFormat, XmlSchemaError> {
    let mut shapes = element
        .children
        .iter()
        .filter(|child| SHAPES.contains(&child.name.as_str()))
        .peekable();

    let indicator = shapes
        .next_if(|child| child.name == "Variable")
        .map(convert_variable)
        .transpose()?;
    let subfields = shapes
        .map(convert_format)
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompoundFormat {
        indicator,
        subfields,
    })
}

/// Continuation slots (`frn="FX"`) are dropped; `-` marks a spare slot.
fn convert_uap(element: &Element) -> Vec<UapSlot> {
    element
        .children_named("UAPItem")
        .filter(|item| item.attribute("frn") != Some(FX_SLOT))
        .map(|item| match item.text.trim() {
            "" | SPARE => UapSlot::Spare,
            id => UapSlot::Item(id.to_string()),
        })
        .collect()
}

fn parse_attribute<T: FromStr>(element: &Element, attribute: &'static str) -> Result<T, XmlSchemaError> {
    let value = element.required_attribute(attribute)?;
    value
        .trim()
        .parse()
        .map_err(|_| XmlSchemaError::InvalidNumber {
            element: element.name.clone(),
            attribute,
            value: value.to_string(),
        })
}
