use std::fmt::{Display, Error, Formatter, Result, Write as _};

use super::{BitField, BitSpan, FixedFormat, ItemFormat, Schema, UapSlot};

/// Format a schema in a readable style: the UAP in presence order, then each
/// data item with its nested layout. Nested formats are indented by four.
pub fn format_schema(schema: &Schema) -> std::result::Result<String, Error> {
    let mut out = String::new();

    writeln!(out, "category: {}", schema.category())?;
    if let Some(edition) = schema.edition() {
        writeln!(out, "edition: {edition}")?;
    }

    writeln!(out, "uap:")?;
    for (i, slot) in schema.uap().iter().enumerate() {
        match slot {
            UapSlot::Item(id) if schema.item(id).is_none() => {
                writeln!(out, "    {}: {id} (undefined)", i + 1)?
            }
            UapSlot::Item(id) => writeln!(out, "    {}: {id}", i + 1)?,
            UapSlot::Spare => writeln!(out, "    {}: spare", i + 1)?,
        }
    }

    writeln!(out, "items:")?;
    for item in schema.items() {
        match &item.name {
            Some(name) => writeln!(out, "    {}: {name}", item.id)?,
            None => writeln!(out, "    {}:", item.id)?,
        }
        for format in &item.formats {
            format_item_format(format, 8, &mut out)?;
        }
    }

    Ok(out)
}

fn format_item_format(format: &ItemFormat, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    match format {
        ItemFormat::Fixed(fixed) => format_fixed(fixed, "fixed", indent, out),
        ItemFormat::Variable(variable) => {
            writeln!(out, "{pad}variable:")?;
            for block in &variable.blocks {
                format_fixed(block, "block", indent + 4, out)?;
            }
            Ok(())
        }
        ItemFormat::Repetitive(rep) => {
            writeln!(out, "{pad}repetitive:")?;
            format_fixed(&rep.element, "element", indent + 4, out)
        }
        ItemFormat::Compound(compound) => {
            writeln!(out, "{pad}compound:")?;
            for (i, subfield) in compound.subfields.iter().enumerate() {
                writeln!(out, "{pad}    subfield {}:", i + 1)?;
                format_item_format(subfield, indent + 8, out)?;
            }
            Ok(())
        }
    }
}

fn format_fixed(fixed: &FixedFormat, label: &str, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}{label}: {{ length: {} }}", fixed.length)?;
    for field in &fixed.fields {
        format_bit_field(field, indent + 4, out)?;
    }
    Ok(())
}

fn format_bit_field(field: &BitField, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    match field.bits {
        BitSpan::Bit(pos) => write!(out, "{pad}{}: {{ bit: {pos}", field.name)?,
        BitSpan::Range { high, low } => {
            write!(out, "{pad}{}: {{ bits: {high}..{low}", field.name)?;
            if field.signed {
                write!(out, ", signed")?;
            }
        }
    }
    if let Some(scale) = field.scale {
        write!(out, ", scale: {scale}")?;
    }
    writeln!(out, " }}")
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = format_schema(self)?;
        f.write_str(&text)
    }
}
