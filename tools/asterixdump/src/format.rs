use std::fmt::Write;

use asterix::core::{Decoded, Framing};
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum FramingArg {
    /// One category octet followed by records
    Unframed,
    /// Data blocks with a 16-bit length header
    Block,
}

impl From<FramingArg> for Framing {
    fn from(value: FramingArg) -> Self {
        match value {
            FramingArg::Unframed => Framing::Unframed,
            FramingArg::Block => Framing::DataBlock,
        }
    }
}

impl OutputFormat {
    pub fn render(&self, decoded: &Decoded) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(render_text(decoded)?),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(decoded)?),
        }
    }
}

fn render_text(decoded: &Decoded) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for (category, records) in &decoded.records {
        if decoded.is_unsupported(*category) {
            writeln!(out, "cat {category:03}: not supported")?;
            continue;
        }
        writeln!(out, "cat {category:03}: {} record(s)", records.len())?;
        for (index, record) in records.iter().enumerate() {
            writeln!(out, "  record {}", index + 1)?;
            for line in record.to_string().lines() {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(out)
}
