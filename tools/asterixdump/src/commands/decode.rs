use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use asterix::{
    AsterixDecoder,
    core::{DecodeOptions, IndicatorConvention},
};
use clap::Args;

use crate::format::{FramingArg, OutputFormat};

#[derive(Args)]
pub struct DecodeArgs {
    /// Hex text to decode (read from stdin when neither this nor --file is given)
    hex: Option<String>,

    /// Binary capture file to decode
    #[arg(short, long, conflicts_with = "hex")]
    file: Option<PathBuf>,

    /// Directory of asterix_catCCC_M_N.xml descriptors
    #[arg(short, long)]
    schemas: PathBuf,

    /// Input framing
    #[arg(long, value_enum, default_value_t = FramingArg::Unframed)]
    framing: FramingArg,

    /// Select compound subfields by indicator FX slots
    #[arg(long)]
    legacy_compound: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl DecodeArgs {
    pub fn run(self) -> Result<()> {
        let decoder = AsterixDecoder::builder()
            .with_schema_dir(&self.schemas)
            .with_options(self.options())
            .build()?;

        let decoded = match (&self.file, &self.hex) {
            (Some(path), _) => decoder
                .decode_file(path)
                .with_context(|| format!("failed to decode {}", path.display()))?,
            (None, Some(hex)) => decoder.decode_hex(hex)?,
            (None, None) => {
                let mut hex = String::new();
                io::stdin().read_to_string(&mut hex)?;
                decoder.decode_hex(&hex)?
            }
        };

        let text = self.format.render(&decoded)?;
        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }

    fn options(&self) -> DecodeOptions {
        let indicator = if self.legacy_compound {
            IndicatorConvention::LegacyFxSlot
        } else {
            IndicatorConvention::Presence
        };
        DecodeOptions::default()
            .with_framing(self.framing.into())
            .with_indicator(indicator)
    }
}
