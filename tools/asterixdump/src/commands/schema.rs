use std::{fs, path::PathBuf};

use anyhow::{Result, anyhow};
use asterix::{AsterixDecoder, core::format_schema};
use clap::Args;

#[derive(Args)]
pub struct SchemaArgs {
    /// Category number
    category: u8,

    /// Directory of asterix_catCCC_M_N.xml descriptors
    #[arg(short, long)]
    schemas: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let decoder = AsterixDecoder::builder()
            .with_schema_dir(&self.schemas)
            .build()?;
        let schema = decoder.schema(self.category).ok_or_else(|| {
            anyhow!(
                "no descriptor for category {} in {}",
                self.category,
                self.schemas.display()
            )
        })?;
        let text = format_schema(&schema)?;

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
