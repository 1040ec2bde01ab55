//! ASTERIX decoder with pluggable schema sources.

use std::{fs, path::Path, sync::Arc};

#[cfg(feature = "xml")]
use std::path::PathBuf;

use asterix_codec::{decode_message, decode_stream};
use asterix_core::{
    DecodeError, DecodeOptions, Decoded, Message, Schema, SchemaProvider, SchemaRegistry,
};
#[cfg(feature = "xml")]
use asterix_xml::SchemaDirectory;
use log::debug;
use memmap2::Mmap;
use rayon::prelude::*;

use crate::{error::AsterixError, hex_input::parse_hex};

/// Decodes ASTERIX input using registered category schemas.
///
/// Schemas registered directly take precedence; categories they do not cover
/// are looked up in the additional providers in registration order.
pub struct AsterixDecoder {
    registry: SchemaRegistry,
    providers: Vec<Arc<dyn SchemaProvider>>,
    options: DecodeOptions,
}

/// Builder for configuring [`AsterixDecoder`].
pub struct AsterixDecoderBuilder {
    schemas: Vec<Schema>,
    providers: Vec<Arc<dyn SchemaProvider>>,
    options: DecodeOptions,
    #[cfg(feature = "xml")]
    schema_dirs: Vec<PathBuf>,
}

impl AsterixDecoder {
    /// Create a builder for [`AsterixDecoder`].
    pub fn builder() -> AsterixDecoderBuilder {
        AsterixDecoderBuilder {
            schemas: Vec::new(),
            providers: Vec::new(),
            options: DecodeOptions::default(),
            #[cfg(feature = "xml")]
            schema_dirs: Vec::new(),
        }
    }

    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::new(),
            providers: Vec::new(),
            options: DecodeOptions::default(),
        }
    }

    /// Register a schema, replacing any schema of the same category.
    pub fn register_schema(&mut self, schema: impl Into<Arc<Schema>>) {
        if let Some(previous) = self.registry.register(schema) {
            debug!("replaced schema for category {}", previous.category());
        }
    }

    /// Register a fallback schema provider.
    pub fn register_provider(&mut self, provider: Arc<dyn SchemaProvider>) {
        self.providers.push(provider);
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Schema used for `category`, if any.
    pub fn schema(&self, category: u8) -> Option<Arc<Schema>> {
        self.registry
            .schema(category)
            .or_else(|| self.providers.iter().find_map(|p| p.schema(category)))
    }

    /// Decode a whole input according to the configured framing.
    ///
    /// Never fails; unsupported categories are listed in
    /// [`Decoded::unsupported`].
    pub fn decode(&self, data: &[u8]) -> Decoded {
        decode_stream(data, self, &self.options)
    }

    /// Decode a single unframed message (category octet plus records).
    pub fn decode_message(&self, data: &[u8]) -> Result<Message, DecodeError> {
        decode_message(data, self, &self.options)
    }

    /// Decode hex text (see [`parse_hex`](crate::parse_hex)).
    pub fn decode_hex(&self, input: &str) -> Result<Decoded, AsterixError> {
        Ok(self.decode(&parse_hex(input)?))
    }

    /// Decode a binary capture file.
    pub fn decode_file(&self, path: &Path) -> Result<Decoded, AsterixError> {
        let file = fs::File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Decoded::new());
        }
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(self.decode(&mmap))
    }

    /// Decode independent inputs in parallel, preserving input order.
    pub fn decode_batch<B>(&self, inputs: &[B]) -> Vec<Decoded>
    where
        B: AsRef<[u8]> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.decode(input.as_ref()))
            .collect()
    }
}

impl Default for AsterixDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for AsterixDecoder {
    fn schema(&self, category: u8) -> Option<Arc<Schema>> {
        AsterixDecoder::schema(self, category)
    }
}

impl AsterixDecoderBuilder {
    /// Register a schema. Explicit schemas override directory-loaded ones.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Register a fallback schema provider.
    pub fn with_provider(mut self, provider: Arc<dyn SchemaProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Load the latest descriptor of every category found in `dir` when
    /// building.
    #[cfg(feature = "xml")]
    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dirs.push(dir.into());
        self
    }

    /// Build the decoder.
    ///
    /// Fails only when a descriptor directory cannot be read; descriptor
    /// files that fail to load are logged and skipped.
    pub fn build(self) -> Result<AsterixDecoder, AsterixError> {
        let mut decoder = AsterixDecoder::new();
        decoder.options = self.options;

        #[cfg(feature = "xml")]
        for dir in &self.schema_dirs {
            let directory = SchemaDirectory::scan(dir)?;
            let failures = directory.load_into(&mut decoder.registry);
            debug!(
                "{}: {} descriptor(s) selected, {} failed",
                dir.display(),
                directory.len(),
                failures.len()
            );
        }

        for schema in self.schemas {
            decoder.register_schema(schema);
        }
        for provider in self.providers {
            decoder.register_provider(provider);
        }
        Ok(decoder)
    }
}
