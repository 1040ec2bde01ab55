//! Category descriptor discovery in a directory.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use asterix_core::SchemaRegistry;
use log::{debug, trace, warn};

use crate::{error::XmlSchemaError, load_category};

const FILE_PREFIX: &str = "asterix_cat";
const FILE_SUFFIX: &str = ".xml";

/// One selected descriptor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFile {
    pub category: u8,
    /// `(major, minor)` parsed from the file name; `None` for overrides.
    pub edition: Option<(u32, u32)>,
    pub path: PathBuf,
}

/// Category → descriptor file selection.
///
/// [`scan`](Self::scan) indexes files named
/// `asterix_cat{CCC}_{major}_{minor}.xml` and keeps the highest edition of
/// every category. Overrides pin a file regardless of its name.
#[derive(Debug, Clone, Default)]
pub struct SchemaDirectory {
    files: BTreeMap<u8, DescriptorFile>,
}

impl SchemaDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, XmlSchemaError> {
        let dir = dir.as_ref();
        let io_error = |source| XmlSchemaError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut directory = Self::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let Some((category, edition)) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_file_name)
            else {
                trace!("ignoring {}", path.display());
                continue;
            };
            directory.offer(DescriptorFile {
                category,
                edition: Some(edition),
                path,
            });
        }

        debug!(
            "found descriptors for {} categories in {}",
            directory.files.len(),
            dir.display()
        );
        Ok(directory)
    }

    /// Uses `path` for `category`, replacing any scanned selection.
    pub fn with_override(mut self, category: u8, path: impl Into<PathBuf>) -> Self {
        self.files.insert(
            category,
            DescriptorFile {
                category,
                edition: None,
                path: path.into(),
            },
        );
        self
    }

    /// Selected files in category order.
    pub fn files(&self) -> impl Iterator<Item = &DescriptorFile> {
        self.files.values()
    }

    pub fn get(&self, category: u8) -> Option<&DescriptorFile> {
        self.files.get(&category)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Loads every selected file into `registry` and returns the files that
    /// failed to load.
    pub fn load_into(&self, registry: &mut SchemaRegistry) -> Vec<(PathBuf, XmlSchemaError)> {
        let mut failures = Vec::new();

        for file in self.files.values() {
            match load_category(&file.path) {
                Ok(schema) => {
                    if schema.category() != file.category {
                        warn!(
                            "{} describes category {}, registered as such",
                            file.path.display(),
                            schema.category()
                        );
                    }
                    registry.register(schema);
                }
                Err(e) => {
                    warn!("skipping {}: {e}", file.path.display());
                    failures.push((file.path.clone(), e));
                }
            }
        }

        failures
    }

    fn offer(&mut self, file: DescriptorFile) {
        let newer = self
            .files
            .get(&file.category)
            .is_none_or(|current| current.edition.is_some() && file.edition > current.edition);
        if newer {
            self.files.insert(file.category, file);
        }
    }
}

/// Parses `asterix_cat{CCC}_{major}_{minor}.xml` into the category and
/// edition.
pub fn parse_file_name(name: &str) -> Option<(u8, (u32, u32))> {
    let stem = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    let mut parts = stem.split('_');
    let category = parts.next()?.parse().ok()?;
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((category, (major, minor)))
}
