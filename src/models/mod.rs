//! Data models for the patch manifest
//!
//! `PatchFile` is the shape decoded from a `.thrl6p` file; `Manifest` is the
//! catalog written back out. Tone data is carried through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::{DEFAULT_AUTHOR, DEFAULT_DESCRIPTION};

/// Opaque tone payload copied verbatim from `data.tone`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tone(pub Map<String, Value>);

impl From<Map<String, Value>> for Tone {
    fn from(map: Map<String, Value>) -> Self {
        Tone(map)
    }
}

/// Top-level shape of a `.thrl6p` file
///
/// Only the fields the manifest needs are decoded; everything else in the
/// file is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchFile {
    pub data: PatchData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatchData {
    pub tone: Tone,
    pub meta: PatchMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatchMeta {
    pub name: String,
}

/// Human-authored descriptive fields from a `.meta.json` sidecar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default = "default_author", deserialize_with = "author_or_default")]
    pub author: String,
    #[serde(
        default = "default_description",
        deserialize_with = "description_or_default"
    )]
    pub description: String,
    #[serde(default, deserialize_with = "tags_or_default")]
    pub tags: Vec<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            author: default_author(),
            description: default_description(),
            tags: Vec::new(),
        }
    }
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

// null and "" both fall back so author/description are never blank
fn non_empty_or<'de, D>(deserializer: D, fallback: fn() -> String) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).unwrap_or_else(fallback))
}

fn author_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    non_empty_or(deserializer, default_author)
}

fn description_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    non_empty_or(deserializer, default_description)
}

fn tags_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub filename: String,
    pub name: String,
    pub tone: Tone,
    pub metadata: Metadata,
}

impl Patch {
    pub fn new(filename: String, file: PatchFile, metadata: Metadata) -> Self {
        let PatchData { tone, meta } = file.data;
        Self {
            filename,
            name: meta.name,
            tone,
            metadata,
        }
    }
}

/// Ordered list of patches, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Vec<Patch>);

impl Manifest {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, patch: Patch) {
        self.0.push(patch);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Patch> {
        self.0.iter()
    }

    pub fn patches(&self) -> &[Patch] {
        &self.0
    }
}

impl From<Vec<Patch>> for Manifest {
    fn from(patches: Vec<Patch>) -> Self {
        Self(patches)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a Patch;
    type IntoIter = std::slice::Iter<'a, Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
