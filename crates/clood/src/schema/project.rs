//! Project definition and JSON export/import.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CloodError, Result};

use super::attribute::Attribute;

/// A case-base schema plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the server on creation.
    #[serde(rename = "id__", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Server-side casebase index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casebase: Option<String>,
    #[serde(rename = "retainDuplicateCases", default)]
    pub retain_duplicate_cases: bool,
    #[serde(rename = "hasCasebase", default)]
    pub has_casebase: bool,
    /// Ordered; defines CSV column order and case-field order.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Project {
    /// Create an unsaved project with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            casebase: None,
            retain_duplicate_cases: false,
            has_casebase: false,
            attributes: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Allow duplicate cases to be retained.
    pub fn with_duplicates(mut self, allow: bool) -> Self {
        self.retain_duplicate_cases = allow;
        self
    }

    /// Get an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get all attribute names in order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Check whether an attribute with this exact name exists.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// The server id, or an error for projects that were never saved.
    pub fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| CloodError::NoProject(format!("project '{}' has no id", self.name)))
    }

    /// File name used for exports: `clood-<id>.json`.
    pub fn export_file_name(&self) -> String {
        format!("clood-{}.json", self.id.as_deref().unwrap_or("unsaved"))
    }

    /// Save the project as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| CloodError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| CloodError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Export into a directory under [`export_file_name`](Self::export_file_name).
    pub fn export_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.export_file_name());
        self.save(&path)?;
        Ok(path)
    }

    /// Load a project file as-is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CloodError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let project = serde_json::from_reader(BufReader::new(file))?;
        Ok(project)
    }

    /// Read an exported project as a new, unsaved project.
    ///
    /// Only the name, description, duplicate policy and attributes carry over;
    /// the id, casebase and casebase state belong to the exporting server.
    pub fn import(path: impl AsRef<Path>) -> Result<Self> {
        let exported = Self::load(path)?;
        Ok(Self {
            attributes: exported.attributes,
            ..Self::new(exported.name)
                .with_description(exported.description)
                .with_duplicates(exported.retain_duplicate_cases)
        })
    }
}
