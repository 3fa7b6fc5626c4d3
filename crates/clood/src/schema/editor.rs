//! Staged editing of a project's attribute list.

use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Catalog;

use super::attribute::Attribute;
use super::project::Project;
use super::types::{AttributeType, Similarity};

/// Rejected schema edits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Another attribute already uses this name.
    #[error("Cannot have duplicate attribute names: '{0}' already exists")]
    DuplicateName(String),

    /// Attribute names must not be blank.
    #[error("Attribute name must not be empty")]
    EmptyName,

    /// No attribute at this position.
    #[error("No attribute at index {index} (project has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The catalog does not allow this similarity for the type.
    #[error("Similarity '{similarity}' is not allowed for type '{attr_type}'")]
    SimilarityNotAllowed {
        attr_type: AttributeType,
        similarity: Similarity,
    },
}

/// Edits one project's attributes.
///
/// Holds an input draft for new attributes and at most one attribute staged
/// for editing. Staged attributes are copies; nothing reaches the project
/// until [`change_attribute`](Self::change_attribute).
#[derive(Debug, Clone)]
pub struct SchemaEditor {
    project: Project,
    draft: Attribute,
    selected: Option<usize>,
    catalog: Option<Catalog>,
}

impl SchemaEditor {
    /// Start editing a project.
    pub fn new(project: Project) -> Self {
        Self {
            project,
            draft: Attribute::new("", AttributeType::default(), Similarity::default()),
            selected: None,
            catalog: None,
        }
    }

    /// Check similarity choices against a catalog on add and change.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Finish editing and hand back the project.
    pub fn into_project(self) -> Project {
        self.project
    }

    /// The input buffer for the next attribute.
    pub fn draft(&self) -> &Attribute {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Attribute {
        &mut self.draft
    }

    /// Index of the attribute staged for editing, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Append a copy of `candidate`, with family default options if it has none.
    ///
    /// The draft's name is cleared on success; its type and similarity stay.
    pub fn add_attribute(&mut self, candidate: &Attribute) -> Result<(), SchemaError> {
        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if self.project.has_attribute(&candidate.name) {
            warn!(attribute = %candidate.name, "Cannot have duplicate attribute names");
            return Err(SchemaError::DuplicateName(candidate.name.clone()));
        }
        self.check_catalog(candidate)?;
        self.caution_if_frozen();

        let mut attribute = candidate.clone();
        attribute.ensure_options();
        debug!(attribute = %attribute.name, similarity = %attribute.similarity, "attribute added");
        self.project.attributes.push(attribute);
        self.draft.name.clear();
        Ok(())
    }

    /// Add the current draft.
    pub fn add_draft(&mut self) -> Result<(), SchemaError> {
        let candidate = self.draft.clone();
        self.add_attribute(&candidate)
    }

    /// Remove the first attribute with this name.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let index = self.project.attributes.iter().position(|a| a.name == name)?;
        self.caution_if_frozen();
        self.selected = None;
        Some(self.project.attributes.remove(index))
    }

    /// Stage the attribute at `index` and return a scratch copy of it.
    pub fn select_attribute(&mut self, index: usize) -> Result<Attribute, SchemaError> {
        let attribute = self.attribute_at(index)?.clone();
        self.selected = Some(index);
        Ok(attribute)
    }

    /// Leave edit mode without changing anything.
    pub fn cancel_selection(&mut self) {
        self.selected = None;
    }

    /// Replace the attribute at `index` with a copy of `edited`.
    ///
    /// Leaves edit mode and resets the draft to an empty name with the edited
    /// attribute's type and similarity.
    pub fn change_attribute(&mut self, index: usize, edited: &Attribute) -> Result<(), SchemaError> {
        self.attribute_at(index)?;
        if edited.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        let clash = self
            .project
            .attributes
            .iter()
            .enumerate()
            .any(|(i, a)| i != index && a.name == edited.name);
        if clash {
            warn!(attribute = %edited.name, "Cannot have duplicate attribute names");
            return Err(SchemaError::DuplicateName(edited.name.clone()));
        }
        self.check_catalog(edited)?;
        self.caution_if_frozen();

        let mut attribute = edited.clone();
        attribute.ensure_options();
        self.project.attributes[index] = attribute;
        self.selected = None;
        self.draft = Attribute::new("", edited.attr_type, edited.similarity);
        Ok(())
    }

    fn attribute_at(&self, index: usize) -> Result<&Attribute, SchemaError> {
        self.project
            .attributes
            .get(index)
            .ok_or(SchemaError::IndexOutOfRange {
                index,
                len: self.project.attributes.len(),
            })
    }

    fn check_catalog(&self, attribute: &Attribute) -> Result<(), SchemaError> {
        match &self.catalog {
            Some(catalog) => catalog.check_attribute(attribute),
            None => Ok(()),
        }
    }

    fn caution_if_frozen(&self) {
        if self.project.has_casebase {
            warn!(
                project = %self.project.name,
                "Project already has a casebase; attribute changes are not applied to indexed cases"
            );
        }
    }
}
