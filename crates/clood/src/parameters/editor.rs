use tracing::debug;

use crate::schema::{
    Attribute, BoundsOptions, DateDecayOptions, LocationDecayOptions, NumberDecayOptions,
    OntologyOptions, SimilarityOptions, VectorOptions,
};

use super::table::TableEditor;
use super::validate;
use super::values::EnumEditor;
use super::EditorError;

/// Editable parameters for one similarity family.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterForm {
    Bounds(BoundsOptions),
    NumberDecay(NumberDecayOptions),
    DateDecay(DateDecayOptions),
    LocationDecay(LocationDecayOptions),
    Table(TableEditor),
    Enum(EnumEditor),
    Ontology(OntologyOptions),
    Vector(VectorOptions),
    /// The similarity takes no parameters.
    Unset,
}

impl ParameterForm {
    fn seed(attribute: &Attribute) -> Self {
        let options = match &attribute.options {
            Some(options) if options.fits(attribute.similarity) => Some(options.clone()),
            _ => SimilarityOptions::default_for(attribute.similarity, &attribute.name),
        };
        match options {
            Some(SimilarityOptions::Bounds(o)) => ParameterForm::Bounds(o),
            Some(SimilarityOptions::NumberDecay(o)) => ParameterForm::NumberDecay(o),
            Some(SimilarityOptions::DateDecay(o)) => ParameterForm::DateDecay(o),
            Some(SimilarityOptions::LocationDecay(o)) => ParameterForm::LocationDecay(o),
            Some(SimilarityOptions::Table(o)) => ParameterForm::Table(TableEditor::new(&o)),
            Some(SimilarityOptions::Enum(o)) => ParameterForm::Enum(EnumEditor::new(&o)),
            Some(SimilarityOptions::Ontology(o)) => ParameterForm::Ontology(o),
            Some(SimilarityOptions::Vector(o)) => ParameterForm::Vector(o),
            None => ParameterForm::Unset,
        }
    }

    fn into_options(self) -> Result<Option<SimilarityOptions>, EditorError> {
        let options = match self {
            ParameterForm::Bounds(o) => {
                validate::bounds(&o)?;
                SimilarityOptions::Bounds(o)
            }
            ParameterForm::NumberDecay(o) => {
                validate::number_decay(&o)?;
                SimilarityOptions::NumberDecay(o)
            }
            ParameterForm::DateDecay(o) => {
                validate::date_decay(&o)?;
                SimilarityOptions::DateDecay(o)
            }
            ParameterForm::LocationDecay(o) => {
                validate::location_decay(&o)?;
                SimilarityOptions::LocationDecay(o)
            }
            ParameterForm::Table(editor) => SimilarityOptions::Table(editor.to_options()?),
            ParameterForm::Enum(editor) => SimilarityOptions::Enum(editor.to_options()),
            ParameterForm::Ontology(o) => {
                validate::ontology(&o)?;
                SimilarityOptions::Ontology(o)
            }
            ParameterForm::Vector(o) => {
                validate::vector(&o)?;
                SimilarityOptions::Vector(o)
            }
            ParameterForm::Unset => return Ok(None),
        };
        Ok(Some(options))
    }
}

/// Scratch copy of an attribute with a parameter form for its similarity.
#[derive(Debug, Clone)]
pub struct ParameterEditor {
    scratch: Attribute,
    form: ParameterForm,
}

impl ParameterEditor {
    /// Begin editing; the form is seeded from the attribute's options, or the
    /// family defaults when it has none that fit.
    pub fn open(attribute: &Attribute) -> Self {
        Self {
            scratch: attribute.clone(),
            form: ParameterForm::seed(attribute),
        }
    }

    /// The attribute being edited, with its options as they were on open.
    pub fn attribute(&self) -> &Attribute {
        &self.scratch
    }

    pub fn form(&self) -> &ParameterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ParameterForm {
        &mut self.form
    }

    pub fn table_mut(&mut self) -> Option<&mut TableEditor> {
        match &mut self.form {
            ParameterForm::Table(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn enum_mut(&mut self) -> Option<&mut EnumEditor> {
        match &mut self.form {
            ParameterForm::Enum(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn ontology_mut(&mut self) -> Option<&mut OntologyOptions> {
        match &mut self.form {
            ParameterForm::Ontology(options) => Some(options),
            _ => None,
        }
    }

    /// Validate the form and return the edited attribute.
    pub fn save(self) -> Result<Attribute, EditorError> {
        let mut attribute = self.scratch;
        attribute.options = self.form.into_options()?;
        debug!(attribute = %attribute.name, "parameters saved");
        Ok(attribute)
    }

    /// Discard the scratch copy.
    pub fn cancel(self) {}
}
