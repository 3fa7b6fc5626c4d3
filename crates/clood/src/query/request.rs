//! Retrieve and retain request/response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::Case;
use crate::schema::Project;

use super::assembly::{assemble_features, prepare_retained_case, QueryFeature};
use super::QueryError;

/// Body of `POST /retrieve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveRequest {
    pub data: Vec<QueryFeature>,
    pub topk: usize,
    #[serde(rename = "globalSim")]
    pub global_sim: String,
    pub explanation: bool,
    pub project: Project,
}

impl RetrieveRequest {
    /// Assemble the criteria and build a request with the usual defaults
    /// (top 5, weighted sum, no explanation).
    pub fn new(project: Project, mut data: Vec<QueryFeature>) -> Result<Self, QueryError> {
        assemble_features(&mut data)?;
        Ok(Self {
            data,
            topk: 5,
            global_sim: "Weighted Sum".to_string(),
            explanation: false,
            project,
        })
    }

    pub fn with_topk(mut self, topk: usize) -> Self {
        self.topk = topk;
        self
    }

    pub fn with_explanation(mut self, explanation: bool) -> Self {
        self.explanation = explanation;
        self
    }
}

/// Per-attribute similarity contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchExplanation {
    pub field: String,
    pub similarity: f64,
}

/// A retrieved case with its global score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCase {
    #[serde(rename = "score__", default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_explanation: Option<Vec<MatchExplanation>>,
    #[serde(flatten)]
    pub fields: Case,
}

/// Body returned by `POST /retrieve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveResponse {
    /// Reuse proposal built from the best cases.
    #[serde(default)]
    pub recommended: Case,
    #[serde(rename = "bestK", default)]
    pub best_k: Vec<ScoredCase>,
    #[serde(rename = "retrieveTime", default, skip_serializing_if = "Option::is_none")]
    pub retrieve_time: Option<Value>,
    #[serde(rename = "esTime", default, skip_serializing_if = "Option::is_none")]
    pub es_time: Option<Value>,
}

/// Body of `POST /retain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainRequest {
    pub data: Case,
    pub project: Project,
}

impl RetainRequest {
    /// Prepare `case` for the project's attributes and wrap it.
    pub fn new(project: Project, mut case: Case) -> Result<Self, QueryError> {
        prepare_retained_case(&mut case, &project.attributes)?;
        Ok(Self {
            data: case,
            project,
        })
    }
}
