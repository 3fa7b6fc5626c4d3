//! Reuse and revise helpers over a retrieve response.

use crate::input::Case;

use super::request::{RetrieveResponse, ScoredCase};

/// Replace the recommendation with a chosen case, keeping only the keys the
/// recommendation already has.
pub fn reuse_case(response: &mut RetrieveResponse, chosen: &ScoredCase) {
    let reused = response
        .recommended
        .keys()
        .map(|key| {
            let value = chosen.fields.get(key).cloned().unwrap_or_default();
            (key.clone(), value)
        })
        .collect();
    response.recommended = reused;
}

/// `(field, similarity)` pairs for a scored case, ending with the global score.
pub fn explanation_series(case: &ScoredCase) -> Vec<(String, f64)> {
    let mut series: Vec<(String, f64)> = case
        .match_explanation
        .iter()
        .flatten()
        .map(|m| (m.field.clone(), m.similarity))
        .collect();
    series.push(("Global Similarity".to_string(), case.score));
    series
}

/// Staged edit of a recommended case.
///
/// The working copy can be changed freely; [`cancel`](Self::cancel) hands back
/// the case as it was when the revision began.
#[derive(Debug, Clone)]
pub struct Revision {
    original: Case,
    working: Case,
}

impl Revision {
    pub fn begin(recommended: &Case) -> Self {
        Self {
            original: recommended.clone(),
            working: recommended.clone(),
        }
    }

    pub fn case(&self) -> &Case {
        &self.working
    }

    pub fn case_mut(&mut self) -> &mut Case {
        &mut self.working
    }

    /// Keep the edits.
    pub fn commit(self) -> Case {
        self.working
    }

    /// Drop the edits.
    pub fn cancel(self) -> Case {
        self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MatchExplanation;
    use serde_json::{json, Value};

    fn scored(score: f64, fields: Value) -> ScoredCase {
        ScoredCase {
            score,
            match_explanation: None,
            fields: serde_json::from_value(fields).unwrap(),
        }
    }

    #[test]
    fn test_reuse_copies_only_recommended_keys() {
        let mut response = RetrieveResponse {
            recommended: serde_json::from_value(json!({"make": "Ford", "year": 2001})).unwrap(),
            best_k: vec![],
            retrieve_time: None,
            es_time: None,
        };
        let chosen = scored(0.8, json!({"make": "Fiat", "year": 1990, "id": "x"}));

        reuse_case(&mut response, &chosen);
        assert_eq!(
            serde_json::to_value(&response.recommended).unwrap(),
            json!({"make": "Fiat", "year": 1990})
        );
    }

    #[test]
    fn test_explanation_series_appends_global() {
        let mut case = scored(0.75, json!({}));
        case.match_explanation = Some(vec![
            MatchExplanation {
                field: "make".to_string(),
                similarity: 1.0,
            },
            MatchExplanation {
                field: "year".to_string(),
                similarity: 0.5,
            },
        ]);
        let series = explanation_series(&case);
        assert_eq!(series.len(), 3);
        assert_eq!(series[2], ("Global Similarity".to_string(), 0.75));

        assert_eq!(explanation_series(&scored(0.1, json!({}))).len(), 1);
    }

    #[test]
    fn test_revision_cancel_restores() {
        let case: Case = serde_json::from_value(json!({"make": "Ford"})).unwrap();
        let mut revision = Revision::begin(&case);
        revision
            .case_mut()
            .insert("make".to_string(), json!("Audi"));
        assert_eq!(revision.case()["make"], "Audi");
        assert_eq!(revision.clone().cancel(), case);
        assert_eq!(revision.commit()["make"], "Audi");
    }
}
