//! Scenario record model and extraction.
//!
//! A scenario document is first decoded into a generic JSON tree (see [`crate::provider`]).
//! Extraction then maps that tree onto the typed examination record below. Only the fields the
//! presenter needs are typed; the physical examination findings and test results stay as
//! free-form trees and are shown verbatim.
//!
//! Extraction uses `serde_path_to_error` so a mismatch names the path that failed, for example
//! `OSCE_Examination.Patient_Actor.Symptoms.Primary_Symptom`.

use crate::constants::WRAPPER_KEY;
use crate::{ScenarioError, ScenarioResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The examination object stored under [`WRAPPER_KEY`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct OsceExamination {
    #[serde(rename = "Objective_for_Doctor")]
    pub objective_for_doctor: String,

    #[serde(rename = "Patient_Actor")]
    pub patient_actor: PatientActor,

    /// Free-form tree, rendered verbatim.
    #[serde(rename = "Physical_Examination_Findings")]
    pub physical_examination_findings: Value,

    /// Free-form tree, rendered verbatim.
    #[serde(rename = "Test_Results")]
    pub test_results: Value,

    /// Recorded answer for the case. The simulated stepper does not read it.
    #[serde(rename = "Correct_Diagnosis")]
    pub correct_diagnosis: String,
}

/// The patient as played by the actor.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PatientActor {
    #[serde(rename = "Demographics")]
    pub demographics: String,

    #[serde(rename = "History")]
    pub history: String,

    #[serde(rename = "Symptoms")]
    pub symptoms: Symptoms,

    #[serde(rename = "Past_Medical_History")]
    pub past_medical_history: String,

    #[serde(rename = "Social_History")]
    pub social_history: String,

    #[serde(rename = "Review_of_Systems")]
    pub review_of_systems: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Symptoms {
    #[serde(rename = "Primary_Symptom")]
    pub primary_symptom: String,

    /// Display order is the document order.
    #[serde(rename = "Secondary_Symptoms")]
    pub secondary_symptoms: Vec<String>,
}

impl Symptoms {
    /// Secondary symptoms joined for a single display line.
    pub fn secondary_joined(&self) -> String {
        self.secondary_symptoms.join(", ")
    }
}

/// Wire shape of a whole scenario document: the wrapper key and nothing else we read.
///
/// Other top-level keys are tolerated and ignored.
#[derive(Deserialize)]
struct ScenarioWire {
    #[serde(rename = "OSCE_Examination")]
    osce_examination: OsceExamination,
}

/// Scenario extraction operations.
///
/// This is a zero-sized type used for namespacing; all methods are associated functions.
pub struct Scenario;

impl Scenario {
    /// Extract the examination object from a decoded scenario document.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Schema` if:
    /// - the document is not an object,
    /// - the wrapper key is absent,
    /// - any required nested field is absent or has the wrong type.
    pub fn extract(document: &Value) -> ScenarioResult<OsceExamination> {
        if !document.is_object() {
            return Err(ScenarioError::Schema {
                path: "<root>".into(),
                message: format!("expected an object holding '{WRAPPER_KEY}'"),
            });
        }

        match serde_path_to_error::deserialize::<_, ScenarioWire>(document) {
            Ok(wire) => Ok(wire.osce_examination),
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                tracing::warn!("scenario schema mismatch at {}: {}", path, source);
                Err(ScenarioError::Schema {
                    path,
                    message: source.to_string(),
                })
            }
        }
    }

}
