//! Scenario presenter.
//!
//! Turns the provider's output into a [`Page`]: the guidance warning when there is no scenario,
//! otherwise the fixed sequence of scenario sections, the "Run Agent Diagnosis" action and, when
//! that action was triggered, the simulated stepper transcript.
//!
//! Extraction happens before any block is built, so a schema mismatch never yields a partial
//! page.

use crate::constants::{
    ACTION_RUN_DIAGNOSIS, EXAMINATION_EXPANDER, FIELD_SCENARIO_FILE, FIELD_USE_SAMPLE,
    FINDINGS_HEADER, HISTORY_EXPANDER, NO_SCENARIO_WARNING, OBJECTIVE_HEADER, PAGE_CAPTION,
    PAGE_HEADING, PAGE_TITLE, PATIENT_HEADER, RUN_DIAGNOSIS_LABEL, SIDEBAR_HEADER,
    TEST_RESULTS_EXPANDER, THINKING_LABEL, UPLOAD_EXTENSION, UPLOAD_LABEL, USE_SAMPLE_LABEL,
};
use crate::page::{Block, CarriedUpload, Page, SidebarBlock};
use crate::provider::Session;
use crate::scenario::{OsceExamination, Scenario};
use crate::stepper::SimulatedStepper;
use crate::{ScenarioError, ScenarioResult};
use serde_json::Value;

/// Builds pages from sessions and provided scenarios.
#[derive(Debug, Clone, Default)]
pub struct ScenarioPresenter;

impl ScenarioPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Render the page for one pass.
    ///
    /// # Arguments
    ///
    /// * `session` - selection state; drives the sidebar echo and the diagnosis action
    /// * `scenario` - the provider's output for `session`
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Schema` if the scenario lacks the wrapper key or a required
    /// field. No page is produced in that case.
    pub fn present(
        &self,
        session: &Session,
        scenario: Option<&Value>,
    ) -> ScenarioResult<Page> {
        let mut blocks = header_blocks();

        match scenario {
            None => blocks.push(Block::Warning {
                markdown: NO_SCENARIO_WARNING.into(),
            }),
            Some(document) => {
                let osce = Scenario::extract(document)?;
                blocks.extend(scenario_blocks(&osce));
                blocks.push(Block::Button {
                    label: RUN_DIAGNOSIS_LABEL.into(),
                    action: ACTION_RUN_DIAGNOSIS.into(),
                });
                if session.run_diagnosis {
                    blocks.extend(diagnosis_blocks());
                }
            }
        }

        Ok(Page {
            title: PAGE_TITLE.into(),
            sidebar: sidebar_blocks(session, true),
            blocks,
        })
    }

    /// Page shown when a pass fails: heading, caption, sidebar and the error, nothing else.
    ///
    /// The failed upload is not carried forward.
    pub fn failure_page(&self, session: &Session, err: &ScenarioError) -> Page {
        let mut blocks = header_blocks();
        blocks.push(Block::Error {
            markdown: format!("`{}`: {}", err.kind(), err),
        });

        Page {
            title: PAGE_TITLE.into(),
            sidebar: sidebar_blocks(session, false),
            blocks,
        }
    }
}

fn header_blocks() -> Vec<Block> {
    vec![
        Block::Title {
            text: PAGE_HEADING.into(),
        },
        Block::markdown(PAGE_CAPTION),
    ]
}

fn sidebar_blocks(session: &Session, carry_upload: bool) -> Vec<SidebarBlock> {
    let carried = session
        .upload
        .as_ref()
        .filter(|_| carry_upload)
        .map(|upload| CarriedUpload {
            filename: upload.filename.clone(),
            document: upload.text(),
        });

    vec![
        SidebarBlock::Header {
            text: SIDEBAR_HEADER.into(),
        },
        SidebarBlock::Checkbox {
            label: USE_SAMPLE_LABEL.into(),
            name: FIELD_USE_SAMPLE.into(),
            checked: session.use_sample,
        },
        SidebarBlock::FileUploader {
            label: UPLOAD_LABEL.into(),
            name: FIELD_SCENARIO_FILE.into(),
            accept: format!(".{UPLOAD_EXTENSION}"),
            carried,
        },
    ]
}

fn scenario_blocks(osce: &OsceExamination) -> Vec<Block> {
    let patient = &osce.patient_actor;

    vec![
        Block::subheader(OBJECTIVE_HEADER),
        Block::Info {
            markdown: osce.objective_for_doctor.clone(),
        },
        Block::subheader(PATIENT_HEADER),
        Block::markdown(format!("- **Demographics:** {}", patient.demographics)),
        Block::markdown(format!(
            "- **Primary Symptom:** {}",
            patient.symptoms.primary_symptom
        )),
        Block::markdown(format!(
            "- **Other Symptoms:** {}",
            patient.symptoms.secondary_joined()
        )),
        Block::Expander {
            label: HISTORY_EXPANDER.into(),
            blocks: vec![
                Block::markdown(format!("**History:** {}", patient.history)),
                Block::markdown(format!(
                    "**Past Medical History:** {}",
                    patient.past_medical_history
                )),
                Block::markdown(format!("**Social History:** {}", patient.social_history)),
                Block::markdown(format!(
                    "**Review of Systems:** {}",
                    patient.review_of_systems
                )),
            ],
        },
        Block::subheader(FINDINGS_HEADER),
        Block::Expander {
            label: EXAMINATION_EXPANDER.into(),
            blocks: vec![Block::Json {
                value: osce.physical_examination_findings.clone(),
            }],
        },
        Block::Expander {
            label: TEST_RESULTS_EXPANDER.into(),
            blocks: vec![Block::Json {
                value: osce.test_results.clone(),
            }],
        },
    ]
}

fn diagnosis_blocks() -> Vec<Block> {
    tracing::info!("{}", THINKING_LABEL);
    let report = SimulatedStepper::new().run();

    let mut blocks = vec![Block::Status {
        text: THINKING_LABEL.into(),
    }];
    blocks.extend(
        report
            .lines
            .iter()
            .map(|line| Block::markdown(line.to_markdown())),
    );
    blocks.push(Block::Success {
        markdown: report.banner_markdown(),
    });
    blocks.push(Block::markdown(report.rationale_markdown()));
    tracing::info!("simulated diagnosis ready: {}", report.diagnosis);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WRAPPER_KEY;
    use crate::provider::Upload;
    use crate::sample::sample_case;
    use serde_json::json;

    fn sample() -> Value {
        sample_case()
    }

    fn markdown_of(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Markdown { markdown } => Some(markdown.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn no_scenario_shows_only_the_warning() {
        let page = ScenarioPresenter::new()
            .present(&Session::default(), None)
            .unwrap();
        assert_eq!(page.blocks.len(), 3);
        assert_eq!(
            page.blocks[2],
            Block::Warning {
                markdown: NO_SCENARIO_WARNING.into()
            }
        );
    }

    #[test]
    fn sample_renders_sections_in_order() {
        let session = Session {
            use_sample: true,
            ..Session::default()
        };
        let page = ScenarioPresenter::new()
            .present(&session, Some(&sample()))
            .unwrap();

        let kinds: Vec<&str> = page
            .blocks
            .iter()
            .map(|b| match b {
                Block::Title { .. } => "title",
                Block::Subheader { .. } => "subheader",
                Block::Markdown { .. } => "markdown",
                Block::Info { .. } => "info",
                Block::Expander { .. } => "expander",
                Block::Button { .. } => "button",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "title", "markdown", "subheader", "info", "subheader", "markdown", "markdown",
                "markdown", "expander", "subheader", "expander", "expander", "button"
            ]
        );

        assert_eq!(
            page.blocks[3],
            Block::Info {
                markdown: "Assess and diagnose the patient presenting with double vision, difficulty climbing stairs, and upper limb weakness.".into()
            }
        );
        assert_eq!(
            markdown_of(&page.blocks)[1..],
            [
                "- **Demographics:** 35-year-old female",
                "- **Primary Symptom:** Double vision",
                "- **Other Symptoms:** Difficulty climbing stairs, Weakness in upper limbs, Improvement of symptoms after rest",
            ]
        );
    }

    #[test]
    fn history_expander_holds_four_fields() {
        let page = ScenarioPresenter::new()
            .present(&Session::default(), Some(&sample()))
            .unwrap();
        let Block::Expander { label, blocks } = &page.blocks[8] else {
            panic!("expected expander");
        };
        assert_eq!(label, HISTORY_EXPANDER);
        let lines = markdown_of(blocks);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("**History:** 1-month history"));
        assert_eq!(
            lines[3],
            "**Review of Systems:** No chest pain, palpitations, shortness of breath, or infections."
        );
    }

    #[test]
    fn findings_are_shown_verbatim() {
        let page = ScenarioPresenter::new()
            .present(&Session::default(), Some(&sample()))
            .unwrap();
        let doc = sample_case();
        assert_eq!(
            page.blocks[10],
            Block::Expander {
                label: EXAMINATION_EXPANDER.into(),
                blocks: vec![Block::Json {
                    value: doc[WRAPPER_KEY]["Physical_Examination_Findings"].clone()
                }],
            }
        );
        assert_eq!(
            page.blocks[11],
            Block::Expander {
                label: TEST_RESULTS_EXPANDER.into(),
                blocks: vec![Block::Json {
                    value: doc[WRAPPER_KEY]["Test_Results"].clone()
                }],
            }
        );
    }

    fn chest_pain_case() -> Value {
        json!({
            "OSCE_Examination": {
                "Objective_for_Doctor": "Evaluate acute chest pain in the emergency department.",
                "Patient_Actor": {
                    "Demographics": "62-year-old male",
                    "History": "Crushing central chest pain for 40 minutes.",
                    "Symptoms": {
                        "Primary_Symptom": "Chest pain",
                        "Secondary_Symptoms": ["Sweating"]
                    },
                    "Past_Medical_History": "Type 2 diabetes.",
                    "Social_History": "Smokes 20 a day.",
                    "Review_of_Systems": "Nausea, no cough."
                },
                "Physical_Examination_Findings": ["Pale", "Clammy", { "BP": "90/60 mmHg" }],
                "Test_Results": "ECG pending",
                "Correct_Diagnosis": "Inferior STEMI"
            }
        })
    }

    #[test]
    fn distinct_record_renders_its_own_content() {
        let document = chest_pain_case();
        let page = ScenarioPresenter::new()
            .present(&Session::default(), Some(&document))
            .unwrap();

        assert_eq!(
            page.blocks[3],
            Block::Info {
                markdown: "Evaluate acute chest pain in the emergency department.".into()
            }
        );
        assert_eq!(
            markdown_of(&page.blocks)[1..],
            [
                "- **Demographics:** 62-year-old male",
                "- **Primary Symptom:** Chest pain",
                "- **Other Symptoms:** Sweating",
            ]
        );

        let Block::Expander { blocks, .. } = &page.blocks[8] else {
            panic!("expected expander");
        };
        assert_eq!(
            markdown_of(blocks),
            [
                "**History:** Crushing central chest pain for 40 minutes.",
                "**Past Medical History:** Type 2 diabetes.",
                "**Social History:** Smokes 20 a day.",
                "**Review of Systems:** Nausea, no cough.",
            ]
        );

        assert_eq!(
            page.blocks[10],
            Block::Expander {
                label: EXAMINATION_EXPANDER.into(),
                blocks: vec![Block::Json {
                    value: json!(["Pale", "Clammy", { "BP": "90/60 mmHg" }])
                }],
            }
        );
        assert_eq!(
            page.blocks[11],
            Block::Expander {
                label: TEST_RESULTS_EXPANDER.into(),
                blocks: vec![Block::Json {
                    value: json!("ECG pending")
                }],
            }
        );
    }

    #[test]
    fn empty_secondary_symptoms_join_to_nothing() {
        let mut document = chest_pain_case();
        document[WRAPPER_KEY]["Patient_Actor"]["Symptoms"]["Secondary_Symptoms"] = json!([]);
        let page = ScenarioPresenter::new()
            .present(&Session::default(), Some(&document))
            .unwrap();
        assert_eq!(markdown_of(&page.blocks)[3], "- **Other Symptoms:** ");
    }

    #[test]
    fn missing_wrapper_renders_nothing() {
        let provided = json!({ "Case": {} });
        let err = ScenarioPresenter::new()
            .present(&Session::default(), Some(&provided))
            .expect_err("should fail");
        assert!(matches!(err, ScenarioError::Schema { .. }));
    }

    #[test]
    fn run_diagnosis_ignores_correct_diagnosis() {
        let mut document = sample_case();
        document[WRAPPER_KEY]["Correct_Diagnosis"] = json!("Guillain-Barré syndrome");
        let provided = document;
        let session = Session {
            run_diagnosis: true,
            ..Session::default()
        };
        let page = ScenarioPresenter::new()
            .present(&session, Some(&provided))
            .unwrap();

        let after_button: Vec<&Block> = page
            .blocks
            .iter()
            .skip_while(|b| !matches!(b, Block::Button { .. }))
            .skip(1)
            .collect();
        assert_eq!(
            after_button[0],
            &Block::Status {
                text: THINKING_LABEL.into()
            }
        );

        let step_lines: Vec<&Block> = after_button
            .iter()
            .copied()
            .filter(|b| matches!(b, Block::Markdown { markdown } if markdown.starts_with("**")))
            .collect();
        assert_eq!(step_lines.len(), 10);

        let banners: Vec<&Block> = after_button
            .iter()
            .copied()
            .filter(|b| matches!(b, Block::Success { .. }))
            .collect();
        assert_eq!(
            banners,
            [&Block::Success {
                markdown: "✅ Diagnosis Ready: **Myasthenia Gravis**".into()
            }]
        );
        assert!(!format!("{page:?}").contains("Diagnosis Ready: **Guillain"));
    }

    #[test]
    fn sidebar_echoes_session_and_carries_upload() {
        let session = Session {
            use_sample: false,
            upload: Some(Upload::new(Some("case.json".into()), b"{}".to_vec())),
            run_diagnosis: false,
        };
        let page = ScenarioPresenter::new().present(&session, None).unwrap();
        assert!(matches!(
            &page.sidebar[1],
            SidebarBlock::Checkbox { checked: false, .. }
        ));
        assert!(matches!(
            &page.sidebar[2],
            SidebarBlock::FileUploader { carried: Some(c), .. } if c.document == "{}"
        ));
    }

    #[test]
    fn failure_page_has_no_scenario_sections() {
        let session = Session {
            use_sample: false,
            upload: Some(Upload::new(Some("case.json".into()), b"{".to_vec())),
            run_diagnosis: true,
        };
        let err = ScenarioError::InvalidInput("bad".into());
        let page = ScenarioPresenter::new().failure_page(&session, &err);
        assert_eq!(page.blocks.len(), 3);
        assert_eq!(page.blocks[..2], header_blocks()[..]);
        assert!(matches!(&page.blocks[2], Block::Error { markdown } if markdown.contains("bad")));
        assert_eq!(page.sidebar.len(), 3);
        assert!(matches!(
            &page.sidebar[2],
            SidebarBlock::FileUploader { carried: None, .. }
        ));
    }
}
