//! Constants used throughout the OSCE core crate.
//!
//! Page copy, schema keys and form field names live here so the presenter, the renderers and
//! the HTTP layer agree on them.

/// Top-level key wrapping the examination object in every scenario document.
pub const WRAPPER_KEY: &str = "OSCE_Examination";

/// Browser tab title.
pub const PAGE_TITLE: &str = "Agentic AI - Medical OSCE Diagnosis";

/// Main heading shown at the top of every page.
pub const PAGE_HEADING: &str = "🧠 Agentic Medical AI — OSCE Case Diagnosis";

/// Caption shown under the main heading.
pub const PAGE_CAPTION: &str =
    "Demonstration of a multi-agent AI reasoning system on structured patient scenarios.";

pub const SIDEBAR_HEADER: &str = "📋 Scenario Input";
pub const USE_SAMPLE_LABEL: &str = "Use Sample Case";
pub const UPLOAD_LABEL: &str = "Upload JSON File";

/// File extension accepted by the uploader.
pub const UPLOAD_EXTENSION: &str = "json";

pub const OBJECTIVE_HEADER: &str = "🧑‍⚕️ Doctor's Objective";
pub const PATIENT_HEADER: &str = "🧍‍♀️ Patient Details";
pub const HISTORY_EXPANDER: &str = "Full Patient History";
pub const FINDINGS_HEADER: &str = "🧪 Physical & Test Findings";
pub const EXAMINATION_EXPANDER: &str = "Physical Examination";
pub const TEST_RESULTS_EXPANDER: &str = "Test Results";

pub const RUN_DIAGNOSIS_LABEL: &str = "🤖 Run Agent Diagnosis";

/// Shown while the simulated agent runs.
pub const THINKING_LABEL: &str = "Agent is thinking...";

/// Guidance shown when no scenario is selected.
pub const NO_SCENARIO_WARNING: &str =
    "Please select 'Use Sample Case' or upload a scenario JSON file.";

/// Diagnosis announced by the simulated stepper, independent of the scenario.
pub const SIMULATED_DIAGNOSIS: &str = "Myasthenia Gravis";

/// Caption shown under the diagnosis banner.
pub const DIAGNOSIS_RATIONALE: &str = "This diagnosis was generated based on patient symptoms, physical exam, and test findings using agentic step-wise inference.";

/// Number of reasoning steps the simulated stepper walks through.
pub const STEP_COUNT: u8 = 5;

/// Progress added by each step, in percent.
pub const STEP_PROGRESS_PERCENT: u8 = 20;

/// Default upload limit (200 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Form field carrying the "Use Sample Case" checkbox.
pub const FIELD_USE_SAMPLE: &str = "use_sample";
/// Form field carrying a freshly chosen file.
pub const FIELD_SCENARIO_FILE: &str = "scenario_file";
/// Hidden form field carrying a previously uploaded document between actions.
pub const FIELD_SCENARIO_DOCUMENT: &str = "scenario_document";
/// Hidden form field carrying the previously uploaded file name.
pub const FIELD_SCENARIO_FILENAME: &str = "scenario_filename";
/// Form field naming the submitted action.
pub const FIELD_ACTION: &str = "action";
/// Action value that triggers the simulated diagnosis.
pub const ACTION_RUN_DIAGNOSIS: &str = "run_diagnosis";
/// Action value for re-rendering after the sidebar changed.
pub const ACTION_APPLY: &str = "apply";
