//! Simulated diagnosis stepper.
//!
//! A fixed five-step sequence standing in for an agent reasoning loop. Each step emits a doctor
//! line and a patient line; after the last step the stepper is done and announces a constant
//! diagnosis. The scenario's own `Correct_Diagnosis` is never consulted.

use crate::constants::{DIAGNOSIS_RATIONALE, SIMULATED_DIAGNOSIS, STEP_COUNT, STEP_PROGRESS_PERCENT};
use serde::Serialize;

/// Who speaks a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Doctor,
    Patient,
}

impl Speaker {
    fn label(self) -> &'static str {
        match self {
            Speaker::Doctor => "Doctor",
            Speaker::Patient => "Patient",
        }
    }
}

/// One transcript line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepLine {
    pub step: u8,
    pub speaker: Speaker,
    pub progress_percent: u8,
    pub text: String,
}

impl StepLine {
    /// `**Doctor [20%]:** Agent reasoning step 1...`
    pub fn to_markdown(&self) -> String {
        format!(
            "**{} [{}%]:** {}",
            self.speaker.label(),
            self.progress_percent,
            self.text
        )
    }
}

/// Position in the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepperState {
    /// Next step to run, `1..=STEP_COUNT`.
    Step(u8),
    Done,
}

/// Walks `Step(1) .. Step(STEP_COUNT)` and then `Done`, with no branching.
#[derive(Clone, Debug)]
pub struct SimulatedStepper {
    state: StepperState,
}

/// Everything a completed run produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosisReport {
    pub lines: Vec<StepLine>,
    pub diagnosis: String,
    pub rationale: String,
}

impl DiagnosisReport {
    /// `✅ Diagnosis Ready: **Myasthenia Gravis**`
    pub fn banner_markdown(&self) -> String {
        format!("✅ Diagnosis Ready: **{}**", self.diagnosis)
    }

    pub fn rationale_markdown(&self) -> String {
        format!("> {}", self.rationale)
    }
}

impl Default for SimulatedStepper {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedStepper {
    pub fn new() -> Self {
        Self {
            state: StepperState::Step(1),
        }
    }

    pub fn state(&self) -> StepperState {
        self.state
    }

    /// Run the current step and move to the next state.
    ///
    /// Returns the step's two lines, or `None` once the stepper is done.
    pub fn advance(&mut self) -> Option<[StepLine; 2]> {
        let StepperState::Step(step) = self.state else {
            return None;
        };

        let progress_percent = step * STEP_PROGRESS_PERCENT;
        tracing::debug!("simulated reasoning step {} ({}%)", step, progress_percent);

        self.state = if step >= STEP_COUNT {
            StepperState::Done
        } else {
            StepperState::Step(step + 1)
        };

        Some([
            StepLine {
                step,
                speaker: Speaker::Doctor,
                progress_percent,
                text: format!("Agent reasoning step {step}..."),
            },
            StepLine {
                step,
                speaker: Speaker::Patient,
                progress_percent,
                text: "Simulated patient response based on scenario.".into(),
            },
        ])
    }

    /// Run every remaining step and return the transcript with the fixed diagnosis.
    pub fn run(mut self) -> DiagnosisReport {
        let mut lines = Vec::with_capacity(usize::from(STEP_COUNT) * 2);
        while let Some(pair) = self.advance() {
            lines.extend(pair);
        }

        DiagnosisReport {
            lines,
            diagnosis: SIMULATED_DIAGNOSIS.into(),
            rationale: DIAGNOSIS_RATIONALE.into(),
        }
    }
}
