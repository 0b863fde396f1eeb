//! # OSCE Core
//!
//! Core logic for the OSCE case viewer.
//!
//! This crate contains the scenario data contract and its render pipeline:
//! - Scenario selection and JSON decoding (`provider`)
//! - Extraction of the typed examination record (`scenario`)
//! - Page building and the simulated diagnosis (`presenter`, `stepper`)
//! - HTML and Markdown renderers (`html`, `markdown`)
//!
//! **No API concerns**: HTTP servers and command-line parsing belong in `api-rest` and `cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod html;
pub mod markdown;
pub mod page;
pub mod presenter;
pub mod provider;
pub mod sample;
pub mod scenario;
pub mod stepper;

pub use config::CoreConfig;
pub use error::{ScenarioError, ScenarioResult};
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use page::{Block, Page, SidebarBlock};
pub use presenter::ScenarioPresenter;
pub use provider::{ScenarioProvider, Session, Upload};
pub use sample::sample_case;
pub use scenario::{OsceExamination, Scenario};
pub use stepper::{DiagnosisReport, SimulatedStepper};

use std::sync::Arc;

/// Runs one render pass: provider, then presenter.
#[derive(Clone, Debug)]
pub struct ScenarioService {
    cfg: Arc<CoreConfig>,
    provider: ScenarioProvider,
    presenter: ScenarioPresenter,
}

impl ScenarioService {
    /// Creates a new instance of ScenarioService.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let provider = ScenarioProvider::new(&cfg);
        Self {
            cfg,
            provider,
            presenter: ScenarioPresenter::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// A fresh session in the configured default state.
    pub fn default_session(&self) -> Session {
        Session::new(&self.cfg)
    }

    /// Render the page for `session`.
    ///
    /// # Errors
    ///
    /// Returns the provider's `InvalidInput`/`Parse` errors or the presenter's `Schema` error.
    /// Nothing is rendered when an error is returned.
    pub fn render(&self, session: &Session) -> ScenarioResult<Page> {
        let provided = self.provider.provide(session)?;
        self.presenter.present(session, provided.as_ref())
    }

    /// Render the page for `session`, falling back to the failure page on error.
    ///
    /// The error is returned alongside the failure page so callers can pick a status code.
    pub fn render_or_failure(&self, session: &Session) -> Result<Page, (ScenarioError, Page)> {
        self.render(session).map_err(|err| {
            tracing::warn!("render failed: {}", err);
            let page = self.presenter.failure_page(session, &err);
            (err, page)
        })
    }
}
