use clap::{Parser, Subcommand};
use osce_core::config::{max_upload_bytes_from_env_value, use_sample_from_env_value};
use osce_core::{
    sample_case, CoreConfig, HtmlRenderer, MarkdownRenderer, Page, Scenario, ScenarioProvider,
    ScenarioResult, ScenarioService, Session, Upload,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "osce")]
#[command(about = "OSCE case viewer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in sample scenario as JSON
    Sample,
    /// Render a scenario page
    Render {
        /// Scenario JSON file; only read when the sample is off (see --no-sample)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Turn "Use Sample Case" off
        #[arg(long)]
        no_sample: bool,
        /// Trigger "Run Agent Diagnosis"
        #[arg(long)]
        run_diagnosis: bool,
        /// Emit HTML instead of Markdown
        #[arg(long)]
        html: bool,
    },
    /// Check that a scenario file parses and has every required field
    Validate {
        /// Scenario JSON file
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("osce_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let default_use_sample = use_sample_from_env_value(std::env::var("OSCE_USE_SAMPLE").ok())?;
    let max_upload_bytes =
        max_upload_bytes_from_env_value(std::env::var("OSCE_MAX_UPLOAD_BYTES").ok())?;
    let cfg = Arc::new(CoreConfig::new(default_use_sample, max_upload_bytes)?);

    match cli.command {
        Some(Commands::Sample) => {
            println!("{}", serde_json::to_string_pretty(&sample_case())?);
        }
        Some(Commands::Render {
            file,
            no_sample,
            run_diagnosis,
            html,
        }) => {
            let session = session_from_args(&cfg, file.as_deref(), no_sample, run_diagnosis)?;
            let service = ScenarioService::new(cfg);
            match service.render_or_failure(&session) {
                Ok(page) => print_page(&page, html),
                Err((err, page)) => {
                    print_page(&page, html);
                    return Err(err.into());
                }
            }
        }
        Some(Commands::Validate { path }) => {
            let upload = Upload::from_path(&path)?;
            let document = ScenarioProvider::new(&cfg).decode(&upload)?;
            let osce = Scenario::extract(&document)?;
            println!(
                "{}: OK ({}, primary symptom: {})",
                path.display(),
                osce.patient_actor.demographics,
                osce.patient_actor.symptoms.primary_symptom
            );
        }
        None => {
            println!("Use 'osce --help' for commands");
        }
    }

    Ok(())
}

/// Build the render session. The file is only read when the sample is off, since the sample
/// would win anyway.
fn session_from_args(
    cfg: &CoreConfig,
    file: Option<&Path>,
    no_sample: bool,
    run_diagnosis: bool,
) -> ScenarioResult<Session> {
    let use_sample = cfg.default_use_sample() && !no_sample;
    let upload = if use_sample {
        None
    } else {
        file.map(Upload::from_path).transpose()?
    };
    Ok(Session {
        use_sample,
        upload,
        run_diagnosis,
    })
}

fn print_page(page: &Page, html: bool) {
    if html {
        print!("{}", HtmlRenderer::default().render(page));
    } else {
        print!("{}", MarkdownRenderer::new().render(page));
    }
}
