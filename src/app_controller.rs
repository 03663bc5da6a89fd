/*!
 * Application controller.
 *
 * Wires the external collaborators around the check pipeline: document
 * parsing, provider construction with credentials from the environment,
 * progress display, cancellation on Ctrl-C, and report writing.
 */

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::{CheckProvider, Config};
use crate::document::extract_paragraphs_from_file;
use crate::pipeline::{
    CancellationToken, CheckOrchestrator, PipelineConfig, ProgressEvent, ProgressReporter,
    RunStatus,
};
use crate::providers::gemini::Gemini;
use crate::providers::openai::OpenAI;
use crate::providers::ProviderClient;
use crate::report::{default_output_path, write_csv_report};

/// Main application controller for a single document run
pub struct Controller {
    config: Config,
}

/// Progress reporter that drives an indicatif progress bar
struct ProgressBarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for ProgressBarReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::ParagraphStarted { index } => {
                self.bar.set_position(index as u64);
                self.bar.set_message(format!("paragraph {}", index + 1));
            }
            ProgressEvent::SessionRefreshed { index } => {
                self.bar
                    .set_message(format!("refreshing session before paragraph {}", index + 1));
            }
            ProgressEvent::CheckFailed {
                index,
                check,
                reason,
            } => {
                self.bar.println(format!(
                    "paragraph {}: check '{}' failed: {}",
                    index + 1,
                    check,
                    reason
                ));
            }
            ProgressEvent::RunCompleted { rows } => {
                self.bar.set_position(rows as u64);
            }
            ProgressEvent::RunCancelled { rows_completed } => {
                self.bar
                    .println(format!("cancelled after {} paragraphs", rows_completed));
            }
            ProgressEvent::RunAborted { reason } => {
                self.bar.println(format!("aborted: {}", reason));
            }
        }
    }
}

impl Controller {
    /// Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full check flow for one document
    pub async fn run(&self, input_path: &Path, output_path: Option<PathBuf>) -> Result<()> {
        let paragraphs = extract_paragraphs_from_file(input_path)?;

        let provider = self.build_provider()?;
        info!(
            "docproof: {} - {} ({} paragraphs)",
            self.config.provider.display_name(),
            self.config.model,
            paragraphs.len()
        );

        let progress_bar = ProgressBar::new(paragraphs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} paragraphs {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        let reporter = ProgressBarReporter {
            bar: progress_bar.clone(),
        };

        // Ctrl-C requests cooperative cancellation; the run stops at the next
        // paragraph boundary and still writes the rows finalized so far
        let cancel = CancellationToken::new();
        let cancel_on_signal = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Cancellation requested, finishing current paragraph…");
                cancel_on_signal.cancel();
            }
        });

        let mut orchestrator =
            CheckOrchestrator::new(provider, PipelineConfig::from(&self.config));
        let report = orchestrator.run(&paragraphs, &reporter, &cancel).await?;
        progress_bar.finish_and_clear();

        let output = output_path.unwrap_or_else(|| default_output_path(input_path));
        let supplementary_names: Vec<String> = self
            .config
            .additional_checks
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();
        write_csv_report(&output, &report.rows, &supplementary_names)?;

        info!("{}", report.summary());
        if report.status == RunStatus::Cancelled {
            warn!(
                "Partial result: {} of {} paragraphs checked",
                report.rows.len(),
                paragraphs.len()
            );
        }
        info!("Output file: {}", output.display());
        Ok(())
    }

    /// Bind the configured provider, reading its API key from the process
    /// environment. Credentials never live in the persisted configuration.
    fn build_provider(&self) -> Result<Box<dyn ProviderClient>> {
        let env_var = self.config.provider.api_key_env_var();
        let api_key = std::env::var(env_var)
            .with_context(|| format!("Missing API key: set the {} environment variable", env_var))?;
        if api_key.trim().is_empty() {
            return Err(anyhow!(
                "Missing API key: the {} environment variable is empty",
                env_var
            ));
        }

        let provider: Box<dyn ProviderClient> = match self.config.provider {
            CheckProvider::OpenAI => Box::new(OpenAI::new(
                api_key,
                self.config.model.clone(),
                self.config.endpoint.clone(),
                self.config.timeout_secs,
            )),
            CheckProvider::Gemini => Box::new(Gemini::new(
                api_key,
                self.config.model.clone(),
                self.config.endpoint.clone(),
                self.config.timeout_secs,
            )),
        };
        Ok(provider)
    }
}
