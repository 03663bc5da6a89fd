/*!
 * # docproof - AI grammar checking for documents
 *
 * A Rust library for reviewing paragraph-structured documents with AI.
 *
 * ## Features
 *
 * - Split a text document into ordered, non-empty paragraphs
 * - Review each paragraph with an AI provider:
 *   - Grammar/style check (always)
 *   - Any number of user-defined supplementary checks
 * - Conversational sessions refreshed at a configured paragraph interval
 * - Bounded fixed-delay retry for transient provider failures
 * - Order-preserving tabular output, one row per paragraph, with failure
 *   markers instead of dropped cells
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Paragraph extraction from document files
 * - `pipeline`: The check orchestration core:
 *   - `pipeline::prompts`: Prompt construction
 *   - `pipeline::session`: Session lifecycle and refresh accounting
 *   - `pipeline::retry`: Bounded retry around provider calls
 *   - `pipeline::orchestrator`: Sequential per-paragraph driver
 *   - `pipeline::aggregator`: Row accumulation and ordered emission
 * - `providers`: Client implementations for the LLM providers:
 *   - `providers::openai`: OpenAI chat-completions client
 *   - `providers::gemini`: Gemini generateContent client
 *   - `providers::mock`: Scripted provider for tests
 * - `report`: CSV report writing
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod pipeline;
pub mod providers;
pub mod report;

// Re-export main types for easier usage
pub use app_config::{CheckProvider, Config, Language};
pub use app_controller::Controller;
pub use document::Paragraph;
pub use errors::{AppError, CheckError, ProviderError};
pub use pipeline::{
    CancellationToken, CheckOrchestrator, CheckSpec, PipelineConfig, ProgressEvent,
    ProgressReporter, ResultRow, RunReport, RunStatus,
};
