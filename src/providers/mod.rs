/*!
 * Provider implementations for the AI check services.
 *
 * This module contains client implementations for the supported LLM providers:
 * - OpenAI: chat-completions API integration
 * - Gemini: generateContent API integration
 *
 * Each client holds the conversational history for the current session
 * in-process, so resetting a session is a purely local operation.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common capability set for all LLM providers.
///
/// The orchestration core talks to providers exclusively through this trait:
/// it can send one message within the current conversational session, discard
/// that session, and probe the provider once at startup. Concrete wire formats
/// never leak past this boundary.
#[async_trait]
pub trait ProviderClient: Send + Debug {
    /// Send one prompt within the current session and return the model's reply.
    ///
    /// The exchange is appended to the client-held conversation history, so
    /// later calls in the same session carry the full context.
    async fn send_message(&mut self, prompt: &str) -> Result<String, ProviderError>;

    /// Discard the current conversational session.
    ///
    /// The next `send_message` call starts with an empty history.
    fn reset_session(&mut self);

    /// Probe connectivity and credentials with a minimal request.
    ///
    /// Called once before any paragraph is processed; a failure here is fatal
    /// for the run.
    async fn verify(&self) -> Result<(), ProviderError>;

    /// Lowercase provider identifier for logging and summaries
    fn name(&self) -> &'static str;
}

pub mod gemini;
pub mod mock;
pub mod openai;
