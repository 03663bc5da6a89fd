/*!
 * Session lifecycle management.
 *
 * A session is one continuous conversational context held with the provider,
 * bounded to a configured number of paragraphs. The manager tracks how many
 * paragraphs have completed under the current session and refreshes it at the
 * configured interval, never mid-paragraph.
 */

use log::debug;

use crate::providers::ProviderClient;

/// One conversational session with the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Monotonic identifier, unique within a run
    pub id: u64,
    /// Paragraphs fully processed under this session
    pub paragraphs_since_reset: usize,
}

/// What `ensure_session_for` did to satisfy the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDecision {
    /// The initial session was created
    Created,
    /// The existing session is still within its budget
    Reused,
    /// The old session was discarded and a fresh one created
    Refreshed,
}

/// Owns the session lifecycle for one run
#[derive(Debug)]
pub struct SessionManager {
    refresh_interval: usize,
    session: Option<Session>,
    next_id: u64,
    sessions_created: usize,
}

impl SessionManager {
    /// Create a manager that refreshes after `refresh_interval` paragraphs.
    ///
    /// The interval must be at least 1; config validation enforces this.
    pub fn new(refresh_interval: usize) -> Self {
        Self {
            refresh_interval: refresh_interval.max(1),
            session: None,
            next_id: 0,
            sessions_created: 0,
        }
    }

    /// Make sure a live session exists before paragraph `paragraph_index`.
    ///
    /// Creates the initial session on the first call. On later calls, if the
    /// current session has already served `refresh_interval` paragraphs, the
    /// provider-side session is reset and a fresh one begins. All checks of
    /// one paragraph always run under the same session because this is only
    /// called at paragraph start.
    pub fn ensure_session_for(
        &mut self,
        paragraph_index: usize,
        provider: &mut dyn ProviderClient,
    ) -> SessionDecision {
        let decision = match &self.session {
            None => SessionDecision::Created,
            Some(session) if session.paragraphs_since_reset >= self.refresh_interval => {
                SessionDecision::Refreshed
            }
            Some(_) => SessionDecision::Reused,
        };

        match decision {
            SessionDecision::Created => {
                self.session = Some(self.fresh_session());
                debug!("Created initial session before paragraph {}", paragraph_index);
            }
            SessionDecision::Refreshed => {
                provider.reset_session();
                self.session = Some(self.fresh_session());
                debug!("Refreshed session before paragraph {}", paragraph_index);
            }
            SessionDecision::Reused => {}
        }
        decision
    }

    /// Record that one paragraph fully finished under the current session
    pub fn paragraph_finalized(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.paragraphs_since_reset += 1;
        }
    }

    /// The currently active session, if any
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Total sessions created during the run, for the completion summary
    pub fn sessions_created(&self) -> usize {
        self.sessions_created
    }

    fn fresh_session(&mut self) -> Session {
        let id = self.next_id;
        self.next_id += 1;
        self.sessions_created += 1;
        Session {
            id,
            paragraphs_since_reset: 0,
        }
    }
}
