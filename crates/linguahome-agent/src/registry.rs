// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-keyed pipeline registry.
//!
//! Each session gets its own [`AgentPipeline`], created on first use. The
//! registry is unbounded unless `max_sessions` is set, in which case the
//! least recently used session is evicted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use linguahome_core::{AgentResponse, LinguaError, SessionId};
use tracing::{debug, info};

use crate::pipeline::{AgentComponents, AgentPipeline};

/// Builds a pipeline for a newly seen session.
pub type PipelineFactory =
    Box<dyn Fn(&SessionId) -> Result<AgentPipeline, LinguaError> + Send + Sync>;

/// Shared handle to one session's pipeline.
pub type SessionHandle = Arc<tokio::sync::Mutex<AgentPipeline>>;

#[derive(Default)]
struct Sessions {
    pipelines: HashMap<SessionId, SessionHandle>,
    /// Front is least recently used.
    order: VecDeque<SessionId>,
}

impl Sessions {
    fn touch(&mut self, id: &SessionId) {
        if let Some(pos) = self.order.iter().position(|s| s == id) {
            self.order.remove(pos);
        }
        self.order.push_back(id.clone());
    }
}

pub struct SessionRegistry {
    factory: PipelineFactory,
    max_sessions: Option<usize>,
    sessions: Mutex<Sessions>,
}

impl SessionRegistry {
    pub fn new(factory: PipelineFactory, max_sessions: Option<usize>) -> Self {
        Self {
            factory,
            max_sessions,
            sessions: Mutex::new(Sessions::default()),
        }
    }

    /// Registry whose pipelines are built from shared components.
    pub fn from_components(components: AgentComponents, max_sessions: Option<usize>) -> Self {
        let factory: PipelineFactory =
            Box::new(move |id: &SessionId| Ok(components.pipeline(id.clone())));
        Self::new(factory, max_sessions)
    }

    /// Returns the pipeline for `id`, creating it if needed.
    pub fn session(&self, id: &SessionId) -> Result<SessionHandle, LinguaError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = sessions.pipelines.get(id).cloned() {
            sessions.touch(id);
            return Ok(handle);
        }

        let handle = Arc::new(tokio::sync::Mutex::new((self.factory)(id)?));
        sessions.pipelines.insert(id.clone(), handle.clone());
        sessions.touch(id);
        debug!(session_id = %id, active = sessions.pipelines.len(), "session created");

        if let Some(max) = self.max_sessions {
            while sessions.pipelines.len() > max {
                let Some(oldest) = sessions.order.pop_front() else {
                    break;
                };
                sessions.pipelines.remove(&oldest);
                info!(session_id = %oldest, max_sessions = max, "session evicted");
            }
        }

        Ok(handle)
    }

    /// Processes `text` for `id` with a blocking model call.
    ///
    /// Returns [`LinguaError::Internal`] when called from inside a Tokio
    /// runtime; use [`process_async`](Self::process_async) there.
    pub fn process(&self, id: &SessionId, text: &str) -> Result<AgentResponse, LinguaError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(LinguaError::Internal(
                "blocking process called inside an async runtime; use process_async".into(),
            ));
        }
        let handle = self.session(id)?;
        let mut pipeline = handle.blocking_lock();
        pipeline.process(text)
    }

    /// Processes `text` for `id`. Other sessions proceed while this one waits.
    pub async fn process_async(
        &self,
        id: &SessionId,
        text: &str,
    ) -> Result<AgentResponse, LinguaError> {
        let handle = self.session(id)?;
        let mut pipeline = handle.lock().await;
        pipeline.process_async(text).await
    }

    /// Clears the in-memory history for `id`. Returns false for unknown sessions.
    pub async fn reset(&self, id: &SessionId) -> bool {
        let handle = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pipelines
            .get(id)
            .cloned();
        match handle {
            Some(handle) => {
                handle.lock().await.reset();
                true
            }
            None => false,
        }
    }

    /// Drops the session entirely. Returns false for unknown sessions.
    pub fn remove(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.order.retain(|s| s != id);
        sessions.pipelines.remove(id).is_some()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pipelines
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pipelines
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("max_sessions", &self.max_sessions)
            .field("active", &self.len())
            .finish()
    }
}
