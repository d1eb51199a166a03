//! Many independent sessions behind one handle.
//!
//! The registry map is only locked long enough to find a session; each session
//! then has its own lock, so users never wait on each other's experiments.

use crate::config::LabConfig;
use crate::electrochem::{RandomSample, SampleSource};
use crate::error::{LabError, Result};
use crate::session::LabSession;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

pub type SessionId = u64;

type SharedSession = Arc<Mutex<LabSession>>;

/// Opens, looks up and closes `LabSession`s. `Send + Sync`, so it can be shared
/// across threads behind an `Arc`.
#[derive(Debug)]
pub struct SessionRegistry {
    config: LabConfig,
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    /// Every session opened here starts from `config`.
    pub fn new(config: LabConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Open a session whose hidden sample is drawn from OS entropy.
    pub fn open(&self) -> Result<SessionId> {
        self.open_with_source(Box::new(RandomSample::from_os_rng()))
    }

    pub fn open_with_source(&self, source: Box<dyn SampleSource>) -> Result<SessionId> {
        let session = LabSession::with_sample_source(self.config.clone(), source)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.map().insert(id, Arc::new(Mutex::new(session)));
        info!(session = id, "session opened");
        Ok(id)
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<T>(&self, id: SessionId, f: impl FnOnce(&mut LabSession) -> T) -> Result<T> {
        let session = self.map().get(&id).cloned().ok_or(LabError::UnknownSession(id))?;
        // A panic inside another caller's closure leaves the session data intact.
        let mut guard = session.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(f(&mut guard))
    }

    pub fn close(&self, id: SessionId) -> Result<()> {
        self.map().remove(&id).ok_or(LabError::UnknownSession(id))?;
        info!(session = id, "session closed");
        Ok(())
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.map().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<SessionId, SharedSession>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            config: LabConfig::default(),
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}
