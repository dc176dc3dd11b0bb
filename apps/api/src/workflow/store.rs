use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::locale::Language;
use crate::workflow::Session;

struct Entry {
    session: Arc<Mutex<Session>>,
    last_touched: Instant,
}

impl Entry {
    fn new(session: Arc<Mutex<Session>>) -> Self {
        Self {
            session,
            last_touched: Instant::now(),
        }
    }
}

/// In-memory session registry. Nothing survives a restart.
///
/// The outer lock only guards the map; each session has its own mutex so a
/// long generation call on one session never blocks the others.
///
/// Sessions untouched for longer than `idle_ttl` are dropped by
/// [`SessionStore::evict_idle`], which the sweeper task runs periodically.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub async fn create(&self, language: Language) -> Arc<Mutex<Session>> {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(id, language)));
        self.sessions
            .write()
            .await
            .insert(id, Entry::new(session.clone()));
        info!("Session {id} created ({language})");
        session
    }

    /// Looks the session up and marks it as used.
    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        entry.last_touched = Instant::now();
        Ok(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Session {id} removed"))
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for longer than the TTL. A session whose
    /// mutex is held by a request in flight is kept. Returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let idle = now.duration_since(entry.last_touched) > self.idle_ttl;
            let busy = entry.session.try_lock().is_err();
            if idle && !busy {
                debug!("Session {id} evicted after idling");
                false
            } else {
                true
            }
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions ({} remain)", sessions.len());
        }
        evicted
    }

    /// Runs [`SessionStore::evict_idle`] every `every` until the runtime stops.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.evict_idle().await;
            }
        })
    }
}
