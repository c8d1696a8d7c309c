//! In-process store: one document shared by every controller in the process.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::debug;

use super::{GameStore, Snapshot, StoreKind, Subscription};
use crate::domain::state::{Field, GameDocument};
use crate::errors::domain::DomainError;

#[derive(Default)]
struct Inner {
    fields: Map<String, Value>,
    revision: u64,
    subscribers: Vec<mpsc::UnboundedSender<Snapshot>>,
}

impl Inner {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            document: GameDocument::from_json_map(&self.fields),
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backing connection going down or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::store_unavailable("memory store is offline"))
        }
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn write_field(&self, field: Field, value: Value) -> Result<u64, DomainError> {
        self.ensure_available()?;
        let mut inner = self.inner.lock();
        if value.is_null() {
            inner.fields.remove(field.as_str());
        } else {
            inner.fields.insert(field.as_str().to_string(), value);
        }
        inner.revision += 1;
        debug!(
            field = %field,
            revision = inner.revision,
            subscribers = inner.subscribers.len(),
            "Memory store write"
        );
        inner.notify();
        Ok(inner.revision)
    }

    async fn read_field(&self, field: Field) -> Result<Option<Value>, DomainError> {
        self.ensure_available()?;
        Ok(self.inner.lock().fields.get(field.as_str()).cloned())
    }

    async fn read_all(&self) -> Result<Map<String, Value>, DomainError> {
        self.ensure_available()?;
        Ok(self.inner.lock().fields.clone())
    }

    async fn subscribe(&self) -> Result<Subscription, DomainError> {
        self.ensure_available()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        // Cannot fail: rx is still alive.
        let _ = tx.send(inner.snapshot());
        inner.subscribers.push(tx);
        Ok(Subscription::new(rx))
    }
}
