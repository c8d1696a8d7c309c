//! The replicated game document.
//!
//! A store exposes field-level writes and point reads over the six top-level
//! document fields, plus a whole-document change subscription. Every write
//! bumps a document revision and every snapshot carries the revision it was
//! read at. There is no compare-and-swap: concurrent writers race and the
//! last write wins. Controllers only ever talk to `dyn GameStore`, so a
//! stricter scheme can replace the backends without touching them.

pub mod memory;
pub mod redis;

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::domain::state::{Field, GameDocument};
use crate::errors::domain::DomainError;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Redis,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Redis => "redis",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait GameStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    /// Replace one field. Writing JSON `null` deletes it. Returns the
    /// document revision the write produced.
    ///
    /// Every subscriber, including the writer's own, eventually receives a
    /// snapshot at that revision or later.
    async fn write_field(&self, field: Field, value: Value) -> Result<u64, DomainError>;

    /// Point read; `None` when the field is absent.
    async fn read_field(&self, field: Field) -> Result<Option<Value>, DomainError>;

    /// Raw snapshot of every present field, keyed by wire name.
    async fn read_all(&self) -> Result<Map<String, Value>, DomainError>;

    /// Register a listener. The current snapshot is delivered first, then one
    /// snapshot per observed change for as long as the store lives.
    async fn subscribe(&self) -> Result<Subscription, DomainError>;
}

/// The whole document as of one revision. Absent fields are absent in the
/// store, not merely unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub revision: u64,
    pub document: GameDocument,
}

/// Stream of whole-document snapshots, in non-decreasing revision order.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Snapshot>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Next snapshot, or `None` once the backing feed is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}

/// Decode the full document.
pub async fn read_document(store: &dyn GameStore) -> Result<GameDocument, DomainError> {
    let raw = store.read_all().await?;
    Ok(GameDocument::from_json_map(&raw))
}
