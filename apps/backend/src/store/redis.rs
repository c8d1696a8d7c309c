//! Redis-backed store.
//!
//! The document is a hash at `{key}`; each field holds its JSON encoding.
//! The revision counter sits at `{key}:revision`. Every write is a MULTI
//! pipeline of `HSET`/`HDEL`, `INCR` of the revision and a `PUBLISH` of the
//! field name on `{key}:changes`. Subscribers hold their own pub/sub
//! connection and re-read hash and revision together on each notification.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use super::{GameStore, Snapshot, StoreKind, Subscription};
use crate::domain::state::{Field, GameDocument};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

impl From<RedisError> for DomainError {
    fn from(err: RedisError) -> Self {
        DomainError::store_unavailable(err.to_string())
    }
}

#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    manager: ConnectionManager,
    key: String,
    revision_key: String,
    channel: String,
}

impl RedisStore {
    pub async fn connect(redis_url: &str, key: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url).map_err(|err| AppError::Config {
            detail: format!("Invalid REDIS_URL: {err}"),
            source: Box::new(err),
        })?;

        let manager = ConnectionManager::new(client.clone())
            .await
            .map_err(|err| AppError::Internal {
                code: ErrorCode::StoreUnavailable,
                detail: "Unable to initialize Redis connection manager".to_string(),
                source: Box::new(err),
            })?;

        info!(key, "Redis game store connected");
        Ok(Self {
            client,
            manager,
            key: key.to_string(),
            revision_key: format!("{key}:revision"),
            channel: format!("{key}:changes"),
        })
    }

    async fn fetch_all(
        manager: &ConnectionManager,
        key: &str,
        revision_key: &str,
    ) -> Result<(u64, Map<String, Value>), DomainError> {
        let mut conn = manager.clone();
        let (raw, revision): (HashMap<String, String>, Option<u64>) = redis::pipe()
            .atomic()
            .cmd("HGETALL")
            .arg(key)
            .cmd("GET")
            .arg(revision_key)
            .query_async(&mut conn)
            .await?;

        let mut fields = Map::new();
        for (name, encoded) in raw {
            match serde_json::from_str::<Value>(&encoded) {
                Ok(value) => {
                    fields.insert(name, value);
                }
                Err(err) => {
                    warn!(field = %name, error = %err, "Skipping non-JSON hash entry");
                }
            }
        }
        Ok((revision.unwrap_or_default(), fields))
    }

    async fn fetch_snapshot(
        manager: &ConnectionManager,
        key: &str,
        revision_key: &str,
    ) -> Result<Snapshot, DomainError> {
        let (revision, fields) = Self::fetch_all(manager, key, revision_key).await?;
        Ok(Snapshot {
            revision,
            document: GameDocument::from_json_map(&fields),
        })
    }
}

#[async_trait]
impl GameStore for RedisStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Redis
    }

    async fn write_field(&self, field: Field, value: Value) -> Result<u64, DomainError> {
        let mut conn = self.manager.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();
        if value.is_null() {
            pipe.cmd("HDEL").arg(&self.key).arg(field.as_str()).ignore();
        } else {
            let encoded = serde_json::to_string(&value)?;
            pipe.cmd("HSET")
                .arg(&self.key)
                .arg(field.as_str())
                .arg(encoded)
                .ignore();
        }
        pipe.cmd("INCR").arg(&self.revision_key);
        pipe.cmd("PUBLISH")
            .arg(&self.channel)
            .arg(field.as_str())
            .ignore();

        let (revision,): (u64,) = pipe.query_async(&mut conn).await?;
        debug!(field = %field, key = %self.key, revision, "Redis store write");
        Ok(revision)
    }

    async fn read_field(&self, field: Field) -> Result<Option<Value>, DomainError> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = redis::cmd("HGET")
            .arg(&self.key)
            .arg(field.as_str())
            .query_async(&mut conn)
            .await?;
        raw.map(|encoded| serde_json::from_str(&encoded).map_err(DomainError::from))
            .transpose()
    }

    async fn read_all(&self) -> Result<Map<String, Value>, DomainError> {
        let (_, fields) = Self::fetch_all(&self.manager, &self.key, &self.revision_key).await?;
        Ok(fields)
    }

    async fn subscribe(&self) -> Result<Subscription, DomainError> {
        // Subscribe before taking the snapshot so no change slips between them.
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(&self.channel).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let snapshot = Self::fetch_snapshot(&self.manager, &self.key, &self.revision_key).await?;
        let _ = tx.send(snapshot);

        let manager = self.manager.clone();
        let key = self.key.clone();
        let revision_key = self.revision_key.clone();
        let channel = self.channel.clone();
        tokio::spawn(async move {
            let mut messages = Box::pin(pubsub.into_on_message());
            while let Some(msg) = messages.next().await {
                let changed = msg.get_payload::<String>().unwrap_or_default();
                match Self::fetch_snapshot(&manager, &key, &revision_key).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            debug!(channel = %channel, "Subscriber gone, closing feed");
                            return;
                        }
                    }
                    Err(err) => {
                        warn!(
                            channel = %channel,
                            field = %changed,
                            error = %err,
                            "Failed to re-read document after change notification"
                        );
                    }
                }
            }
            warn!(channel = %channel, "Redis change feed ended");
        });

        Ok(Subscription::new(rx))
    }
}
