//! Zenoh publication sink.
//!
//! Telemetry and error messages go out as plain puts. Settings are
//! published through cached advanced publishers so a late-joining
//! subscriber picks up the last settings snapshot immediately instead of
//! waiting up to the slow settings refresh period.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use zenoh::Session;
use zenoh_ext::{AdvancedPublisher, AdvancedPublisherBuilderExt, CacheConfig};

/// Error type for publish operations.
#[derive(Debug, thiserror::Error)]
#[error("publish to '{key}' failed: {message}")]
pub struct SinkError {
    pub key: String,
    pub message: String,
}

/// Abstraction over the publish side, so the scheduler can be exercised
/// against a recording sink in tests.
pub trait RecordSink {
    async fn publish(&self, key: &str, payload: Vec<u8>, retain: bool) -> Result<(), SinkError>;
}

/// Production sink over a Zenoh session.
pub struct ZenohSink {
    session: Arc<Session>,
    /// Cached advanced publishers for retained keys, created lazily.
    retained: RwLock<HashMap<String, AdvancedPublisher<'static>>>,
}

impl ZenohSink {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            retained: RwLock::new(HashMap::new()),
        }
    }

    async fn ensure_retained_publisher(&self, key: &str) -> Result<(), SinkError> {
        {
            let retained = self.retained.read().await;
            if retained.contains_key(key) {
                return Ok(());
            }
        }

        let publisher: AdvancedPublisher<'_> = self
            .session
            .declare_publisher(key.to_string())
            .cache(CacheConfig::default().max_samples(1))
            .publisher_detection()
            .await
            .map_err(|e| SinkError {
                key: key.to_string(),
                message: format!("Failed to create advanced publisher: {}", e),
            })?;

        // Safety: We're using 'static lifetime because the publisher is
        // stored in the sink and the session is kept alive by Arc
        let publisher: AdvancedPublisher<'static> = unsafe { std::mem::transmute(publisher) };

        let mut retained = self.retained.write().await;
        retained.insert(key.to_string(), publisher);

        tracing::debug!(key = %key, "Created cached publisher");

        Ok(())
    }
}

impl RecordSink for ZenohSink {
    async fn publish(&self, key: &str, payload: Vec<u8>, retain: bool) -> Result<(), SinkError> {
        if !retain {
            return self.session.put(key, payload).await.map_err(|e| SinkError {
                key: key.to_string(),
                message: e.to_string(),
            });
        }

        self.ensure_retained_publisher(key).await?;

        let retained = self.retained.read().await;
        if let Some(publisher) = retained.get(key) {
            publisher.put(payload).await.map_err(|e| SinkError {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(())
    }
}
