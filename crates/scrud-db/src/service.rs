//! Service layer: the store handle plus the change feed that drives live
//! queries.
//!
//! All repo methods are implemented as `impl ScrudService` blocks. A write
//! announces every entity type it touched, cascades included, after it
//! commits.

use std::time::Duration;

use scrud_config::ScrudConfig;
use scrud_core::enums::EntityType;
use tokio::sync::broadcast;

use crate::ScrudDb;
use crate::error::StoreError;

/// Feed buffer used when no configuration is supplied.
pub const DEFAULT_CHANGE_FEED_CAPACITY: usize = 64;

/// External-commit poll period used when no configuration is supplied.
pub const DEFAULT_EXTERNAL_POLL: Duration = Duration::from_millis(500);

/// Broadcast of entity types whose tables changed.
///
/// Notifications carry no row data. Subscribers re-read what they need.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<EntityType>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Announce changes. Having no subscribers is not an error.
    pub fn publish(&self, types: &[EntityType]) {
        for entity in types {
            let _ = self.tx.send(*entity);
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntityType> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions currently attached.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Store handle shared by the CLI, repos, and live producers.
#[derive(Clone)]
pub struct ScrudService {
    db: ScrudDb,
    feed: ChangeFeed,
    external_poll: Option<Duration>,
}

impl ScrudService {
    /// Open a local store at `db_path` (`":memory:"` for tests).
    ///
    /// File-backed stores poll for other connections' commits every
    /// [`DEFAULT_EXTERNAL_POLL`]. In-memory stores do not poll.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, feed_capacity: usize) -> Result<Self, StoreError> {
        let db = ScrudDb::open_local(db_path).await?;
        let poll = (db_path != ":memory:").then_some(DEFAULT_EXTERNAL_POLL);
        Ok(Self::from_db(db, feed_capacity).with_external_poll(poll))
    }

    /// Open the store described by the `[database]` config section.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn from_config(config: &ScrudConfig) -> Result<Self, StoreError> {
        let svc = Self::new_local(
            &config.database.path,
            config.database.change_feed_capacity,
        )
        .await?;
        Ok(svc.with_external_poll(config.database.external_poll()))
    }

    #[must_use]
    pub fn from_db(db: ScrudDb, feed_capacity: usize) -> Self {
        Self {
            db,
            feed: ChangeFeed::new(feed_capacity),
            external_poll: None,
        }
    }

    /// Set how often live queries check for commits from other connections.
    /// `None` limits them to this service's own change feed.
    #[must_use]
    pub const fn with_external_poll(mut self, poll: Option<Duration>) -> Self {
        self.external_poll = poll;
        self
    }

    #[must_use]
    pub const fn external_poll(&self) -> Option<Duration> {
        self.external_poll
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ScrudDb {
        &self.db
    }

    #[must_use]
    pub const fn change_feed(&self) -> &ChangeFeed {
        &self.feed
    }

    pub(crate) fn notify(&self, types: &[EntityType]) {
        tracing::debug!(?types, "publishing change");
        self.feed.publish(types);
    }
}
