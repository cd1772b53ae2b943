use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::players::model::{NewPlayer, Player};
use crate::players::query::{PlayerFilter, PlayerQuery};

/// Durable storage of the player records.
///
/// A single `save` or `delete` is expected to be atomic, nothing stronger.
/// Concurrent writes on the same id are resolved as last write wins.
#[async_trait]
pub trait PlayerStore {
    /// Execute a filtered, sorted page fetch.
    async fn find(&self, query: &PlayerQuery) -> Result<Vec<Player>>;
    /// Number of records matching every filter, regardless of any paging.
    async fn count(&self, filters: &[PlayerFilter]) -> Result<u64>;
    async fn get(&self, id: i64) -> Result<Option<Player>>;
    async fn exists(&self, id: i64) -> Result<bool>;
    /// Assign the next id and persist the player.
    async fn insert(&self, player: NewPlayer) -> Result<Player>;
    /// Overwrite the stored record that has the same id.
    async fn save(&self, player: &Player) -> Result<()>;
    /// Returns false when no record had this id.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub type PlayerStoreHandle = Arc<dyn PlayerStore + Send + Sync>;
