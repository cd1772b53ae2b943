use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use game_interface::errors::Result;
use game_interface::players::model::{NewPlayer, Player};
use game_interface::players::query::{matches_all, PlayerFilter, PlayerQuery};
use game_interface::players::store::PlayerStore;

/// Player records kept in process memory, lost on restart.
#[derive(Default)]
pub struct MemoryPlayerStore {
    players: RwLock<BTreeMap<i64, Player>>,
    last_id: AtomicI64,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn find(&self, query: &PlayerQuery) -> Result<Vec<Player>> {
        let players = self.players.read().await;

        let mut found: Vec<&Player> = players
            .values()
            .filter(|player| matches_all(&query.filters, player))
            .collect();
        found.sort_by(|a, b| query.order.compare(query.direction, a, b));

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(found
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filters: &[PlayerFilter]) -> Result<u64> {
        let players = self.players.read().await;
        let count = players
            .values()
            .filter(|player| matches_all(filters, player))
            .count();

        Ok(count as u64)
    }

    async fn get(&self, id: i64) -> Result<Option<Player>> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.players.read().await.contains_key(&id))
    }

    async fn insert(&self, player: NewPlayer) -> Result<Player> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let player = player.into_player(id);

        self.players.write().await.insert(id, player.clone());
        Ok(player)
    }

    async fn save(&self, player: &Player) -> Result<()> {
        self.players.write().await.insert(player.id, player.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.players.write().await.remove(&id).is_some())
    }
}
