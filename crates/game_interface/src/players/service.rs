use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::players::criteria::{PlayerPage, PlayerSearchCriteria};
use crate::players::model::{Player, PlayerRequest};

#[async_trait]
pub trait PlayersService {
    // Search calls
    async fn get_players(
        &self,
        criteria: PlayerSearchCriteria,
        page: PlayerPage,
    ) -> Result<Vec<Player>>;
    async fn count_players(&self, criteria: PlayerSearchCriteria) -> Result<u64>;
    // Single player calls
    async fn get_player(&self, id: i64) -> Result<Player>;
    async fn create_player(&self, req: PlayerRequest) -> Result<Player>;
    async fn update_player(&self, id: i64, req: PlayerRequest) -> Result<Player>;
    async fn delete_player(&self, id: i64) -> Result<bool>;
}

pub type PlayersServiceHandle = Arc<dyn PlayersService + Send + Sync>;
