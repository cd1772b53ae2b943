use std::sync::Arc;

use game_interface::errors::Result;
use game_interface::players::store::PlayerStoreHandle;

pub mod memory_player_store;
pub mod mongo_player_store;

use memory_player_store::MemoryPlayerStore;
use mongo_player_store::MongoPlayerStore;

use crate::database_connection;
use crate::settings::{Database, StoreKind};

/// Open the record store selected in the settings.
pub async fn connect_player_store(database: &Database) -> Result<PlayerStoreHandle> {
    match database.kind {
        StoreKind::Mongo => {
            let db = database_connection::connect(database).await?;
            Ok(Arc::new(MongoPlayerStore::new(db)))
        }
        StoreKind::Memory => {
            tracing::warn!("players are kept in memory and will be lost on shutdown");
            Ok(Arc::new(MemoryPlayerStore::new()))
        }
    }
}
