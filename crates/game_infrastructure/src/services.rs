use std::sync::Arc;

use axum::extract::FromRef;

use game_interface::players::service::PlayersServiceHandle;
use game_interface::players::store::PlayerStoreHandle;

pub mod players_service;

use players_service::PlayersServiceImpl;

#[derive(FromRef, Clone)]
pub struct ServiceRegistry {
    pub players_service: PlayersServiceHandle,
}

impl ServiceRegistry {
    pub fn new(player_store: PlayerStoreHandle) -> Self {
        let players_service = Arc::new(PlayersServiceImpl::new(player_store));

        Self { players_service }
    }
}
