use async_trait::async_trait;

use game_interface::errors::{AppError, Result};
use game_interface::players::criteria::{PlayerPage, PlayerSearchCriteria};
use game_interface::players::model::{Player, PlayerRequest};
use game_interface::players::query::PlayerQuery;
use game_interface::players::service::PlayersService;
use game_interface::players::store::PlayerStoreHandle;
use game_interface::players::validation::validate_id;

#[derive(Clone)]
pub struct PlayersServiceImpl {
    store: PlayerStoreHandle,
}

impl PlayersServiceImpl {
    pub fn new(store: PlayerStoreHandle) -> Self {
        Self { store }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        msg: format!("no player found with id '{}'", id),
    }
}

// Apply the members present in the request that differ from the stored values.
// Returns whether anything changed.
fn apply_changes(player: &mut Player, req: PlayerRequest) -> bool {
    let mut changed = false;

    if let Some(name) = req.name.filter(|name| *name != player.name) {
        player.name = name;
        changed = true;
    }
    if let Some(title) = req.title.filter(|title| *title != player.title) {
        player.title = title;
        changed = true;
    }
    if let Some(race) = req.race.filter(|race| *race != player.race) {
        player.race = race;
        changed = true;
    }
    if let Some(profession) = req.profession.filter(|p| *p != player.profession) {
        player.profession = profession;
        changed = true;
    }
    if let Some(birthday) = req.birthday.filter(|b| *b != player.birthday) {
        player.birthday = birthday;
        changed = true;
    }
    if let Some(banned) = req.banned.filter(|b| Some(*b) != player.banned) {
        player.banned = Some(banned);
        changed = true;
    }
    if let Some(experience) = req.experience.filter(|e| *e != player.experience) {
        player.set_experience(experience);
        changed = true;
    }

    changed
}

#[async_trait]
impl PlayersService for PlayersServiceImpl {
    async fn get_players(
        &self,
        criteria: PlayerSearchCriteria,
        page: PlayerPage,
    ) -> Result<Vec<Player>> {
        let query = PlayerQuery::new(&criteria, &page);
        tracing::debug!(?query, "listing players");

        self.store.find(&query).await
    }

    async fn count_players(&self, criteria: PlayerSearchCriteria) -> Result<u64> {
        self.store.count(&criteria.filters()).await
    }

    async fn get_player(&self, id: i64) -> Result<Player> {
        let id = validate_id(id)?;

        self.store.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn create_player(&self, req: PlayerRequest) -> Result<Player> {
        let new_player = req.validate_for_create()?;
        let player = self.store.insert(new_player).await?;

        tracing::info!("created player '{}' with id {}", player.name, player.id);
        Ok(player)
    }

    async fn update_player(&self, id: i64, req: PlayerRequest) -> Result<Player> {
        // Malformed input is rejected before looking the player up.
        let id = validate_id(id)?;
        req.validate_for_update()?;

        let mut player = self.store.get(id).await?.ok_or_else(|| not_found(id))?;

        if apply_changes(&mut player, req) {
            self.store.save(&player).await?;
            tracing::info!("updated player {}", id);
        }

        Ok(player)
    }

    async fn delete_player(&self, id: i64) -> Result<bool> {
        let id = validate_id(id)?;

        if !self.store.exists(id).await? {
            return Ok(false);
        }

        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!("deleted player {}", id);
        }
        Ok(deleted)
    }
}
