use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{CountOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use game_interface::errors::{AppError, Result};
use game_interface::players::criteria::{PlayerOrder, SortDirection};
use game_interface::players::model::{NewPlayer, Player, Profession, Race};
use game_interface::players::query::{PlayerFilter, PlayerQuery};
use game_interface::players::store::PlayerStore;

const PLAYERS_COLLECTION: &str = "players";
const COUNTERS_COLLECTION: &str = "counters";

// The birthday is kept as epoch milliseconds so the range filters compare plain integers.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerDocument {
    #[serde(rename = "_id")]
    id: i64,
    name: String,
    title: String,
    race: Race,
    profession: Profession,
    birthday: i64,
    banned: Option<bool>,
    experience: i32,
    level: i32,
    until_next_level: i32,
}

impl From<&Player> for PlayerDocument {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            title: player.title.clone(),
            race: player.race,
            profession: player.profession,
            birthday: player.birthday.timestamp_millis(),
            banned: player.banned,
            experience: player.experience,
            level: player.level,
            until_next_level: player.until_next_level,
        }
    }
}

impl TryFrom<PlayerDocument> for Player {
    type Error = AppError;

    fn try_from(document: PlayerDocument) -> Result<Self> {
        let birthday =
            DateTime::<Utc>::from_timestamp_millis(document.birthday).ok_or(AppError::BsonError {
                msg: format!("player '{}' has an invalid birthday", document.id),
            })?;

        Ok(Player {
            id: document.id,
            name: document.name,
            title: document.title,
            race: document.race,
            profession: document.profession,
            birthday,
            banned: document.banned,
            experience: document.experience,
            level: document.level,
            until_next_level: document.until_next_level,
        })
    }
}

/// Escape the regex metacharacters so a substring is matched literally.
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn filter_document(filters: &[PlayerFilter]) -> Document {
    if filters.is_empty() {
        return doc! {};
    }

    let clauses: Vec<Bson> = filters
        .iter()
        .map(|filter| {
            let clause = match filter {
                PlayerFilter::NameContains(name) => {
                    doc! { "name": { "$regex": escape_regex(name) } }
                }
                PlayerFilter::TitleContains(title) => {
                    doc! { "title": { "$regex": escape_regex(title) } }
                }
                PlayerFilter::Race(race) => doc! { "race": race.as_str() },
                PlayerFilter::Profession(profession) => {
                    doc! { "profession": profession.as_str() }
                }
                PlayerFilter::BirthdayBetween { after, before } => doc! {
                    "birthday": {
                        "$gte": after.timestamp_millis(),
                        "$lte": before.timestamp_millis(),
                    }
                },
                PlayerFilter::Banned(banned) => doc! { "banned": *banned },
                PlayerFilter::ExperienceBetween { min, max } => {
                    doc! { "experience": { "$gte": *min, "$lte": *max } }
                }
                PlayerFilter::LevelBetween { min, max } => {
                    doc! { "level": { "$gte": *min, "$lte": *max } }
                }
            };
            Bson::Document(clause)
        })
        .collect();

    doc! { "$and": clauses }
}

pub fn sort_document(order: PlayerOrder, direction: SortDirection) -> Document {
    let sort_value = match direction {
        SortDirection::Asc => 1,
        SortDirection::Desc => -1,
    };

    match order {
        PlayerOrder::Id => doc! { "_id": sort_value },
        // Ties are broken by the id so paging is stable.
        _ => {
            let sort_field = order.field_name();
            doc! { sort_field: sort_value, "_id": 1 }
        }
    }
}

#[derive(Clone)]
pub struct MongoPlayerStore {
    db: Database,
}

impl MongoPlayerStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<PlayerDocument> {
        self.db.collection::<PlayerDocument>(PLAYERS_COLLECTION)
    }

    // Ids come from a counter document incremented atomically on every insert.
    async fn next_id(&self) -> Result<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .db
            .collection::<Document>(COUNTERS_COLLECTION)
            .find_one_and_update(
                doc! {"_id": PLAYERS_COLLECTION},
                doc! {"$inc": {"seq": 1_i64}},
                options,
            )
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?
            .ok_or(AppError::MongoError {
                msg: "the players counter could not be incremented".to_string(),
            })?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::BsonError { msg: e.to_string() })
    }
}

#[async_trait]
impl PlayerStore for MongoPlayerStore {
    async fn find(&self, query: &PlayerQuery) -> Result<Vec<Player>> {
        let find_options = FindOptions::builder()
            .sort(sort_document(query.order, query.direction))
            .skip(Some(query.offset))
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .build();

        let documents: Vec<PlayerDocument> = self
            .collection()
            .find(filter_document(&query.filters), find_options)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?
            .try_collect()
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        documents.into_iter().map(Player::try_from).collect()
    }

    async fn count(&self, filters: &[PlayerFilter]) -> Result<u64> {
        self.collection()
            .count_documents(filter_document(filters), None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })
    }

    async fn get(&self, id: i64) -> Result<Option<Player>> {
        let document = self
            .collection()
            .find_one(doc! {"_id": id}, None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        document.map(Player::try_from).transpose()
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let count_options = CountOptions::builder().limit(1).build();

        let count = self
            .collection()
            .count_documents(doc! {"_id": id}, count_options)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        Ok(count > 0)
    }

    async fn insert(&self, player: NewPlayer) -> Result<Player> {
        let player = player.into_player(self.next_id().await?);

        self.collection()
            .insert_one(PlayerDocument::from(&player), None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        Ok(player)
    }

    async fn save(&self, player: &Player) -> Result<()> {
        self.collection()
            .replace_one(doc! {"_id": player.id}, PlayerDocument::from(player), None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let delete_result = self
            .collection()
            .delete_one(doc! {"_id": id}, None)
            .await
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        Ok(delete_result.deleted_count > 0)
    }
}
