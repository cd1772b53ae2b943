use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database as MongoDatabase};

use game_interface::errors::{AppError, Result};

use crate::settings::Database;

const APP_NAME: &str = "game-registry";
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

fn mongo_error(e: mongodb::error::Error) -> AppError {
    AppError::MongoError { msg: e.to_string() }
}

/// Opens the configured MongoDB database and checks that a server answers before
/// any player is served from it. An unreachable server fails the startup after
/// the selection timeout instead of on the first request.
pub async fn connect(database: &Database) -> Result<MongoDatabase> {
    let mut options = ClientOptions::parse(&database.uri).await.map_err(mongo_error)?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    let db = Client::with_options(options)
        .map_err(mongo_error)?
        .database(&database.name);

    db.run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(mongo_error)?;

    tracing::info!(database = %database.name, "player store reachable");

    Ok(db)
}
