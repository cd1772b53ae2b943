use game_infrastructure::{services::ServiceRegistry, settings::Settings, stores};

use game_routing::{logger, router::ApplicationController};

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Could not parse settings");

    logger::setup(&settings.logger.level);
    tracing::info!("starting in the '{}' environment", settings.environment);

    let player_store = stores::connect_player_store(&settings.database)
        .await
        .expect("Could not initialize the database");

    let services = ServiceRegistry::new(player_store);

    ApplicationController::run(&settings, services)
        .await
        .expect("Failed to start the server");
}
