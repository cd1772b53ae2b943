use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use game_infrastructure::services::ServiceRegistry;

use game_interface::errors::{AppError, Result};
use game_interface::players::criteria::GetPlayersQuery;
use game_interface::players::model::{Player, PlayerRequest};
use game_interface::players::service::PlayersServiceHandle;

pub struct PlayersRouter;

impl PlayersRouter {
    pub fn new(service_registry: ServiceRegistry) -> Router {
        Router::new()
            .route(
                "/players",
                get(Self::get_players).post(Self::create_player),
            )
            .route("/players/count", get(Self::count_players))
            .route(
                "/players/:id",
                get(Self::get_player)
                    .post(Self::update_player)
                    .delete(Self::delete_player),
            )
            .with_state(service_registry)
    }

    /// Filtered page of players, only the page content is returned.
    async fn get_players(
        State(players_service): State<PlayersServiceHandle>,
        Query(params): Query<GetPlayersQuery>,
    ) -> Result<Json<Vec<Player>>> {
        let criteria = params.criteria()?;
        let page = params.page()?;

        players_service.get_players(criteria, page).await.map(Json)
    }

    /// Number of players matching the filters, the paging members are ignored.
    async fn count_players(
        State(players_service): State<PlayersServiceHandle>,
        Query(params): Query<GetPlayersQuery>,
    ) -> Result<Json<u64>> {
        let criteria = params.criteria()?;

        players_service.count_players(criteria).await.map(Json)
    }

    async fn get_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<i64>,
    ) -> Result<Json<Player>> {
        players_service.get_player(id).await.map(Json)
    }

    async fn create_player(
        State(players_service): State<PlayersServiceHandle>,
        body: std::result::Result<Json<PlayerRequest>, JsonRejection>,
    ) -> Result<Json<Player>> {
        let Json(body) = body?;

        players_service.create_player(body).await.map(Json)
    }

    async fn update_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<i64>,
        body: std::result::Result<Json<PlayerRequest>, JsonRejection>,
    ) -> Result<Json<Player>> {
        let Json(body) = body?;

        players_service.update_player(id, body).await.map(Json)
    }

    async fn delete_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<i64>,
    ) -> Result<StatusCode> {
        if players_service.delete_player(id).await? {
            Ok(StatusCode::OK)
        } else {
            Err(AppError::NotFound {
                msg: format!("no player found with id '{}'", id),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::{TimeZone, Utc};
    use game_infrastructure::stores::memory_player_store::MemoryPlayerStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::router::ApplicationController;

    use super::*;

    fn app() -> Router {
        ApplicationController::router(ServiceRegistry::new(Arc::new(MemoryPlayerStore::new())))
    }

    fn millis(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn aerith() -> Value {
        json!({
            "name": "Aerith",
            "title": "Healer",
            "race": "HUMAN",
            "profession": "CLERIC",
            "birthday": millis(2010, 1, 1),
            "experience": 500
        })
    }

    async fn seed(app: &Router) {
        let roster = [
            ("Aerith", "HUMAN", "CLERIC", 500, false),
            ("Boromir", "HUMAN", "WARRIOR", 3000, true),
            ("Celeborn", "ELF", "DRUID", 7000, false),
            ("Durin", "DWARF", "PALADIN", 1200, false),
            ("Eomer", "HUMAN", "PALADIN", 4000, false),
        ];
        for (name, race, profession, experience, banned) in roster {
            let body = json!({
                "name": name,
                "title": "Hero",
                "race": race,
                "profession": profession,
                "birthday": millis(2004, 4, 4),
                "experience": experience,
                "banned": banned
            });
            let (status, _) = send(app, Method::POST, "/rest/players", Some(body)).await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn create_returns_the_stored_player() {
        let app = app();

        let (status, player) = send(&app, Method::POST, "/rest/players", Some(aerith())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(player["id"], 1);
        assert_eq!(player["name"], "Aerith");
        assert_eq!(player["birthday"], millis(2010, 1, 1));
        assert!(player["level"].as_i64().unwrap() > 0);
        assert!(player["untilNextLevel"].is_i64());
    }

    #[tokio::test]
    async fn create_without_profession_is_a_bad_request() {
        let app = app();
        let mut body = aerith();
        body.as_object_mut().unwrap().remove("profession");

        let (status, _) = send(&app, Method::POST, "/rest/players", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_a_long_name_is_a_bad_request() {
        let app = app();
        let mut body = aerith();
        body["name"] = json!("Abcdefghijklm");

        let (status, _) = send(&app, Method::POST, "/rest/players", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_undecodable_members_is_a_bad_request() {
        let app = app();

        for (member, value) in [
            ("race", json!("GOBLIN")),
            ("profession", json!(42)),
            ("experience", json!(3_000_000_000_i64)),
            ("experience", json!("lots")),
        ] {
            let mut body = aerith();
            body[member] = value;

            let (status, _) = send(&app, Method::POST, "/rest/players", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{member}");
        }

        let (_, count) = send(&app, Method::GET, "/rest/players/count", None).await;
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn update_with_undecodable_members_is_a_bad_request() {
        let app = app();
        seed(&app).await;

        for body in [
            json!({ "experience": 20_000_000_000_i64 }),
            json!({ "race": "GOBLIN" }),
            json!({ "banned": "yes" }),
        ] {
            let (status, _) = send(&app, Method::POST, "/rest/players/1", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }

        let (_, player) = send(&app, Method::GET, "/rest/players/1", None).await;
        assert_eq!(player["experience"], 500);
        assert_eq!(player["race"], "HUMAN");
    }

    #[tokio::test]
    async fn get_maps_invalid_and_unknown_ids() {
        let app = app();
        seed(&app).await;

        let (status, player) = send(&app, Method::GET, "/rest/players/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(player["name"], "Boromir");

        let (status, _) = send(&app, Method::GET, "/rest/players/999999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        for uri in ["/rest/players/0", "/rest/players/-1"] {
            let (status, _) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn update_recomputes_the_level() {
        let app = app();
        let (_, created) = send(&app, Method::POST, "/rest/players", Some(aerith())).await;

        let (status, updated) = send(
            &app,
            Method::POST,
            "/rest/players/1",
            Some(json!({ "experience": 1000 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["experience"], 1000);
        assert_eq!(updated["name"], created["name"]);
        assert_ne!(updated["level"], created["level"]);
        assert_ne!(updated["untilNextLevel"], created["untilNextLevel"]);
    }

    #[tokio::test]
    async fn update_status_codes() {
        let app = app();
        seed(&app).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/rest/players/0",
            Some(json!({ "name": "Valid" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/rest/players/1",
            Some(json!({ "experience": -5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/rest/players/999999",
            Some(json!({ "name": "Valid" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let app = app();
        seed(&app).await;

        let (status, _) = send(&app, Method::DELETE, "/rest/players/3", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/rest/players/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/rest/players/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/rest/players/0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_defaults_to_three_players_by_id() {
        let app = app();
        seed(&app).await;

        let (status, players) = send(&app, Method::GET, "/rest/players", None).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = players
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn list_applies_filters_order_and_paging() {
        let app = app();
        seed(&app).await;

        let (status, players) = send(
            &app,
            Method::GET,
            "/rest/players?race=HUMAN&banned=false&order=EXPERIENCE&direction=DESC&pageSize=1&pageNumber=0",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(players.as_array().unwrap().len(), 1);
        assert_eq!(players[0]["name"], "Eomer");

        let (_, players) = send(
            &app,
            Method::GET,
            "/rest/players?race=HUMAN&banned=false&order=EXPERIENCE&direction=DESC&pageSize=1&pageNumber=1",
            None,
        )
        .await;
        assert_eq!(players[0]["name"], "Aerith");
    }

    #[tokio::test]
    async fn list_rejects_empty_pages() {
        let app = app();

        let (status, _) = send(&app, Method::GET, "/rest/players?pageSize=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/rest/players?pageNumber=-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn count_ignores_paging() {
        let app = app();
        seed(&app).await;

        let (status, count) = send(
            &app,
            Method::GET,
            "/rest/players/count?minExperience=1000&pageSize=1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count, 4);

        let (_, count) = send(&app, Method::GET, "/rest/players/count?name=o", None).await;
        // Boromir, Celeborn and Eomer.
        assert_eq!(count, 3);

        let uri = format!(
            "/rest/players/count?after={}&before={}",
            millis(2004, 1, 1),
            millis(2005, 1, 1)
        );
        let (_, count) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn count_by_profession() {
        let app = app();
        seed(&app).await;

        let (_, count) = send(&app, Method::GET, "/rest/players/count?profession=PALADIN", None).await;
        // Durin and Eomer.
        assert_eq!(count, 2);

        let (_, count) = send(&app, Method::GET, "/rest/players/count?profession=NAZGUL", None).await;
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn birthday_bounds_are_inclusive() {
        let app = app();
        seed(&app).await;
        let birthday = millis(2004, 4, 4);

        for (after, before, expected) in [
            (birthday, birthday, 5),
            (birthday + 1, birthday + 86_400_000, 0),
            (birthday - 86_400_000, birthday - 1, 0),
        ] {
            let uri = format!("/rest/players/count?after={after}&before={before}");
            let (_, count) = send(&app, Method::GET, &uri, None).await;
            assert_eq!(count, expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn list_only_banned_players() {
        let app = app();
        seed(&app).await;

        let (status, players) = send(&app, Method::GET, "/rest/players?banned=true", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(players.as_array().unwrap().len(), 1);
        assert_eq!(players[0]["name"], "Boromir");
        assert_eq!(players[0]["banned"], true);
    }
}
