mod config;
mod error;
mod handlers;
mod models;
mod services;
mod store;
mod validation;

use config::Config;
use ntex::web;
use ntex_cors::Cors;
use std::sync::Arc;
use store::Store;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Arc::new(Config::from_env());
    let store = Arc::new(
        Store::open(&config.database_path)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
    );

    log::info!(
        "TSP arena server starting on {} (database: {})",
        config.bind_addr(),
        store.path().display()
    );

    let bind_addr = config.bind_addr();
    web::HttpServer::new(move || {
        web::App::new()
            .state(store.clone())
            .state(config.clone())
            .wrap(web::middleware::Logger::default())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            .configure(routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/api/health", web::get().to(health))
        // Games
        .service(
            web::resource("/api/games")
                .route(web::post().to(handlers::games::create_game))
                .route(web::get().to(handlers::games::list_games)),
        )
        .route("/api/games/{game_id}", web::get().to(handlers::games::get_game))
        // Runs
        .service(
            web::resource("/api/runs")
                .route(web::post().to(handlers::runs::submit_run))
                .route(web::get().to(handlers::runs::list_runs)),
        )
        // Leaderboard and export
        .route("/api/highscores", web::get().to(handlers::highscores::get_highscores))
        .route("/api/export/json", web::get().to(handlers::export::export_json))
        // Front-end
        .route("/", web::get().to(handlers::assets::index))
        .route("/{path}*", web::get().to(handlers::assets::static_file));
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::http::StatusCode;
    use ntex::web::test;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct Fixture {
        store: Arc<Store>,
        config: Arc<Config>,
        dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("index.html"), "<!doctype html><title>TSP</title>").unwrap();
        std::fs::write(static_dir.join("app.js"), "console.log('tsp');").unwrap();

        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            database_path: dir.path().join("db.json"),
            static_dir,
        };
        let store = Store::open(&config.database_path).unwrap();
        Fixture {
            store: Arc::new(store),
            config: Arc::new(config),
            dir,
        }
    }

    macro_rules! app {
        ($store:expr, $config:expr) => {
            test::init_service(
                web::App::new()
                    .state($store.clone())
                    .state($config.clone())
                    .configure(routes),
            )
            .await
        };
        ($fx:expr) => {
            app!($fx.store, $fx.config)
        };
    }

    async fn json_body(resp: web::WebResponse) -> Value {
        serde_json::from_slice(&test::read_body(resp).await).unwrap()
    }

    fn triangle() -> Value {
        json!({
            "name": "  Triangle ",
            "cities": [
                { "id": "A", "x": 0, "y": 0 },
                { "id": "B", "x": 3, "y": 0 },
                { "id": "C", "x": 3, "y": 4, "label": "Capital" }
            ],
            "meta": { "difficulty": "easy" }
        })
    }

    #[ntex::test]
    async fn test_health() {
        let fx = fixture();
        let app = app!(fx);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = json_body(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[ntex::test]
    async fn test_create_and_fetch_game() {
        let fx = fixture();
        let app = app!(fx);

        let req = test::TestRequest::post().uri("/api/games").set_json(&triangle()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let game: Value = json_body(resp).await;
        assert_eq!(game["name"], "Triangle");
        assert_eq!(game["meta"]["difficulty"], "easy");
        let cities = game["cities"].as_array().unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[2]["id"], "C");
        assert_eq!(cities[2], json!({ "id": "C", "x": 3, "y": 4, "label": "Capital" }));
        assert!(cities[2]["x"].is_i64());

        let uri = format!("/api/games/{}", game["id"].as_str().unwrap());
        let first = test::read_body(
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
        )
        .await;
        let second = test::read_body(
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
        )
        .await;
        assert_eq!(first, second);
        let fetched: Value = serde_json::from_slice(&first).unwrap();
        assert_eq!(fetched, game);
    }

    #[ntex::test]
    async fn test_create_game_rejects_two_cities() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_json(&json!({ "cities": [{ "id": 1, "x": 0, "y": 0 }, { "id": 2, "x": 1, "y": 1 }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(resp).await;
        assert_eq!(body["error"], "Need at least 3 cities");
    }

    #[ntex::test]
    async fn test_body_without_json_content_type_is_accepted() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_payload(triangle().to_string())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[ntex::test]
    async fn test_list_games_pagination() {
        let fx = fixture();
        let app = app!(fx);
        for _ in 0..3 {
            let req = test::TestRequest::post().uri("/api/games").set_json(&triangle()).to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/games?limit=2&offset=2").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get().uri("/api/games?limit=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(resp).await;
        assert_eq!(body["error"], "limit/offset must be int");
    }

    #[ntex::test]
    async fn test_unknown_game_is_404() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::get().uri("/api/games/does-not-exist").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[ntex::test]
    async fn test_submit_run_verifies_distance() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post().uri("/api/games").set_json(&triangle()).to_request();
        let game: Value = json_body(test::call_service(&app, req).await).await;

        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": game["id"],
                "player_name": " Ada ",
                "agent_type": "human",
                "distance": 99.0,
                "route": ["A", "B", "C"],
                "compute_time_ms": 15
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let run: Value = json_body(resp).await;
        assert_eq!(run["verified"], true);
        assert_eq!(run["distance"], 7.0);
        assert_eq!(run["num_cities"], 3);
        assert_eq!(run["player_name"], "Ada");
        assert_eq!(run["compute_time_ms"], 15);

        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": game["id"],
                "player_name": "Bot-greedy",
                "agent_type": "bot-greedy",
                "distance": 12.5,
                "route": ["A", "X"]
            }))
            .to_request();
        let run: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(run["verified"], false);
        assert_eq!(run["distance"], 12.5);

        let req = test::TestRequest::get().uri("/api/runs?agent_type=bot-greedy").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["total"], 1);
    }

    #[ntex::test]
    async fn test_submit_run_missing_fields() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({ "player_name": "Ada", "agent_type": "human" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(resp).await;
        assert_eq!(body["error"], "missing fields");
        assert_eq!(body["fields"], json!(["game_id", "distance", "route"]));
    }

    #[ntex::test]
    async fn test_submit_run_unknown_game() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": "ghost",
                "player_name": "Ada",
                "agent_type": "human",
                "distance": 1.0,
                "route": []
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(fx.store.read().runs.is_empty());
    }

    #[ntex::test]
    async fn test_submit_run_with_loose_values() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_json(&json!({
                "cities": [
                    { "id": 1, "x": 0, "y": 0 },
                    { "id": 2, "x": 3, "y": 0 },
                    { "id": 3, "x": 3, "y": 4 }
                ]
            }))
            .to_request();
        let game: Value = json_body(test::call_service(&app, req).await).await;

        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": game["id"],
                "player_name": 7,
                "agent_type": "bot",
                "distance": "12.5",
                "route": [1, null, 3],
                "compute_time_ms": "15"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let run: Value = json_body(resp).await;
        assert_eq!(run["verified"], false);
        assert_eq!(run["distance"], 12.5);
        assert_eq!(run["route"], json!([1, null, 3]));
        assert_eq!(run["player_name"], "7");
        assert_eq!(run["compute_time_ms"], 15);

        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": game["id"],
                "player_name": "p",
                "agent_type": "bot",
                "distance": 0,
                "route": [1.0, 2.0, 3.0]
            }))
            .to_request();
        let run: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(run["verified"], true);
        assert_eq!(run["distance"], 7.0);

        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": game["id"],
                "player_name": "p",
                "agent_type": "bot",
                "distance": "inf",
                "route": [1, 2]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/runs")
            .set_json(&json!({
                "game_id": null,
                "player_name": "p",
                "agent_type": "bot",
                "distance": 1,
                "route": [1, 2]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(fx.store.read().runs.len(), 2);
    }

    #[ntex::test]
    async fn test_negative_paging_counts_from_the_end() {
        let fx = fixture();
        let app = app!(fx);
        let mut ids = Vec::new();
        for _ in 0..3 {
            let req = test::TestRequest::post().uri("/api/games").set_json(&triangle()).to_request();
            let game: Value = json_body(test::call_service(&app, req).await).await;
            ids.push(game["id"].clone());
        }

        let req = test::TestRequest::get().uri("/api/games?limit=-1").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        let got: Vec<Value> = body["items"].as_array().unwrap().iter().map(|g| g["id"].clone()).collect();
        assert_eq!(got, ids[..2].to_vec());

        let req = test::TestRequest::get().uri("/api/games?offset=-1").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["items"][0]["id"], ids[2]);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }

    #[ntex::test]
    async fn test_highscores_endpoint() {
        let fx = fixture();
        let app = app!(fx);
        let req = test::TestRequest::post().uri("/api/games").set_json(&triangle()).to_request();
        let game: Value = json_body(test::call_service(&app, req).await).await;

        for route in [json!(["A", "B", "C"]), json!(["A", "B"])] {
            let req = test::TestRequest::post()
                .uri("/api/runs")
                .set_json(&json!({
                    "game_id": game["id"],
                    "player_name": "Ada",
                    "agent_type": "human",
                    "distance": 0,
                    "route": route
                }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/highscores").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        let distances: Vec<f64> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["distance"].as_f64().unwrap())
            .collect();
        assert_eq!(distances, vec![3.0, 7.0]);

        let req = test::TestRequest::get().uri("/api/highscores?scope=per_game").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get().uri("/api/highscores?limit=1.5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn test_export_survives_restart() {
        let fx = fixture();
        {
            let app = app!(fx);
            let req = test::TestRequest::post().uri("/api/games").set_json(&triangle()).to_request();
            test::call_service(&app, req).await;
        }

        let reopened = Arc::new(Store::open(fx.dir.path().join("db.json")).unwrap());
        let app = app!(reopened, fx.config);
        let req = test::TestRequest::get().uri("/api/export/json").to_request();
        let body: Value = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["games"].as_array().unwrap().len(), 1);
        assert_eq!(body["runs"], json!([]));
    }

    #[ntex::test]
    async fn test_serves_front_end() {
        let fx = fixture();
        let app = app!(fx);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"<!doctype html>"));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/app.js").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/missing.css").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
