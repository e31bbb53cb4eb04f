//! Bootstrap from a config file and serve requests through the production
//! middleware stack.

use actix_web::http::header;
use actix_web::{test, web, App};
use bioindex_api::configure_routes;
use bioindex_configs::ServerConfig;
use bioindex_server::lifecycle::bootstrap;
use bioindex_server::middleware::{build_cors_from_config, request_logger};
use bioindex_store::test_utils::TestIndexDb;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Scratch {
    db: TestIndexDb,
    dir: TempDir,
}

fn scratch() -> Scratch {
    let db = TestIndexDb::new().unwrap();
    db.execute_batch(
        "CREATE TABLE patients (id INTEGER, code TEXT);
         INSERT INTO patients VALUES (1, 'B'), (2, 'A'), (3, 'C');",
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let records = dir.path().join("objects").join("patients");
    fs::create_dir_all(&records).unwrap();
    for (id, code) in [(1, "B"), (2, "A"), (3, "C")] {
        fs::write(
            records.join(id.to_string()),
            json!({"id": id, "code": code}).to_string(),
        )
        .unwrap();
    }

    Scratch { db, dir }
}

fn write_config(scratch: &Scratch, database: &Path) -> ServerConfig {
    let config = format!(
        r#"
[logging]
logs_path = "{logs}"
log_to_console = false

[database]
path = "{database}"
pool_size = 2

[storage]
url = "{objects}"

[security.cors]
allowed_origins = ["https://portal.example.org"]

[[tables]]
name = "patients"
key = "code"
id_field = "id"
value_indexed = true
fields = [
    {{ name = "id", type = "integer" }},
    {{ name = "code", type = "string" }},
]
"#,
        logs = scratch.dir.path().join("logs").display(),
        database = database.display(),
        objects = scratch.dir.path().join("objects").display(),
    );

    let path = scratch.dir.path().join("config.toml");
    fs::write(&path, config).unwrap();
    ServerConfig::from_file(&path).unwrap()
}

#[actix_web::test]
async fn test_bootstrap_and_query() {
    let scratch = scratch();
    let config = write_config(&scratch, scratch.db.path());
    let ctx = bootstrap(&config).await.unwrap();

    let app = test::init_service(
        App::new()
            .wrap(request_logger())
            .wrap(build_cors_from_config(&config))
            .app_data(web::Data::new(ctx))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/query/patients?q=A")
        .insert_header((header::ORIGIN, "https://portal.example.org"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://portal.example.org")
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"], json!([{"id": 2, "code": "A"}]));

    let req = test::TestRequest::get().uri("/api/keys/patients").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["keys"], json!(["A", "B", "C"]));
}

#[actix_web::test]
async fn test_bootstrap_fails_without_database() {
    let scratch = scratch();
    let missing = scratch.dir.path().join("missing.db");
    let config = write_config(&scratch, &missing);

    assert!(bootstrap(&config).await.is_err());
}
