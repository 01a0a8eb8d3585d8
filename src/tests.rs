//! Integration tests for the series backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    repo: Arc<Repository>,
    _temp_dir: TempDir,
}

impl TestFixture {
    /// Fixture over an empty database.
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        let state = AppState { repo: repo.clone() };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            repo,
            _temp_dir: temp_dir,
        }
    }

    /// Fixture over a seeded database.
    async fn seeded() -> Self {
        let fixture = Self::new().await;
        fixture
            .repo
            .seed_if_empty()
            .await
            .expect("Failed to seed database");
        fixture
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[tokio::test]
async fn test_root_greeting() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("series"));
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let fixture = TestFixture::new().await;

    assert!(fixture.repo.seed_if_empty().await.unwrap());
    // Second call sees a populated table and inserts nothing
    assert!(!fixture.repo.seed_if_empty().await.unwrap());

    let resp = fixture
        .client
        .get(fixture.url("/series"))
        .send()
        .await
        .unwrap();
    let series: Value = resp.json().await.unwrap();
    assert_eq!(series.as_array().unwrap().len(), 3);

    let resp = fixture
        .client
        .get(fixture.url("/directors"))
        .send()
        .await
        .unwrap();
    let directors: Value = resp.json().await.unwrap();
    assert_eq!(directors.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_seeded_series_embed_their_directors() {
    let fixture = TestFixture::seeded().await;

    let resp = fixture
        .client
        .get(fixture.url("/series"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let series: Value = resp.json().await.unwrap();
    let series = series.as_array().unwrap();

    let breaking_bad = series
        .iter()
        .find(|s| s["title"] == "Breaking Bad")
        .expect("Breaking Bad not seeded");
    assert_eq!(breaking_bad["genres"], json!(["Drama", "Crime", "Thriller"]));
    assert_eq!(breaking_bad["completed"], true);
    assert_eq!(breaking_bad["seasons"], 5);
    assert_eq!(breaking_bad["director"]["name"], "Vince");
    assert_eq!(breaking_bad["director"]["surname"], "Gilligan");
}

#[tokio::test]
async fn test_director_crud() {
    let fixture = TestFixture::new().await;

    // Create
    let resp = fixture
        .client
        .post(fixture.url("/directors"))
        .json(&json!({
            "name": "Rian",
            "surname": "Johnson",
            "age": 51,
            "birthplace": "Silver Spring, Maryland"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Rian");

    // Get by id
    let resp = fixture
        .client
        .get(fixture.url(&format!("/directors/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched["surname"], "Johnson");
    assert_eq!(fetched["age"], 51);

    // Full replace
    let resp = fixture
        .client
        .put(fixture.url(&format!("/directors/{}", id)))
        .json(&json!({
            "name": "Mike",
            "surname": "Flanagan",
            "age": 47,
            "birthplace": "Salem, Massachusetts"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Mike");
    assert_eq!(updated["birthplace"], "Salem, Massachusetts");

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/directors/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    // Gone afterwards
    let resp = fixture
        .client
        .get(fixture.url(&format!("/directors/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_director_not_found_has_no_side_effect() {
    let fixture = TestFixture::seeded().await;

    for (method, path) in [
        ("GET", "/directors/9999"),
        ("PUT", "/directors/9999"),
        ("DELETE", "/directors/9999"),
    ] {
        let req = match method {
            "GET" => fixture.client.get(fixture.url(path)),
            "PUT" => fixture.client.put(fixture.url(path)).json(&json!({
                "name": "A", "surname": "B", "age": 1, "birthplace": "C"
            })),
            _ => fixture.client.delete(fixture.url(path)),
        };
        let resp = req.send().await.unwrap();
        assert_eq!(resp.status(), 404, "{} {}", method, path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    // Stored data untouched
    let resp = fixture
        .client
        .get(fixture.url("/directors"))
        .send()
        .await
        .unwrap();
    let directors: Value = resp.json().await.unwrap();
    assert_eq!(directors.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_series_genres_round_trip_in_order() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/series"))
        .json(&json!({
            "title": "True Detective",
            "genres": ["Drama", "Crime"],
            "score": 8.9,
            "completed": false,
            "premiereDate": "2014-01-12",
            "seasons": 4,
            "directorId": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let resp = fixture
        .client
        .get(fixture.url(&format!("/series/{}", id)))
        .send()
        .await
        .unwrap();
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched["genres"], json!(["Drama", "Crime"]));
}

#[tokio::test]
async fn test_series_genre_with_comma_survives() {
    let fixture = TestFixture::new().await;

    // Genres are stored as a JSON array, so a comma inside a name is safe
    let resp = fixture
        .client
        .post(fixture.url("/series"))
        .json(&json!({
            "title": "Some Show",
            "genres": ["Crime, True", "Drama"],
            "score": 7.0,
            "completed": true,
            "premiereDate": "2020-01-01",
            "seasons": 1,
            "directorId": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();

    let resp = fixture
        .client
        .get(fixture.url(&format!("/series/{}", created["id"])))
        .send()
        .await
        .unwrap();
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched["genres"], json!(["Crime, True", "Drama"]));
}

#[tokio::test]
async fn test_series_full_replace_overwrites_all_fields() {
    let fixture = TestFixture::seeded().await;

    let resp = fixture
        .client
        .put(fixture.url("/series/1"))
        .json(&json!({
            "title": "Better Call Saul",
            "genres": ["Drama", "Legal"],
            "score": 9.0,
            "completed": true,
            "premiereDate": "2015-02-08",
            "seasons": 6,
            "directorId": 2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/series/1"))
        .send()
        .await
        .unwrap();
    let fetched: Value = resp.json().await.unwrap();

    // Every prior value is gone
    assert_eq!(fetched["title"], "Better Call Saul");
    assert_eq!(fetched["genres"], json!(["Drama", "Legal"]));
    assert_eq!(fetched["score"], 9.0);
    assert_eq!(fetched["premiereDate"], "2015-02-08");
    assert_eq!(fetched["seasons"], 6);
    assert_eq!(fetched["directorId"], 2);
    assert_eq!(fetched["director"]["surname"], "Duffer");
}

#[tokio::test]
async fn test_series_with_dangling_director_reference() {
    let fixture = TestFixture::new().await;

    // No director 9999 exists; creation still succeeds
    let resp = fixture
        .client
        .post(fixture.url("/series"))
        .json(&json!({
            "title": "Orphan Show",
            "genres": ["Drama"],
            "score": 6.5,
            "completed": false,
            "premiereDate": "2021-05-01",
            "seasons": 2,
            "directorId": 9999
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["directorId"], 9999);
    assert_eq!(created["director"], Value::Null);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/series/{}", created["id"])))
        .send()
        .await
        .unwrap();
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched["director"], Value::Null);
}

#[tokio::test]
async fn test_delete_series_then_get_returns_404() {
    let fixture = TestFixture::seeded().await;

    let resp = fixture
        .client
        .delete(fixture.url("/series/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = fixture
        .client
        .get(fixture.url("/series/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // The other seeded rows remain
    let resp = fixture
        .client
        .get(fixture.url("/series"))
        .send()
        .await
        .unwrap();
    let series: Value = resp.json().await.unwrap();
    assert_eq!(series.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_series_not_found() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/series/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
