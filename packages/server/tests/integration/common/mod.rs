use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::NaiveDate;
use ::common::storage::{FileStore, FilesystemFileStore};
use ::common::{MediaType, PictureRecord};
use reqwest::Client;
use serde_json::{Value, json};
use tempfile::TempDir;

use server::config::{
    ApodConfig, AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig,
    WorkflowConfig,
};
use server::fetcher::ApodClient;
use server::repository::{MemoryPictureRepository, PictureRepository};
use server::service::{PictureService, PictureSettings};
use server::state::AppState;

pub mod routes {
    pub const PICDAY: &str = "/v1/picday";
    pub const STORED: &str = "/v1/stored";
    pub const STORAGE: &str = "/v1/storage";

    pub fn stored_on(date: &str) -> String {
        format!("{STORED}?date={date}")
    }

    pub fn stored_between(start: &str, end: &str) -> String {
        format!("{STORED}?start_date={start}&end_date={end}")
    }

    pub fn storage(name: &str) -> String {
        format!("{STORAGE}?name={name}")
    }
}

pub const IMAGE_BYTES: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";

/// Stand-in for the picture-of-the-day service.
#[derive(Clone)]
pub struct FakeUpstream {
    pub addr: SocketAddr,
    /// Body returned by the metadata endpoint. `Null` answers with a 500.
    pub metadata: Arc<Mutex<Value>>,
    pub metadata_hits: Arc<AtomicUsize>,
    pub image_hits: Arc<AtomicUsize>,
}

impl FakeUpstream {
    async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();

        let upstream = Self {
            addr,
            metadata: Arc::new(Mutex::new(Value::Null)),
            metadata_hits: Arc::new(AtomicUsize::new(0)),
            image_hits: Arc::new(AtomicUsize::new(0)),
        };
        upstream.set_metadata(upstream.image_metadata("moon.jpg"));

        let app = Router::new()
            .route("/planetary/apod", get(serve_metadata))
            .route("/image/moon.jpg", get(serve_image))
            .with_state(upstream.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        upstream
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/planetary/apod", self.addr)
    }

    pub fn image_url(&self, file: &str) -> String {
        format!("http://{}/image/{file}", self.addr)
    }

    pub fn set_metadata(&self, body: Value) {
        *self.metadata.lock().unwrap() = body;
    }

    /// Metadata for an image entry whose HD link points back at this server.
    pub fn image_metadata(&self, file: &str) -> Value {
        json!({
            "date": "2022-01-01",
            "title": "The Full Moon of 2021",
            "explanation": "A composite of every full moon of the year.",
            "media_type": "image",
            "url": self.image_url("moon_1024.jpg"),
            "hdurl": self.image_url(file),
            "service_version": "v1",
        })
    }

    pub fn metadata_hits(&self) -> usize {
        self.metadata_hits.load(Ordering::SeqCst)
    }

    pub fn image_hits(&self) -> usize {
        self.image_hits.load(Ordering::SeqCst)
    }
}

async fn serve_metadata(State(upstream): State<FakeUpstream>) -> impl IntoResponse {
    upstream.metadata_hits.fetch_add(1, Ordering::SeqCst);
    let body = upstream.metadata.lock().unwrap().clone();
    if body.is_null() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response();
    }
    axum::Json(body).into_response()
}

async fn serve_image(State(upstream): State<FakeUpstream>) -> impl IntoResponse {
    upstream.image_hits.fetch_add(1, Ordering::SeqCst);
    IMAGE_BYTES
}

/// A running test server backed by an in-memory store and a temp directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub upstream: FakeUpstream,
    pub repo: Arc<MemoryPictureRepository>,
    pub files: Arc<FilesystemFileStore>,
    pictures_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upstream = FakeUpstream::spawn().await;
        let pictures_dir = TempDir::new().expect("Failed to create pictures dir");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                public_url: "http://localhost:3000/".to_string(),
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 5,
                min_connections: 1,
                timeout_secs: 10,
            },
            apod: ApodConfig {
                endpoint: upstream.endpoint(),
                api_key: "DEMO_KEY".to_string(),
                request_timeout_secs: 5,
            },
            storage: StorageConfig {
                pictures_dir: pictures_dir.path().to_path_buf(),
            },
            workflow: WorkflowConfig { deadline_secs: 10 },
        };

        let repo = Arc::new(MemoryPictureRepository::new());
        let files = Arc::new(
            FilesystemFileStore::new(&app_config.storage.pictures_dir)
                .await
                .expect("Failed to open file store"),
        );
        let source = ApodClient::new(Duration::from_secs(app_config.apod.request_timeout_secs))
            .expect("Failed to build upstream client");
        let settings = PictureSettings::from_config(&app_config).expect("Invalid settings");

        let pictures = PictureService::new(repo.clone(), files.clone(), Arc::new(source), settings);
        let state = AppState {
            config: Arc::new(app_config),
            pictures: Arc::new(pictures),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            upstream,
            repo,
            files,
            pictures_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// Path of a stored file inside the temp pictures directory.
    pub fn stored_path(&self, name: &str) -> PathBuf {
        self.pictures_dir.path().join(name)
    }

    /// Store a picture row and its file directly, bypassing the upstream.
    pub async fn seed(&self, date: &str, ext: &str) {
        let date: NaiveDate = date.parse().expect("seed date");
        let record = PictureRecord {
            date,
            title: format!("Picture of {date}"),
            url: format!("https://apod.example/image/{date}_1024.{ext}"),
            hd_url: Some(format!("https://apod.example/image/{date}.{ext}")),
            thumbnail_url: None,
            media_type: MediaType::Image,
            copyright: None,
            explanation: String::new(),
            raw: Vec::new(),
        };

        let rows = self.repo.insert_one(&record).await.expect("seed insert");
        assert_eq!(rows, 1, "seed insert affected {rows} rows");
        self.files
            .write(&format!("{date}.{ext}"), IMAGE_BYTES)
            .await
            .expect("seed file write");
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = res.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            content_type,
            bytes,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn urls(&self) -> Vec<String> {
        self.body["urls"]
            .as_array()
            .expect("response body should contain 'urls'")
            .iter()
            .map(|u| u.as_str().unwrap_or_default().to_string())
            .collect()
    }
}
