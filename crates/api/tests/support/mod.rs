//! Shared fixtures for the HTTP integration tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use paceledger_app::{router, AppContext};
use paceledger_domain::{
    Config, DatabaseConfig, Person, Role, SaleEvent, SaleStatus, ServerConfig,
};
use paceledger_infra::{SqlitePersonDirectory, SqliteSaleEventStore};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub app: Router,
    pub org: Uuid,
    pub admin: Uuid,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("paceledger.db");
        let config = Config {
            database: DatabaseConfig {
                path: db_path.to_string_lossy().to_string(),
                pool_size: 4,
            },
            server: ServerConfig::default(),
        };
        let ctx = Arc::new(AppContext::new(config).expect("build context"));
        let app = router(Arc::clone(&ctx));
        Self { ctx, app, org: Uuid::new_v4(), admin: Uuid::new_v4(), _temp_dir: temp_dir }
    }

    /// Send a request with the given viewer identity headers
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        person: Uuid,
        role: &str,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-org-id", self.org.to_string())
            .header("x-person-id", person.to_string())
            .header("x-org-role", role);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("build request");
        self.app.clone().oneshot(request).await.expect("send request")
    }

    pub async fn get(&self, uri: &str, person: Uuid, role: &str) -> Response {
        self.request(Method::GET, uri, person, role, None).await
    }

    pub async fn seed_role(&self, name: &str) -> Role {
        let directory = SqlitePersonDirectory::new(Arc::clone(&self.ctx.db));
        let role = Role { id: Uuid::new_v4(), org_id: self.org, name: name.into() };
        directory.upsert_role(role.clone()).await.expect("seed role");
        role
    }

    pub async fn seed_person(&self, name: &str, role_id: Option<Uuid>) -> Person {
        let directory = SqlitePersonDirectory::new(Arc::clone(&self.ctx.db));
        let person =
            Person { id: Uuid::new_v4(), org_id: self.org, name: name.into(), role_id, active: true };
        directory.upsert_person(person.clone()).await.expect("seed person");
        person
    }

    pub async fn seed_sale(&self, person_id: Uuid, lob: &str, premium: f64, sold: NaiveDate) {
        let sales = SqliteSaleEventStore::new(Arc::clone(&self.ctx.db));
        let event = SaleEvent {
            id: Uuid::new_v4(),
            org_id: self.org,
            person_id,
            line_of_business: lob.into(),
            premium,
            date_sold: sold,
            status: SaleStatus::Issued,
        };
        sales.insert_event(event).await.expect("seed sale");
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
