// Each test file compiles this module separately; not every helper is used everywhere.
#![allow(dead_code)]

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use sitekeep::db::{CredentialStorage, SqlitePool, WebsiteStorage};
use sitekeep::middleware::SitekeepService;
use sitekeep::{Resource, SitekeepState};
use tower::ServiceExt;

pub const FORM: &str = "application/x-www-form-urlencoded";

pub struct TestApp {
    pub app: SitekeepService,
    pub pool: SqlitePool,
    pub website_id: i64,
}

impl TestApp {
    /// Fresh in-memory database with one website.
    pub async fn spawn() -> Self {
        let pool = sitekeep::db::connect("sqlite::memory:", 1)
            .await
            .expect("failed to open in-memory database");
        let website = WebsiteStorage::new(pool.clone())
            .create("Example", Some("example.com"))
            .await
            .expect("failed to create website");
        let app = sitekeep::sitekeep_service(SitekeepState::new(pool.clone()));
        Self {
            app,
            pool,
            website_id: website.id,
        }
    }

    pub fn storage(&self, resource: Resource) -> CredentialStorage {
        CredentialStorage::new(self.pool.clone(), resource)
    }

    pub async fn add_website(&self, name: &str) -> i64 {
        WebsiteStorage::new(self.pool.clone())
            .create(name, None)
            .await
            .expect("failed to create website")
            .id
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None, &[]).await
    }

    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)]) -> (StatusCode, Value) {
        self.send("POST", uri, Some((FORM, form(pairs))), &[]).await
    }

    pub async fn put_form(&self, uri: &str, pairs: &[(&str, &str)]) -> (StatusCode, Value) {
        self.send("PUT", uri, Some((FORM, form(pairs))), &[]).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None, &[]).await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<(&str, String)>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some((content_type, payload)) => builder
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(payload)),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let resp = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not json")
        };
        (status, json)
    }
}

/// Encode pairs as `application/x-www-form-urlencoded`.
pub fn form(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

pub fn mysql_login() -> Vec<(&'static str, &'static str)> {
    vec![
        ("type", "mysql"),
        ("hostname", "localhost"),
        ("username", "pickle"),
        ("password", "password"),
        ("database", "dbname"),
        ("url", "http://url.com"),
    ]
}
