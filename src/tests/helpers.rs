#![cfg(test)]

use std::path::Path;

use axum::body::{Body, to_bytes};
use axum::http::Request;
use axum::response::Response;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use uuid::Uuid;

pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D];

const BOUNDARY: &str = "profile-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: &str, uri: &str, header: Option<(&str, &str)>) -> Request<Body> {
        self.body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY));
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(Body::from(self.body)).unwrap()
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&body).expect("json body")
}

pub fn unique_account() -> Uuid {
    Uuid::now_v7()
}

pub async fn insert_profile(pool: &PgPool, account_id: Uuid, business_name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
            INSERT INTO profiles (id, account_id, business_name, business_type, phone)
            VALUES ($1, $2, $3, 'Wellness', '5550000000')
            RETURNING id
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(account_id)
    .bind(business_name)
    .fetch_one(pool)
    .await
    .expect("insert profile")
}

pub async fn business_name(pool: &PgPool, profile_id: Uuid) -> String {
    sqlx::query_scalar::<_, String>("SELECT business_name FROM profiles WHERE id = $1")
        .bind(profile_id)
        .fetch_one(pool)
        .await
        .expect("select business name")
}

pub async fn count_rows(pool: &PgPool, table: &str, profile_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {} WHERE profile_id = $1", table))
        .bind(profile_id)
        .fetch_one(pool)
        .await
        .expect("count rows")
}

pub async fn delete_profile(pool: &PgPool, profile_id: Uuid) {
    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(profile_id)
        .execute(pool)
        .await
        .expect("delete profile");
}

/// Number of files stored under one media prefix.
pub fn stored_files(root: &Path, prefix: &str) -> usize {
    std::fs::read_dir(root.join(prefix))
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}
