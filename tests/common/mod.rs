//! Helpers for running store tests against a real PostgreSQL instance.
//!
//! Set `TEST_DATABASE_URL` to enable them; without it every store test returns early.
//! Each test gets its own schema, selected through `search_path`, so tests can run in
//! parallel against one database.

#![allow(dead_code)]

use client_manager::db::Database;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

pub struct TestStore {
    pub db: Database,
    admin: PgPool,
    schema: String,
}

/// Connect to a fresh, initialized schema named after the test, or `None` when no
/// test database is configured.
pub async fn test_store(name: &str) -> Option<TestStore> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping {name}");
        return None;
    };

    let options: PgConnectOptions = url.parse().expect("Invalid TEST_DATABASE_URL");

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options.clone())
        .await
        .expect("Failed to connect to test database");

    let schema = format!("client_manager_test_{name}");
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
        .execute(&admin)
        .await
        .expect("Failed to drop stale test schema");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let db = Database::connect_with(options.options([("search_path", schema.as_str())]))
        .await
        .expect("Failed to connect to test schema");
    db.init_schema().await.expect("Failed to create tables");

    Some(TestStore { db, admin, schema })
}

impl TestStore {
    pub async fn count_clients(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(self.db.get_pool())
            .await
            .expect("Failed to count clients")
    }

    pub async fn count_phones(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM phones")
            .fetch_one(self.db.get_pool())
            .await
            .expect("Failed to count phones")
    }

    pub async fn teardown(self) {
        self.db.close().await;
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("Failed to drop test schema");
        self.admin.close().await;
    }
}
