pub mod pass_api;
pub mod work_api;

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::RestStateImpl;

pub struct TestSetup {
    pub pool: Arc<SqlitePool>,
    pub rest_state: RestStateImpl,
}

impl TestSetup {
    pub async fn new() -> Self {
        // A single connection keeps the in-memory database alive for the
        // whole test.
        let pool = Arc::new(
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await
                .expect("Could not open in-memory database"),
        );
        sqlx::migrate!("../migrations/sqlite")
            .run(pool.as_ref())
            .await
            .expect("Failed to run migrations");
        let rest_state = RestStateImpl::new(pool.clone());
        Self { pool, rest_state }
    }

    pub fn router(&self) -> axum::Router {
        rest::generate_router(self.rest_state.clone())
    }

    pub async fn seed_user(&self, username: &str, name: &str, admin: bool, fond: Option<f64>) {
        sqlx::query("INSERT INTO user_info (username, name, admin, fond) VALUES (?, ?, ?, ?)")
            .bind(username)
            .bind(name)
            .bind(admin)
            .bind(fond)
            .execute(self.pool.as_ref())
            .await
            .expect("Could not seed user");
    }

    pub async fn seed_work(
        &self,
        username: &str,
        date: &str,
        hours: Option<f64>,
        work_type: &str,
    ) {
        sqlx::query(
            r#"
            INSERT INTO work (id, username, date, hours, work_type, hours2, work_type2, created, update_version, update_process)
            VALUES (?, ?, ?, ?, ?, NULL, 'NONE', '2024-01-01T00:00:00', ?, 'test')
            "#,
        )
        .bind(Uuid::new_v4().as_bytes().to_vec())
        .bind(username)
        .bind(date)
        .bind(hours)
        .bind(work_type)
        .bind(Uuid::new_v4().as_bytes().to_vec())
        .execute(self.pool.as_ref())
        .await
        .expect("Could not seed work");
    }

    pub async fn seed_pass(
        &self,
        usercode: i64,
        username: &str,
        direction: &str,
        date_time: &str,
    ) {
        sqlx::query(
            r#"
            INSERT INTO pass (id, usercode, username, direction, date_time, corrected)
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(Uuid::new_v4().as_bytes().to_vec())
        .bind(usercode)
        .bind(username)
        .bind(direction)
        .bind(date_time)
        .execute(self.pool.as_ref())
        .await
        .expect("Could not seed pass");
    }

    pub async fn seed_holiday(&self, date: &str, description: &str) {
        sqlx::query("INSERT INTO national_holiday (date, description) VALUES (?, ?)")
            .bind(date)
            .bind(description)
            .execute(self.pool.as_ref())
            .await
            .expect("Could not seed holiday");
    }
}
