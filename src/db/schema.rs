use tracing::debug;

use super::Database;
use crate::error::Result;

const CREATE_CLIENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS clients (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(25) NOT NULL,
        last_name VARCHAR(25) NOT NULL,
        email VARCHAR(40) NOT NULL
    )
"#;

const CREATE_PHONES: &str = r#"
    CREATE TABLE IF NOT EXISTS phones (
        id SERIAL PRIMARY KEY,
        client_id INTEGER NOT NULL REFERENCES clients (id) ON DELETE CASCADE,
        phone VARCHAR(20) NOT NULL
    )
"#;

impl Database {
    /// Create the `clients` and `phones` tables if they do not exist yet.
    ///
    /// Safe to call on every start; existing tables and rows are left as they are.
    pub async fn init_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(CREATE_CLIENTS).execute(&mut *tx).await?;
        sqlx::query(CREATE_PHONES).execute(&mut *tx).await?;

        tx.commit().await?;
        debug!("schema ready");

        Ok(())
    }
}
