mod schema;
mod search;

pub use search::ClientFilter;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Client, ClientUpdate, NewClient, Phone};

/// Store access layer over a single Postgres connection
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using the configured connection settings
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::connect_with(config.connect_options()?).await
    }

    /// Connect with explicit options. Only one connection is ever opened.
    pub async fn connect_with(options: PgConnectOptions) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        debug!("database connection established");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Release the connection
    pub async fn close(self) {
        self.pool.close().await;
        debug!("database connection closed");
    }

    // Client operations
    pub async fn get_client(&self, id: i32) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Insert a client together with its phone numbers and return the new id
    pub async fn add_client(&self, client: &NewClient) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO clients (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .fetch_one(&mut *tx)
        .await?;

        insert_phones(&mut tx, id, &client.phones).await?;

        tx.commit().await?;
        info!(client_id = id, phones = client.phones.len(), "client added");

        Ok(id)
    }

    /// Apply every present field of `update` as its own statement, in one transaction.
    ///
    /// A present phone list replaces all existing phones of the client. Updating a
    /// client that does not exist touches no rows and is not an error.
    pub async fn update_client(&self, id: i32, update: &ClientUpdate) -> Result<()> {
        if update.is_empty() {
            debug!(client_id = id, "nothing to update");
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        if let Some(first_name) = &update.first_name {
            sqlx::query("UPDATE clients SET first_name = $1 WHERE id = $2")
                .bind(first_name)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(last_name) = &update.last_name {
            sqlx::query("UPDATE clients SET last_name = $1 WHERE id = $2")
                .bind(last_name)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(email) = &update.email {
            sqlx::query("UPDATE clients SET email = $1 WHERE id = $2")
                .bind(email)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(phones) = &update.phones {
            let removed = sqlx::query("DELETE FROM phones WHERE client_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

            insert_phones(&mut tx, id, phones).await?;
            debug!(client_id = id, removed, added = phones.len(), "phones replaced");
        }

        tx.commit().await?;
        info!(client_id = id, "client updated");

        Ok(())
    }

    /// Delete a client and its phones. Deleting an unknown id is a no-op.
    pub async fn delete_client(&self, id: i32) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Explicit even though the foreign key cascades
        let phones = sqlx::query("DELETE FROM phones WHERE client_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let clients = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        info!(client_id = id, clients, phones, "client deleted");

        Ok(())
    }

    // Phone operations
    pub async fn get_phones(&self, client_id: i32) -> Result<Vec<Phone>> {
        let phones = sqlx::query_as::<_, Phone>(
            "SELECT id, client_id, phone FROM phones WHERE client_id = $1 ORDER BY id ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(phones)
    }

    /// Attach one phone number to a client.
    ///
    /// The client is not looked up first; an unknown id fails with the store's
    /// foreign-key violation.
    pub async fn add_phone(&self, client_id: i32, phone: &str) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_phones(&mut conn, client_id, &[phone]).await?;

        info!(client_id, phone, "phone added");

        Ok(())
    }

    /// Remove every row of `client_id` carrying `phone`; matching nothing is not an error
    pub async fn delete_phone(&self, client_id: i32, phone: &str) -> Result<()> {
        let removed = sqlx::query("DELETE FROM phones WHERE client_id = $1 AND phone = $2")
            .bind(client_id)
            .bind(phone)
            .execute(&self.pool)
            .await?
            .rows_affected();

        info!(client_id, phone, removed, "phone deleted");

        Ok(())
    }
}

async fn insert_phones<S: AsRef<str>>(
    conn: &mut PgConnection,
    client_id: i32,
    phones: &[S],
) -> Result<()> {
    for phone in phones {
        sqlx::query("INSERT INTO phones (client_id, phone) VALUES ($1, $2)")
            .bind(client_id)
            .bind(phone.as_ref())
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Initialize the database connection and make sure the schema exists
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::connect(config).await?;
    db.init_schema().await?;

    Ok(db)
}
