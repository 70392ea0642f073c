//! Database Module
//!
//! Owns the SurrealDB connection lifecycle and the table definitions.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;

use crate::core::{DatabaseConfig, ServerError};

/// Table and field definitions, applied on every start (idempotent)
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
DEFINE FIELD IF NOT EXISTS client_name ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS client_phone ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS client_email ON TABLE booking TYPE option<string>;
DEFINE FIELD IF NOT EXISTS service_id ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS service_name ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS stylist_id ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS stylist_name ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS date ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS time ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS notes ON TABLE booking TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON TABLE booking TYPE string;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE booking TYPE int;
DEFINE FIELD IF NOT EXISTS updated_at ON TABLE booking TYPE option<int>;
DEFINE FIELD IF NOT EXISTS version ON TABLE booking TYPE int;
DEFINE INDEX IF NOT EXISTS booking_created_at ON TABLE booking FIELDS created_at;

DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
DEFINE FIELD IF NOT EXISTS name ON TABLE product TYPE string;
DEFINE FIELD IF NOT EXISTS price ON TABLE product TYPE number;
DEFINE FIELD IF NOT EXISTS category ON TABLE product TYPE string;
DEFINE FIELD IF NOT EXISTS description ON TABLE product TYPE option<string>;
DEFINE FIELD IF NOT EXISTS image_url ON TABLE product TYPE option<string>;
DEFINE FIELD IF NOT EXISTS public_id ON TABLE product TYPE option<string>;
DEFINE FIELD IF NOT EXISTS stock ON TABLE product TYPE int;
DEFINE FIELD IF NOT EXISTS in_stock ON TABLE product TYPE bool;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE product TYPE int;
DEFINE FIELD IF NOT EXISTS updated_at ON TABLE product TYPE option<int>;
DEFINE FIELD IF NOT EXISTS version ON TABLE product TYPE int;
DEFINE INDEX IF NOT EXISTS product_created_at ON TABLE product FIELDS created_at;
DEFINE INDEX IF NOT EXISTS product_category ON TABLE product FIELDS category;
"#;

/// Database service, owns the SurrealDB handle for the life of the process
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Any>,
}

impl DbService {
    /// Open the connection described by `config`
    ///
    /// 1. connect (`ws://`, `wss://`, `http://`, `mem://`)
    /// 2. root sign-in when both username and password are set
    /// 3. select namespace / database
    /// 4. apply table definitions
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, ServerError> {
        let db = any::connect(config.url.as_str())
            .await
            .map_err(|e| ServerError::Database(format!("Failed to connect to {}: {e}", config.url)))?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await
            .map_err(|e| ServerError::Database(format!("Failed to authenticate: {e}")))?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .map_err(|e| ServerError::Database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| ServerError::Database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Database connection established"
        );

        Ok(Self { db })
    }

    /// Release the connection at shutdown
    ///
    /// Invalidates the session for remote engines; the handle is dropped afterwards.
    pub async fn close(self) {
        if let Err(e) = self.db.invalidate().await {
            tracing::warn!(error = %e, "Failed to invalidate database session");
        }
        drop(self.db);
        tracing::info!("Database connection closed");
    }
}

impl From<Surreal<Any>> for DbService {
    fn from(db: Surreal<Any>) -> Self {
        Self { db }
    }
}
