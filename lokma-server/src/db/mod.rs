//! Database Module
//!
//! Embedded SurrealDB document store. The store exposes find-by-identifier,
//! partial updates (`UPDATE ... MERGE`), and grouping queries; it makes no
//! multi-document transaction guarantees and none are assumed.

pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "lokma";
const DATABASE: &str = "marketplace";

/// Database service - owns the embedded store handle
#[derive(Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// Open an in-memory database (tests and ephemeral tooling)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Store-level guard for the one-rating-per-order invariant. The
        // write boundary checks first to produce a descriptive error; the
        // index closes the race between concurrent writers.
        db.query("DEFINE INDEX IF NOT EXISTS uniq_rating_order ON TABLE rating COLUMNS orderId UNIQUE")
            .await
            .and_then(surrealdb::Response::check)
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        tracing::info!("Database ready (embedded, ns={NAMESPACE} db={DATABASE})");
        Ok(Self { db })
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
