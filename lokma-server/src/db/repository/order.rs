//! Order Repository
//!
//! Orders are stored in whichever shape they were written historically.
//! Every read path funnels through the normalizer, so callers only ever
//! see the canonical shape.

use super::{BaseRepository, RepoResult};
use crate::normalize::normalize_order;
use chrono::Utc;
use serde_json::Value;
use shared::models::Order;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fetch a stored order document without normalization
    pub async fn find_raw(&self, order_id: &str) -> RepoResult<Option<Value>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM order WHERE _id = $id LIMIT 1")
            .bind(("id", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(docs.into_iter().next())
    }

    /// Fetch an order in canonical form
    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<Order>> {
        let doc = self.find_raw(order_id).await?;
        Ok(doc.map(|d| normalize_order(&d, Utc::now())))
    }

    /// Fetch a customer's orders in canonical form, newest first
    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<Order>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM order \
                 WHERE customer.id = $id OR customer._id = $id \
                 ORDER BY createdAt DESC",
            )
            .bind(("id", customer_id.to_string()))
            .await?
            .take(0)?;
        let now = Utc::now();
        Ok(docs.iter().map(|d| normalize_order(d, now)).collect())
    }

    /// Insert an order document as-is (checkout and import paths)
    pub async fn create_raw(&self, doc: Value) -> RepoResult<()> {
        // `order` is a query-language keyword, so the table is bound by name
        self.base
            .db()
            .query("CREATE type::table($tb) CONTENT $doc")
            .bind(("tb", ORDER_TABLE))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(())
    }
}
