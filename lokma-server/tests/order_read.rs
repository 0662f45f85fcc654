//! Order read path against a live store
//!
//! Whatever shape an order was stored in, the repository hands back the
//! canonical representation.

use lokma_server::db::DbService;
use lokma_server::db::repository::OrderRepository;
use serde_json::json;

async fn setup() -> OrderRepository {
    let db = DbService::memory().await.expect("in-memory db");
    OrderRepository::new(db.db().clone())
}

#[tokio::test]
async fn all_stored_shapes_read_back_canonical() {
    let orders = setup().await;

    orders
        .create_raw(json!({
            "_id": "order-items",
            "items": [{"packageId": "pkg-1", "name": "Künefe", "originalPrice": 80, "price": 60, "quantity": 2}]
        }))
        .await
        .expect("seed items shape");
    orders
        .create_raw(json!({
            "_id": "order-packages",
            "packages": [{"packageName": "Künefe", "originalPrice": 80, "price": 60, "quantity": 2}]
        }))
        .await
        .expect("seed packages shape");
    orders
        .create_raw(json!({
            "_id": "order-single",
            "package": {"name": "Künefe", "originalPrice": 80, "price": 60},
            "quantity": 2
        }))
        .await
        .expect("seed singular shape");

    for id in ["order-items", "order-packages", "order-single"] {
        let order = orders
            .find_by_id(id)
            .await
            .expect("read order")
            .expect("order exists");
        assert_eq!(order.id, id);
        assert_eq!(order.items.len(), 1, "order {id}");
        assert_eq!(order.items[0].name, "Künefe");
        assert_eq!(order.items[0].total, 120.0);
        assert_eq!(order.total_price, 120.0);
        assert_eq!(order.savings, 40.0);
        // Missing timestamps were defaulted during normalization
        assert!(!order.created_at.is_empty());
    }
}

#[tokio::test]
async fn missing_order_reads_back_none() {
    let orders = setup().await;
    let order = orders.find_by_id("order-nope").await.expect("read order");
    assert!(order.is_none());
}

#[tokio::test]
async fn customer_orders_come_back_canonical() {
    let orders = setup().await;

    orders
        .create_raw(json!({
            "_id": "order-1",
            "customer": {"id": "user-7", "name": "Ayşe"},
            "packages": [{"packageName": "Ayran", "price": 12.5, "quantity": 2}],
            "createdAt": "2025-03-01T10:00:00Z"
        }))
        .await
        .expect("seed order");
    orders
        .create_raw(json!({
            "_id": "order-2",
            "customer": {"id": "user-7", "name": "Ayşe"},
            "totalAmount": 45.0,
            "createdAt": "2025-03-02T10:00:00Z"
        }))
        .await
        .expect("seed order");

    let list = orders.find_by_customer("user-7").await.expect("read orders");
    assert_eq!(list.len(), 2);
    // Newest first
    assert_eq!(list[0].id, "order-2");
    assert_eq!(list[0].total_price, 45.0);
    assert!(list[0].items.is_empty());
    assert_eq!(list[1].id, "order-1");
    assert_eq!(list[1].total_price, 25.0);
    assert_eq!(list[1].customer.id, "user-7");
}
