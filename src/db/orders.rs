//! Retailer-scoped order storage.
//!
//! Every statement filters on `retailer_id` taken from the authenticated
//! session, so an order id belonging to another retailer behaves exactly like
//! an id that does not exist.

use sqlx::types::Json;
use uuid::Uuid;

use super::{DbPool, Order, OrderInput, OrderRow};
use crate::auth::AuthenticatedRetailer;

#[derive(Debug, Clone)]
pub struct OrderStore {
    db: DbPool,
}

impl OrderStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// All orders owned by the retailer, oldest first
    pub async fn list(&self, owner: &AuthenticatedRetailer) -> Result<Vec<Order>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT * FROM orders WHERE retailer_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(owner.id())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Insert a new order owned by `owner` and return its id
    pub async fn create(
        &self,
        owner: &AuthenticatedRetailer,
        input: &OrderInput,
    ) -> Result<String, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO orders (id, retailer_id, order_number, status, total_amount, currency, items, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(owner.id())
        .bind(&input.order_number)
        .bind(input.status.as_str())
        .bind(input.total_amount)
        .bind(&input.currency)
        .bind(Json(&input.items))
        .bind(&input.notes)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await?;

        tracing::info!(retailer_id = %owner.id(), order_id = %id, "Order created");
        Ok(id)
    }

    /// Replace the editable fields of an owned order.
    ///
    /// Returns whether a row matched; a foreign or unknown id matches nothing.
    pub async fn update(
        &self,
        owner: &AuthenticatedRetailer,
        order_id: &str,
        input: &OrderInput,
    ) -> Result<bool, sqlx::Error> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                order_number = ?,
                status = ?,
                total_amount = ?,
                currency = ?,
                items = ?,
                notes = ?,
                updated_at = ?
            WHERE id = ? AND retailer_id = ?
            "#,
        )
        .bind(&input.order_number)
        .bind(input.status.as_str())
        .bind(input.total_amount)
        .bind(&input.currency)
        .bind(Json(&input.items))
        .bind(&input.notes)
        .bind(&now)
        .bind(order_id)
        .bind(owner.id())
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an owned order. Returns whether a row matched.
    pub async fn delete(
        &self,
        owner: &AuthenticatedRetailer,
        order_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ? AND retailer_id = ?")
            .bind(order_id)
            .bind(owner.id())
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{find_retailer_by_id, insert_retailer, test_pool, OrderItem, OrderStatus};

    async fn retailer(pool: &DbPool, email: &str) -> AuthenticatedRetailer {
        let id = insert_retailer(pool, email, "hash", None, None).await.unwrap();
        let record = find_retailer_by_id(pool, &id).await.unwrap().unwrap();
        AuthenticatedRetailer::new(record)
    }

    fn input(order_number: &str) -> OrderInput {
        OrderInput {
            order_number: order_number.to_string(),
            status: OrderStatus::Processing,
            total_amount: 42.5,
            currency: "EUR".to_string(),
            items: vec![
                OrderItem {
                    sku: "RED-01".to_string(),
                    title: "Rosso".to_string(),
                    qty: 2,
                    price: 12.0,
                },
                OrderItem {
                    sku: "WHT-07".to_string(),
                    title: "Bianco".to_string(),
                    qty: 1,
                    price: 18.5,
                },
            ],
            notes: Some("leave at the back door".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let pool = test_pool().await;
        let store = OrderStore::new(pool.clone());
        let alice = retailer(&pool, "alice@x.com").await;

        let order = input("LD-1001");
        let id = store.create(&alice, &order).await.unwrap();

        let orders = store.list(&alice).await.unwrap();
        assert_eq!(orders.len(), 1);
        let stored = &orders[0];
        assert_eq!(stored.id, id);
        assert_eq!(stored.retailer_id, alice.id());
        assert_eq!(stored.order_number, order.order_number);
        assert_eq!(stored.status, order.status);
        assert_eq!(stored.total_amount, order.total_amount);
        assert_eq!(stored.currency, order.currency);
        assert_eq!(stored.items, order.items);
        assert_eq!(stored.items[0].sku, "RED-01");
        assert_eq!(stored.notes, order.notes);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let pool = test_pool().await;
        let store = OrderStore::new(pool.clone());
        let alice = retailer(&pool, "alice@x.com").await;
        let bob = retailer(&pool, "bob@x.com").await;

        store.create(&alice, &input("A-1")).await.unwrap();
        store.create(&alice, &input("A-2")).await.unwrap();
        store.create(&bob, &input("B-1")).await.unwrap();

        let numbers: Vec<String> = store
            .list(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_number)
            .collect();
        assert_eq!(numbers, vec!["A-1", "A-2"]);
        assert_eq!(store.list(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_owned_order() {
        let pool = test_pool().await;
        let store = OrderStore::new(pool.clone());
        let alice = retailer(&pool, "alice@x.com").await;
        let id = store.create(&alice, &input("A-1")).await.unwrap();

        let mut changed = input("A-1");
        changed.status = OrderStatus::Shipped;
        changed.items.truncate(1);
        changed.notes = None;

        assert!(store.update(&alice, &id, &changed).await.unwrap());

        let stored = store.list(&alice).await.unwrap().remove(0);
        assert_eq!(stored.status, OrderStatus::Shipped);
        assert_eq!(stored.items.len(), 1);
        assert!(stored.notes.is_none());
        assert_eq!(stored.retailer_id, alice.id());
    }

    #[tokio::test]
    async fn test_cross_tenant_update_and_delete_have_no_effect() {
        let pool = test_pool().await;
        let store = OrderStore::new(pool.clone());
        let alice = retailer(&pool, "alice@x.com").await;
        let bob = retailer(&pool, "bob@x.com").await;
        let id = store.create(&alice, &input("A-1")).await.unwrap();

        let mut hijack = input("HIJACKED");
        hijack.status = OrderStatus::Cancelled;
        assert!(!store.update(&bob, &id, &hijack).await.unwrap());
        assert!(!store.delete(&bob, &id).await.unwrap());
        assert!(store.list(&bob).await.unwrap().is_empty());

        let stored = store.list(&alice).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].order_number, "A-1");
        assert_eq!(stored[0].status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_delete_owned_order() {
        let pool = test_pool().await;
        let store = OrderStore::new(pool.clone());
        let alice = retailer(&pool, "alice@x.com").await;
        let id = store.create(&alice, &input("A-1")).await.unwrap();

        assert!(store.delete(&alice, &id).await.unwrap());
        assert!(!store.delete(&alice, &id).await.unwrap());
        assert!(store.list(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_order_id() {
        let pool = test_pool().await;
        let store = OrderStore::new(pool.clone());
        let alice = retailer(&pool, "alice@x.com").await;

        assert!(!store.update(&alice, "no-such-order", &input("X")).await.unwrap());
        assert!(!store.delete(&alice, "no-such-order").await.unwrap());
    }
}
