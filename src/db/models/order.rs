//! Order models.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether moving from `self` to `next` follows the order lifecycle.
    ///
    /// processing -> shipped -> completed, and processing/shipped -> cancelled.
    /// Completed and cancelled are terminal. The order store does not call this;
    /// it is offered to callers that want to enforce the lifecycle themselves.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Processing, Self::Shipped)
                | (Self::Processing, Self::Cancelled)
                | (Self::Shipped, Self::Completed)
                | (Self::Shipped, Self::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// Line item embedded in an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub sku: String,
    pub title: String,
    pub qty: i64,
    pub price: f64,
}

/// Order as stored in the `orders` table
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: String,
    pub retailer_id: String,
    pub order_number: String,
    pub status: String,
    pub total_amount: f64,
    pub currency: String,
    pub items: Json<Vec<OrderItem>>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub retailer_id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        let status = row.status.parse().unwrap_or_else(|e| {
            tracing::warn!(order_id = %row.id, error = %e, "Stored order has unknown status");
            OrderStatus::default()
        });
        Self {
            id: row.id,
            retailer_id: row.retailer_id,
            order_number: row.order_number,
            status,
            total_amount: row.total_amount,
            currency: row.currency,
            items: row.items.0,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Client-editable order fields, used for both create and update.
///
/// There is no `retailer_id` here: ownership always comes from the
/// authenticated session, and any such key in the request body is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OrderInput {
    pub order_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
}
