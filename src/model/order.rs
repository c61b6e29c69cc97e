use crate::framework::{ConsoleError, Fields, Patchable, StoreEntity};
use crate::model::{lenient, text, Lenient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Fulfilment state of an order, stored as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OrderStatus {
    #[default]
    Pending = 0,
    Cancelled = 1,
    Delivered = 2,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl TryFrom<i64> for OrderStatus {
    type Error = ConsoleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderStatus::Pending),
            1 => Ok(OrderStatus::Cancelled),
            2 => Ok(OrderStatus::Delivered),
            other => Err(ConsoleError::validation(format!(
                "order status must be 0, 1 or 2, got {}",
                other
            ))),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.parse().map_err(|_| {
            ConsoleError::validation(format!("order status {:?} is not a number", s))
        })?;
        OrderStatus::try_from(value)
    }
}

impl From<OrderStatus> for i64 {
    fn from(status: OrderStatus) -> Self {
        status as i64
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A placed order. Orders are written by the storefront with their own `id` attribute; the
/// console only lists them and changes their status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(deserialize_with = "text")]
    pub customer_id: String,
    #[serde(deserialize_with = "text")]
    pub product_id: String,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "lenient")]
    pub order_date: Option<Lenient<i64>>,
    #[serde(deserialize_with = "lenient")]
    pub quantity: Option<Lenient<u32>>,
    /// Missing means pending. A value outside {0, 1, 2} is kept raw.
    #[serde(deserialize_with = "lenient")]
    pub status: Option<Lenient<OrderStatus>>,
    #[serde(deserialize_with = "lenient")]
    pub total_price: Option<Lenient<f64>>,
}

impl Order {
    /// The decoded status, or `None` when the stored value is not one of the three.
    pub fn status(&self) -> Option<OrderStatus> {
        match &self.status {
            None => Some(OrderStatus::Pending),
            Some(stored) => stored.value().copied(),
        }
    }

    /// Status label for display; an unknown stored value is shown as stored.
    pub fn status_label(&self) -> String {
        match (self.status(), &self.status) {
            (Some(status), _) => status.label().to_string(),
            (None, Some(stored)) => stored.to_string(),
            (None, None) => String::new(),
        }
    }

    /// `orderDate` as a UTC calendar date, e.g. `2024-03-01`. A non-numeric stored date is
    /// returned as stored.
    pub fn order_date_label(&self) -> Option<String> {
        match self.order_date.as_ref()? {
            Lenient::Value(millis) => DateTime::<Utc>::from_timestamp_millis(*millis)
                .map(|dt| dt.format("%Y-%m-%d").to_string()),
            Lenient::Raw(raw) => Some(raw.clone()),
        }
    }
}

/// Status change from the order table. Carries the raw selector value; it is checked
/// against [`OrderStatus`] before anything is sent to the store.
#[derive(Debug, Clone, Copy)]
pub struct OrderUpdate {
    pub status: i64,
}

impl StoreEntity for Order {
    const COLLECTION: &'static str = "Order";
    const LABEL: &'static str = "Order";
    const PLURAL: &'static str = "orders";
}

impl Patchable for Order {
    type Update = OrderUpdate;

    fn patch_fields(update: OrderUpdate) -> Result<Fields, ConsoleError> {
        let status = OrderStatus::try_from(update.status)?;
        let mut fields = Fields::new();
        fields.insert("status".into(), Value::from(i64::from(status)));
        Ok(fields)
    }
}
