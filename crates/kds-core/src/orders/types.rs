use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle of an order as seen by the kitchen.
///
/// Orders only move forward (`Ordered → Preparing → Ready → Collected`) and
/// every transition arrives from the backend; the client never changes an
/// order's status locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Ordered,
    Preparing,
    Ready,
    Collected,
}

impl OrderStatus {
    /// Parse a backend status label, case-insensitively.
    ///
    /// Missing or unrecognized labels map to `Ordered`.
    pub fn parse(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return OrderStatus::Ordered;
        };

        match label.trim().to_ascii_lowercase().as_str() {
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "collected" => OrderStatus::Collected,
            _ => OrderStatus::Ordered,
        }
    }

    /// Returns true once the order has left the counter.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Collected)
    }

    /// Returns true while the kitchen still has to mark the order ready.
    pub fn awaits_completion(&self) -> bool {
        matches!(self, OrderStatus::Ordered | OrderStatus::Preparing)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

/// An order in the current queue snapshot.
///
/// Read-only to the client. Backends emit two item shapes (a single
/// `item`/`qty` pair or an `items` list); both are normalized into `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOrder")]
pub struct Order {
    pub id: String,
    pub student_id: String,
    /// Status label exactly as the backend sent it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub items: Vec<OrderLine>,
    /// Predicted minutes until ready; `None` until the backend computes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_minutes: Option<f64>,
    /// Pickup token handed to the customer (e.g. `A-12`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

impl Order {
    pub fn order_status(&self) -> OrderStatus {
        OrderStatus::parse(self.status.as_deref())
    }

    /// Total number of units across all lines.
    pub fn total_qty(&self) -> u32 {
        self.items.iter().map(|line| line.qty).sum()
    }
}

/// Wire shape accepted from the queue endpoint.
#[derive(Deserialize)]
struct RawOrder {
    #[serde(alias = "order_id", alias = "_id", deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    student_id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    items: Option<Vec<OrderLine>>,
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    qty: Option<u32>,
    #[serde(default, alias = "predicted_time", deserialize_with = "lenient_minutes")]
    eta_minutes: Option<f64>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    total_price: Option<f64>,
    #[serde(default)]
    vendor_id: Option<String>,
}

impl From<RawOrder> for Order {
    fn from(raw: RawOrder) -> Self {
        let items = match (raw.items, raw.item) {
            (Some(items), _) => items,
            (None, Some(name)) => vec![OrderLine {
                name,
                qty: raw.qty.unwrap_or_else(default_qty),
            }],
            (None, None) => Vec::new(),
        };

        Order {
            id: raw.id,
            student_id: raw.student_id,
            status: raw.status,
            items,
            eta_minutes: raw.eta_minutes,
            token: raw.token,
            total_price: raw.total_price,
            vendor_id: raw.vendor_id,
        }
    }
}

/// Accept identifiers sent either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Accept an ETA as a number of minutes or as text such as `"10 mins"`.
///
/// Text without a leading number (`"Calculating..."`) and `null` mean the
/// backend has no estimate yet.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => leading_number(&s),
        _ => None,
    })
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
