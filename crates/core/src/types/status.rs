//! Order status enumeration.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown [`OrderStatus`] string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown order status: {0:?}")]
pub struct OrderStatusError(pub String);

/// Lifecycle status of an order.
///
/// Orders are created as `Confirmed`. `Canceled` is terminal; the
/// intermediate fulfillment states are reachable through the generic
/// order-update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Canceled => write!(f, "Canceled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderStatusError;

    /// Parse a status string, case-insensitively.
    ///
    /// Both the American `canceled` and British `cancelled` spellings map
    /// to [`OrderStatus::Canceled`]; legacy data used them inconsistently.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(OrderStatusError(s.to_owned())),
        }
    }
}
