//! Newtype wrappers for domain values.

mod email;
mod id;
mod price;
mod status;
mod username;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, UserId};
pub use price::{CurrencyCode, Price, PriceError};
pub use status::{OrderStatus, OrderStatusError};
pub use username::{Username, UsernameError};
