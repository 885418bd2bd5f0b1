//! Domain records persisted through the [`crate::db::Store`] gateway,
//! plus the explicit [`Session`] value.

pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use order::Order;
pub use product::Product;
pub use session::{CurrentUser, Session};
pub use user::User;
