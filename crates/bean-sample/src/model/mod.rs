//! Plain data types shared by the sample services.

mod order;
mod product;
mod user;

pub use order::{Order, OrderCreate, OrderId, OrderStatus};
pub use product::{Product, ProductCreate, ProductId};
pub use user::{User, UserCreate, UserId};
