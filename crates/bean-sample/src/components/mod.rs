//! # Sample Beans
//!
//! The services of the order system, written as container components.
//!
//! | Bean | Provides | Depends on |
//! |---|---|---|
//! | [`UserDirectory`] | itself | - |
//! | [`WarehouseInventory`] | `dyn` [`Inventory`] | - |
//! | [`CardGateway`] | `dyn` [`PaymentGateway`] | - (optional, registered by the host) |
//! | [`OrderService`] | itself | `UserDirectory` by type name, `Inventory` by interface, `PaymentGateway` optionally, `AuditLog` by name |
//! | [`AuditLog`] | itself | `OrderService` by name |
//!
//! `OrderService` and `AuditLog` reference each other. Both are registered
//! before `start_up`, so the container resolves the pair in one pass.

mod audit_log;
mod inventory;
mod order_service;
mod payment;
mod user_directory;

pub use audit_log::AuditLog;
pub use inventory::{Inventory, WarehouseInventory};
pub use order_service::OrderService;
pub use payment::{CardGateway, PaymentGateway};
pub use user_directory::UserDirectory;
