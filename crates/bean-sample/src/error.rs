//! Error types for the sample services.

use bean_container::ContainerError;
use thiserror::Error;

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The user specified in the order does not exist.
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    /// The product specified in the order does not exist.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// There is insufficient stock to fulfill the order.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The payment gateway refused the charge.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// A dependency the service needs was never injected.
    #[error("Dependency not wired: {0}")]
    NotWired(&'static str),
}

/// Errors raised while assembling the [`OrderSystem`](crate::lifecycle::OrderSystem).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SystemError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// A bean the system hands out could not be looked up after start-up.
    #[error("Bean missing after start-up: {0}")]
    MissingBean(&'static str),
}
