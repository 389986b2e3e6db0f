//! # System Lifecycle & Orchestration
//!
//! Wiring individual services is the easy part; deciding who builds what and
//! in which order is where complexity lives. Here the container takes that
//! job: [`OrderSystem::start`] registers every bean, runs one start-up pass,
//! and hands back the wired services.
//!
//! ## The OrderSystem Pattern
//!
//! ```rust,ignore
//! let container = Container::new();
//!
//! // 1. Optional collaborators first: they join the same wiring pass
//! container.register(Arc::new(CardGateway::new(500.0)));
//!
//! // 2. Core services are registered, then resolved in one go
//! let system = OrderSystem::start(container)?;
//!
//! // 3. Use the wired services
//! system.orders.place_order(order)?;
//! ```
//!
//! ## Late Binding
//!
//! Nothing is resolved at construction time. Every bean is created with empty
//! [`Autowired`](bean_container::Autowired) slots and only filled in once the
//! whole universe of beans is known. That is what lets
//! [`OrderService`](crate::components::OrderService) and
//! [`AuditLog`](crate::components::AuditLog) point at each other.
//!
//! ## Observability & Tracing
//!
//! [`bean_container::tracing::setup_tracing`] installs the subscriber. With
//! `RUST_LOG=info` the start-up shows every registration and hook; with
//! `RUST_LOG=debug` every resolved field and applied default as well.

pub mod order_system;

pub use order_system::*;
