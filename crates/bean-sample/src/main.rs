//! # Bean Container Sample
//!
//! An order management system whose services are wired by the bean container.
//!
//! ## Core Components
//!
//! - **[components]**: the beans ([`UserDirectory`], `WarehouseInventory`,
//!   [`CardGateway`], `OrderService`, `AuditLog`).
//! - **[model]**: plain data structures ([`User`], [`Product`], [`Order`]).
//! - **[lifecycle]**: [`OrderSystem`], which registers the beans and starts the container.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -p bean-sample
//!
//! # Reproducible confirmation codes and transaction ids
//! BEAN_SAMPLE_SEED=7 RUST_LOG=debug cargo run -p bean-sample
//! ```
//!
//! [components]: bean_sample::components
//! [model]: bean_sample::model
//! [lifecycle]: bean_sample::lifecycle
//! [`UserDirectory`]: bean_sample::components::UserDirectory
//! [`CardGateway`]: bean_sample::components::CardGateway
//! [`User`]: bean_sample::model::User
//! [`Product`]: bean_sample::model::Product
//! [`Order`]: bean_sample::model::Order
//! [`OrderSystem`]: bean_sample::lifecycle::OrderSystem

use bean_container::tracing::setup_tracing;
use bean_container::{Container, ContainerOptions};
use bean_sample::components::CardGateway;
use bean_sample::lifecycle::OrderSystem;
use bean_sample::model::{OrderCreate, ProductCreate, UserCreate};
use std::sync::Arc;
use tracing::{error, info};

fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let options = ContainerOptions {
        rng_seed: std::env::var("BEAN_SAMPLE_SEED")
            .ok()
            .and_then(|seed| seed.parse().ok()),
    };
    info!(?options, "Starting application with complete order system");

    let container = Container::with_options(options);
    container.register(Arc::new(CardGateway::new(1_000.0)));
    let system = OrderSystem::start(container).map_err(|e| e.to_string())?;

    let user_id = {
        let _span = tracing::info_span!("user_creation").entered();
        info!("Creating test user");
        system
            .users
            .create_user(UserCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .map_err(|e| e.to_string())?
    };
    info!(user_id = %user_id, "User created successfully");

    let product_id = system
        .inventory
        .add_product(ProductCreate {
            name: "Test Product".to_string(),
            price: 100.0,
            quantity: 10,
        })
        .map_err(|e| e.to_string())?;
    info!(product_id = %product_id, "Product created successfully");

    let order_result = {
        let _span = tracing::info_span!("order_processing").entered();
        info!("Processing order through order system");
        system.orders.place_order(OrderCreate {
            user_id,
            product_id: product_id.clone(),
            quantity: 5,
        })
    };

    match order_result {
        Ok(order) => info!(
            order_id = %order.id,
            confirmation = %order.confirmation,
            status = ?order.status,
            "Order processed successfully"
        ),
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    info!(
        beans = ?system.container().bean_names(),
        orders = system.audit.orders_seen(),
        stock_left = system.inventory.product(&product_id).map(|p| p.quantity),
        audit_entries = system.audit.entries().len(),
        "Application completed successfully"
    );
    Ok(())
}
