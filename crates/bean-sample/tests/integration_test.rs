use bean_container::testing::LogCapture;
use bean_container::{BeanState, Bindings, Component, Container, ContainerOptions};
use bean_sample::components::{CardGateway, Inventory, PaymentGateway};
use bean_sample::error::OrderError;
use bean_sample::lifecycle::OrderSystem;
use bean_sample::model::{
    OrderCreate, OrderStatus, Product, ProductCreate, ProductId, UserCreate, UserId,
};
use std::sync::Arc;

fn alice(system: &OrderSystem) -> UserId {
    system
        .users
        .create_user(UserCreate {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .expect("Failed to create user")
}

fn widget(system: &OrderSystem, quantity: u32) -> ProductId {
    system
        .inventory
        .add_product(ProductCreate {
            name: "Super Widget".to_string(),
            price: 25.50,
            quantity,
        })
        .expect("Failed to create product")
}

/// Full end-to-end test with every bean wired by the container.
#[test]
fn test_full_order_system_integration() {
    let container = Container::new();
    container.register(Arc::new(CardGateway::new(1_000.0)));
    let system = OrderSystem::start(container).expect("Failed to start system");

    let user_id = alice(&system);
    let retrieved_user = system.users.get(&user_id).expect("User not found");
    assert_eq!(retrieved_user.name, "Alice");

    let product_id = widget(&system, 100);
    let order = system
        .orders
        .place_order(OrderCreate {
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            quantity: 5,
        })
        .expect("Failed to place order");

    assert_eq!(order.total, 127.50);
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.confirmation.len(), 6);
    assert_eq!(system.orders.order(&order.id), Some(order.clone()));

    // Stock was reserved
    let product = system.inventory.product(&product_id).unwrap();
    assert_eq!(product.quantity, 95);

    // The audit log saw the order through its back-reference
    assert_eq!(system.audit.orders_seen(), 1);
    assert!(system
        .audit
        .entries()
        .iter()
        .any(|e| e.starts_with(&order.id.to_string())));
}

#[test]
fn test_mutual_references_are_wired() {
    let system = OrderSystem::start(Container::new()).unwrap();

    let audit = system.orders.audit_log().expect("audit not wired");
    assert!(Arc::ptr_eq(&audit, &system.audit));
    let orders = system.audit.order_service().expect("orders not wired");
    assert!(Arc::ptr_eq(&orders, &system.orders));
    assert!(system.orders.is_ready());
}

#[test]
fn test_without_gateway_orders_await_payment() {
    let capture = LogCapture::new();
    let system = capture
        .run(|| OrderSystem::start(Container::new()))
        .unwrap();

    assert!(!system.orders.has_payments());
    assert!(capture.has_warning("No payment gateway wired"));

    let user_id = alice(&system);
    let product_id = widget(&system, 10);
    let order = system
        .orders
        .place_order(OrderCreate {
            user_id,
            product_id,
            quantity: 2,
        })
        .unwrap();
    assert_eq!(order.status, OrderStatus::AwaitingPayment);
}

#[test]
fn test_declined_payment_releases_stock() {
    let container = Container::new();
    container.register(Arc::new(CardGateway::new(50.0)));
    let system = OrderSystem::start(container).unwrap();

    let user_id = alice(&system);
    let product_id = widget(&system, 10);
    let result = system.orders.place_order(OrderCreate {
        user_id,
        product_id: product_id.clone(),
        quantity: 3,
    });

    assert!(matches!(result, Err(OrderError::PaymentDeclined(_))));
    assert_eq!(system.inventory.product(&product_id).unwrap().quantity, 10);
    assert_eq!(system.orders.order_count(), 0);
}

#[test]
fn test_order_validation_errors() {
    let system = OrderSystem::start(Container::new()).unwrap();
    let user_id = alice(&system);
    let product_id = widget(&system, 1);

    let unknown_user = system.orders.place_order(OrderCreate {
        user_id: UserId(99),
        product_id: product_id.clone(),
        quantity: 1,
    });
    assert_eq!(unknown_user, Err(OrderError::InvalidUser("user_99".into())));

    let too_many = system.orders.place_order(OrderCreate {
        user_id: user_id.clone(),
        product_id: product_id.clone(),
        quantity: 2,
    });
    assert!(matches!(too_many, Err(OrderError::InsufficientStock(_))));

    let unknown_product = system.orders.place_order(OrderCreate {
        user_id: user_id.clone(),
        product_id: ProductId(42),
        quantity: 1,
    });
    assert_eq!(
        unknown_product,
        Err(OrderError::InvalidProduct("product_42".into()))
    );

    let zero = system.orders.place_order(OrderCreate {
        user_id,
        product_id,
        quantity: 0,
    });
    assert!(matches!(zero, Err(OrderError::ValidationError(_))));
}

#[test]
fn test_seeded_confirmations_are_reproducible() {
    let confirmation = || {
        let container = Container::with_options(ContainerOptions { rng_seed: Some(7) });
        let system = OrderSystem::start(container).unwrap();
        let user_id = alice(&system);
        let product_id = widget(&system, 5);
        system
            .orders
            .place_order(OrderCreate {
                user_id,
                product_id,
                quantity: 1,
            })
            .unwrap()
            .confirmation
    };
    assert_eq!(confirmation(), confirmation());
}

/// An inventory registered by the host before start-up takes precedence.
struct FixedInventory;

impl Inventory for FixedInventory {
    fn add_product(&self, _params: ProductCreate) -> Result<ProductId, OrderError> {
        Err(OrderError::ValidationError("catalogue is fixed".into()))
    }

    fn product(&self, id: &ProductId) -> Option<Product> {
        Some(Product {
            id: id.clone(),
            name: "Fixed".into(),
            price: 1.0,
            quantity: u32::MAX,
        })
    }

    fn reserve(&self, id: &ProductId, _quantity: u32) -> Result<Product, OrderError> {
        self.product(id).ok_or_else(|| OrderError::InvalidProduct(id.to_string()))
    }

    fn release(&self, _id: &ProductId, _quantity: u32) {}
}

impl Component for FixedInventory {
    fn bindings(b: &mut Bindings<Self>) {
        b.implement::<dyn Inventory>(|this| this);
    }
}

#[test]
fn test_host_inventory_wins_over_warehouse() {
    let capture = LogCapture::new();
    let container = Container::new();

    let system = capture
        .run(|| {
            container.register(Arc::new(FixedInventory));
            OrderSystem::start(container.clone())
        })
        .unwrap();

    assert!(capture.has_warning("multiple implementations"));
    let user_id = alice(&system);
    let order = system
        .orders
        .place_order(OrderCreate {
            user_id,
            product_id: ProductId(1),
            quantity: 3,
        })
        .unwrap();
    assert_eq!(order.total, 3.0);
    assert!(system.inventory.add_product(ProductCreate {
        name: "x".into(),
        price: 1.0,
        quantity: 1,
    })
    .is_err());
}

#[test]
fn test_every_bean_completes_start_up() {
    let container = Container::new();
    let system = OrderSystem::start(container).unwrap();

    for name in ["UserDirectory", "WarehouseInventory", "OrderService", "AuditLog"] {
        assert_eq!(
            system.container().bean_state(name),
            Some(BeanState::Complete),
            "{name}"
        );
    }
    assert_eq!(system.audit.entries(), vec!["audit log online".to_string()]);
}

#[test]
fn test_gateway_lookup_through_interface() {
    let container = Container::new();
    container.register(Arc::new(CardGateway::new(10.0)));
    let system = OrderSystem::start(container).unwrap();

    let gateway = system
        .container()
        .get_object_by_type::<dyn PaymentGateway>()
        .unwrap();
    assert!(gateway.charge(&UserId(1), 5.0).is_ok());
    assert!(gateway.charge(&UserId(1), 50.0).is_err());
}

#[test]
fn test_shutdown_frees_mutually_referencing_beans() {
    let container = Container::new();
    let system = OrderSystem::start(container.clone()).unwrap();
    let orders = Arc::downgrade(&system.orders);
    let audit = Arc::downgrade(&system.audit);

    // The container's references are gone, but the pair still holds each other.
    container.reset();
    assert!(container.is_empty());
    assert!(orders.upgrade().is_some());

    system.shutdown();
    assert!(orders.upgrade().is_none());
    assert!(audit.upgrade().is_none());
}
