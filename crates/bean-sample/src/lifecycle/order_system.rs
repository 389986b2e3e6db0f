use crate::components::{AuditLog, Inventory, OrderService, UserDirectory, WarehouseInventory};
use crate::error::SystemError;
use bean_container::Container;
use std::sync::Arc;
use tracing::info;

/// The assembled order management system.
///
/// `OrderSystem` is responsible for:
/// - **Registration**: handing every service bean to the container
/// - **Wiring**: running the container's start-up pass once
/// - **Access**: exposing the wired services to the host
/// - **Teardown**: breaking the `OrderService`/`AuditLog` reference cycle
///
/// Dropping an `OrderSystem` (or resetting its container) leaves the
/// `OrderService` and `AuditLog` pair alive, since each holds an `Arc` to the
/// other. Call [`shutdown`](Self::shutdown) when the system is torn down
/// before the process exits, e.g. between tests.
///
/// # Example
///
/// ```
/// use bean_container::Container;
/// use bean_sample::lifecycle::OrderSystem;
/// use bean_sample::model::{OrderCreate, ProductCreate, UserCreate};
///
/// let system = OrderSystem::start(Container::new()).unwrap();
/// let user_id = system.users.create_user(UserCreate {
///     name: "Alice".into(),
///     email: "alice@example.com".into(),
/// }).unwrap();
/// let product_id = system.inventory.add_product(ProductCreate {
///     name: "Widget".into(),
///     price: 2.5,
///     quantity: 10,
/// }).unwrap();
///
/// let order = system.orders.place_order(OrderCreate { user_id, product_id, quantity: 4 }).unwrap();
/// assert_eq!(order.total, 10.0);
/// ```
pub struct OrderSystem {
    pub users: Arc<UserDirectory>,
    pub inventory: Arc<dyn Inventory>,
    pub orders: Arc<OrderService>,
    pub audit: Arc<AuditLog>,
    container: Container,
}

impl OrderSystem {
    /// Registers the core services into `container` and starts it.
    ///
    /// Beans the host registered beforehand take part in wiring: a
    /// [`PaymentGateway`](crate::components::PaymentGateway) enables charging,
    /// and an earlier [`Inventory`] wins over the warehouse default.
    pub fn start(container: Container) -> Result<Self, SystemError> {
        container.register(Arc::new(UserDirectory::new()));
        container.register(Arc::new(WarehouseInventory::new()));
        container.register(Arc::new(OrderService::new()));
        container.register(Arc::new(AuditLog::new()));

        container.start_up()?;

        let system = Self {
            users: lookup(&container, "UserDirectory")?,
            inventory: lookup(&container, "Inventory")?,
            orders: lookup(&container, "OrderService")?,
            audit: lookup(&container, "AuditLog")?,
            container,
        };
        info!(
            beans = system.container.len(),
            payments = system.orders.has_payments(),
            "Order system started"
        );
        Ok(system)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Unlinks the audit log from the order service and clears the container.
    pub fn shutdown(self) {
        self.audit.detach();
        self.container.reset();
        info!("Order system shut down");
    }
}

fn lookup<T>(container: &Container, what: &'static str) -> Result<Arc<T>, SystemError>
where
    T: ?Sized + Send + Sync + 'static,
{
    container
        .get_object_by_type::<T>()
        .ok_or(SystemError::MissingBean(what))
}
