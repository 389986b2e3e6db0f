use super::{AuditLog, Inventory, PaymentGateway, UserDirectory};
use crate::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use bean_container::{
    Autowired, Bindings, Component, Defaulted, Fields, InjectAfter, InjectComplete,
};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Places orders against the user directory and the inventory.
///
/// Every wiring mode appears here once:
///
/// - `users`: mandatory, concrete, resolved through the `"UserDirectory"` name
/// - `inventory`: mandatory, first registered `dyn Inventory`
/// - `payments`: optional `dyn PaymentGateway`
/// - `audit`: the bean named `"AuditLog"`
pub struct OrderService {
    users: Autowired<UserDirectory>,
    inventory: Autowired<dyn Inventory>,
    payments: Autowired<dyn PaymentGateway>,
    audit: Autowired<AuditLog>,
    orders: Defaulted<BTreeMap<OrderId, Order>>,
    rng: Defaulted<StdRng>,
    next_id: AtomicU32,
    ready: AtomicBool,
}

impl OrderService {
    pub fn new() -> Self {
        Self {
            users: Autowired::concrete(),
            inventory: Autowired::interface(),
            payments: Autowired::interface(),
            audit: Autowired::concrete(),
            orders: Defaulted::unset(),
            rng: Defaulted::unset(),
            next_id: AtomicU32::new(0),
            ready: AtomicBool::new(false),
        }
    }

    /// Validates the user, reserves stock, charges if a gateway is wired and
    /// stores the order.
    pub fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "place_order called");
        if params.quantity == 0 {
            return Err(OrderError::ValidationError("quantity must be positive".into()));
        }

        let users = self.users.get().ok_or(OrderError::NotWired("users"))?;
        let inventory = self.inventory.get().ok_or(OrderError::NotWired("inventory"))?;

        if users.get(&params.user_id).is_none() {
            return Err(OrderError::InvalidUser(params.user_id.to_string()));
        }
        let product = inventory.reserve(&params.product_id, params.quantity)?;
        let total = product.price * f64::from(params.quantity);

        let status = match self.payments.get() {
            Some(gateway) => match gateway.charge(&params.user_id, total) {
                Ok(_txn) => OrderStatus::Paid,
                Err(e) => {
                    inventory.release(&params.product_id, params.quantity);
                    return Err(e);
                }
            },
            None => OrderStatus::AwaitingPayment,
        };

        let id = OrderId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let confirmation = self
            .rng
            .with_mut(|rng| format!("{:06}", rng.gen_range(0..1_000_000u32)))
            .ok_or(OrderError::NotWired("OrderService.rng"))?;
        let order = Order {
            id: id.clone(),
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
            total,
            status,
            confirmation,
        };

        let size = self
            .orders
            .with_mut(|orders| {
                orders.insert(id.clone(), order.clone());
                orders.len()
            })
            .ok_or(OrderError::NotWired("OrderService.orders"))?;

        if let Some(audit) = self.audit.get() {
            audit.record(format!(
                "{id} placed by {} for {} x {} ({status:?})",
                order.user_id, order.quantity, order.product_id
            ));
        }
        info!(order_id = %id, total, ?status, size, "Created");
        Ok(order)
    }

    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.orders.with(|orders| orders.get(id).cloned()).flatten()
    }

    /// All orders, by id.
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .with(|orders| orders.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn order_count(&self) -> usize {
        self.orders.with(BTreeMap::len).unwrap_or(0)
    }

    pub fn has_payments(&self) -> bool {
        self.payments.get().is_some()
    }

    pub fn audit_log(&self) -> Option<Arc<AuditLog>> {
        self.audit.get()
    }

    /// Whether both mandatory dependencies were wired by the last start-up.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for OrderService {
    fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
        fields
            .autowire("users", "true", &self.users)
            .autowire("inventory", "true", &self.inventory)
            .inject("payments", "false", &self.payments)
            .autowire("audit", "AuditLog", &self.audit)
            .value("orders", &self.orders)
            .value("rng", &self.rng);
    }

    fn bindings(b: &mut Bindings<Self>) {
        b.on_inject_after().on_inject_complete();
    }
}

impl InjectAfter for OrderService {
    fn on_inject_after(&self) {
        info!(
            users = self.users.get().is_some(),
            inventory = self.inventory.get().is_some(),
            payments = self.payments.get().is_some(),
            "OrderService wired"
        );
    }
}

impl InjectComplete for OrderService {
    fn on_inject_complete(&self) {
        let ready = self.users.get().is_some() && self.inventory.get().is_some();
        self.ready.store(ready, Ordering::Release);
        if !ready {
            error!("OrderService is missing a mandatory dependency");
        } else if !self.has_payments() {
            warn!("No payment gateway wired, orders will await payment");
        }
    }
}
