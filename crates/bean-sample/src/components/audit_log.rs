use super::OrderService;
use bean_container::{Autowired, Bindings, Component, Defaulted, Fields, InjectComplete};
use tracing::{debug, info};

/// Append-only record of what the order system did.
///
/// Holds a by-name reference back to the [`OrderService`], which in turn
/// references this log by name. The two keep each other alive until
/// [`detach`](Self::detach) drops the back-reference.
pub struct AuditLog {
    orders: Autowired<OrderService>,
    entries: Defaulted<Vec<String>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            orders: Autowired::concrete(),
            entries: Defaulted::unset(),
        }
    }

    pub fn record(&self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(%entry, "Audit entry");
        self.entries.with_mut(|entries| entries.push(entry));
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.with(Vec::clone).unwrap_or_default()
    }

    /// The service this log audits, once wired.
    pub fn order_service(&self) -> Option<std::sync::Arc<OrderService>> {
        self.orders.get()
    }

    /// Drops the back-reference to the audited service.
    pub fn detach(&self) {
        if self.orders.take().is_some() {
            debug!("Audit log detached from order service");
        }
    }

    /// Orders currently held by the audited service.
    pub fn orders_seen(&self) -> usize {
        self.orders
            .get()
            .map(|service| service.order_count())
            .unwrap_or(0)
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AuditLog {
    fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
        fields
            .autowire("orders", "OrderService", &self.orders)
            .value("entries", &self.entries);
    }

    fn bindings(b: &mut Bindings<Self>) {
        b.on_inject_complete();
    }
}

impl InjectComplete for AuditLog {
    fn on_inject_complete(&self) {
        self.record("audit log online");
        info!(linked = self.orders.get().is_some(), "Audit log ready");
    }
}
