use crate::error::OrderError;
use crate::model::UserId;
use bean_container::{Bindings, Component, Defaulted, Fields};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{info, warn};

/// Charges customers. Optional: without a gateway, orders await payment.
pub trait PaymentGateway: Send + Sync {
    /// Charges `amount` and returns a transaction reference.
    fn charge(&self, user: &UserId, amount: f64) -> Result<String, OrderError>;
}

/// Card gateway that declines any single charge above `limit`.
pub struct CardGateway {
    limit: f64,
    rng: Defaulted<StdRng>,
}

impl CardGateway {
    pub fn new(limit: f64) -> Self {
        Self {
            limit,
            rng: Defaulted::unset(),
        }
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }
}

impl PaymentGateway for CardGateway {
    fn charge(&self, user: &UserId, amount: f64) -> Result<String, OrderError> {
        if amount > self.limit {
            warn!(user_id = %user, amount, limit = self.limit, "Charge declined");
            return Err(OrderError::PaymentDeclined(format!(
                "{amount:.2} exceeds limit {:.2}",
                self.limit
            )));
        }
        let txn = self
            .rng
            .with_mut(|rng| format!("txn-{:08x}", rng.gen::<u32>()))
            .ok_or(OrderError::NotWired("CardGateway.rng"))?;
        info!(user_id = %user, amount, %txn, "Charged");
        Ok(txn)
    }
}

impl Component for CardGateway {
    fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
        fields.value("rng", &self.rng);
    }

    fn bindings(b: &mut Bindings<Self>) {
        b.implement::<dyn PaymentGateway>(|this| this);
    }
}
