use crate::error::OrderError;
use crate::model::{Product, ProductCreate, ProductId};
use bean_container::{Bindings, Component, Defaulted, Fields, ProvideAfter};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info, warn};

/// Stock keeping, consumed by [`OrderService`](super::OrderService) as `dyn Inventory`.
pub trait Inventory: Send + Sync {
    fn add_product(&self, params: ProductCreate) -> Result<ProductId, OrderError>;

    fn product(&self, id: &ProductId) -> Option<Product>;

    /// Takes `quantity` units out of stock and returns the product as it was
    /// before the reservation.
    fn reserve(&self, id: &ProductId, quantity: u32) -> Result<Product, OrderError>;

    /// Puts previously reserved units back.
    fn release(&self, id: &ProductId, quantity: u32);
}

/// The default [`Inventory`]: a map of products behind the container-seeded field.
pub struct WarehouseInventory {
    products: Defaulted<HashMap<ProductId, Product>>,
    next_id: AtomicU32,
}

impl WarehouseInventory {
    pub fn new() -> Self {
        Self {
            products: Defaulted::unset(),
            next_id: AtomicU32::new(0),
        }
    }
}

impl Default for WarehouseInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory for WarehouseInventory {
    fn add_product(&self, params: ProductCreate) -> Result<ProductId, OrderError> {
        debug!(?params, "add_product called");
        if params.price < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "negative price for {}",
                params.name
            )));
        }

        let id = ProductId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let product = Product::new(id.clone(), params);
        let size = self
            .products
            .with_mut(|products| {
                products.insert(id.clone(), product);
                products.len()
            })
            .ok_or(OrderError::NotWired("WarehouseInventory.products"))?;
        info!(product_id = %id, size, "Created");
        Ok(id)
    }

    fn product(&self, id: &ProductId) -> Option<Product> {
        self.products
            .with(|products| products.get(id).cloned())
            .flatten()
    }

    fn reserve(&self, id: &ProductId, quantity: u32) -> Result<Product, OrderError> {
        self.products
            .with_mut(|products| {
                let product = products
                    .get_mut(id)
                    .ok_or_else(|| OrderError::InvalidProduct(id.to_string()))?;
                if product.quantity < quantity {
                    return Err(OrderError::InsufficientStock(format!(
                        "{id}: requested {quantity}, available {}",
                        product.quantity
                    )));
                }
                let before = product.clone();
                product.quantity -= quantity;
                Ok(before)
            })
            .ok_or(OrderError::NotWired("WarehouseInventory.products"))?
    }

    fn release(&self, id: &ProductId, quantity: u32) {
        let released = self.products.with_mut(|products| match products.get_mut(id) {
            Some(product) => {
                product.quantity += quantity;
                true
            }
            None => false,
        });
        if released != Some(true) {
            warn!(product_id = %id, quantity, "Release for unknown product ignored");
        }
    }
}

impl Component for WarehouseInventory {
    fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
        fields.value("products", &self.products);
    }

    fn bindings(b: &mut Bindings<Self>) {
        b.implement::<dyn Inventory>(|this| this).on_provide_after();
    }
}

impl ProvideAfter for WarehouseInventory {
    fn on_provide_after(&self) {
        info!(
            products_ready = self.products.is_set(),
            "Warehouse inventory registered"
        );
    }
}
