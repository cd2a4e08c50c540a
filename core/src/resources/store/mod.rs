//! Operations under `/store`, split into orders and inventory.

mod inventory;
mod order;

pub use inventory::InventoryClient;
pub use order::OrderClient;

use crate::base::BaseClient;
use crate::transport::Dispatch;

#[derive(Debug)]
pub struct StoreClient<'a, D> {
    base: &'a BaseClient<D>,
}

impl<'a, D: Dispatch + 'a> StoreClient<'a, D> {
    pub(crate) fn new(base: &'a BaseClient<D>) -> Self {
        Self { base }
    }

    pub fn order(&self) -> OrderClient<'a, D> {
        OrderClient::new(self.base)
    }

    pub fn inventory(&self) -> InventoryClient<'a, D> {
        InventoryClient::new(self.base)
    }
}
