use crate::base::BaseClient;
use crate::models::StoreInventory;
use crate::operation::LIST_INVENTORY;
use crate::options::RequestOptions;
use crate::transport::Dispatch;

#[derive(Debug)]
pub struct InventoryClient<'a, D> {
    base: &'a BaseClient<D>,
}

impl<'a, D: Dispatch + 'a> InventoryClient<'a, D> {
    pub(crate) fn new(base: &'a BaseClient<D>) -> Self {
        Self { base }
    }

    /// Pet counts keyed by status.
    ///
    /// `GET /store/inventory`. Keys are whatever statuses the server reports,
    /// not only the ones [`PetStatus`](crate::models::PetStatus) knows.
    pub fn list(&self, options: Option<RequestOptions>) -> D::Output<'a, StoreInventory> {
        self.base
            .request_with(|| Ok(LIST_INVENTORY.request(&[])?.options(options)))
    }
}
