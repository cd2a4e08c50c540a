use crate::base::BaseClient;
use crate::decode::OrBinary;
use crate::http::HttpResponse;
use crate::models::Order;
use crate::operation::{CREATE_ORDER, DELETE_ORDER, GET_ORDER};
use crate::options::RequestOptions;
use crate::param::Param;
use crate::params;
use crate::resources::with_optional_json;
use crate::transport::Dispatch;

#[derive(Debug)]
pub struct OrderClient<'a, D> {
    base: &'a BaseClient<D>,
}

impl<'a, D: Dispatch + 'a> OrderClient<'a, D> {
    pub(crate) fn new(base: &'a BaseClient<D>) -> Self {
        Self { base }
    }

    /// Delete purchase order by ID.
    ///
    /// `DELETE /store/order/{orderId}`
    pub fn delete(
        &self,
        order_id: i64,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, HttpResponse> {
        let order_id = order_id.to_string();
        self.base.request_with(|| {
            Ok(DELETE_ORDER
                .request(&[("orderId", order_id.as_str())])?
                .options(options))
        })
    }

    /// Find purchase order by ID.
    ///
    /// `GET /store/order/{orderId}`
    pub fn get(&self, order_id: i64, options: Option<RequestOptions>) -> D::Output<'a, OrBinary<Order>> {
        let order_id = order_id.to_string();
        self.base.request_with(|| {
            Ok(GET_ORDER
                .request(&[("orderId", order_id.as_str())])?
                .options(options))
        })
    }

    /// Place an order for a pet. The body is optional.
    ///
    /// `POST /store/order`
    pub fn create(
        &self,
        order: impl Into<Param<params::Order>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, Order> {
        let order = order.into();
        self.base.request_with(|| {
            let request = CREATE_ORDER.request(&[])?;
            Ok(with_optional_json::<params::Order, _, _>(request, &order)?.options(options))
        })
    }
}
