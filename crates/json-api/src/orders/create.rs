//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa::orders::{DeliveryType, OrderLine};
use mensa_app::domain::orders::models::NewOrder;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Order Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub menu_item: Uuid,
    pub name: String,

    /// Unit price as a decimal string
    pub price: String,

    pub quantity: u32,

    #[serde(default)]
    pub instructions: Option<String>,
}

impl OrderLineRequest {
    fn into_line(self) -> Result<OrderLine, StatusError> {
        Ok(OrderLine {
            menu_item: self.menu_item,
            name: self.name,
            price: self.price.as_str().into_money("lines.price")?,
            quantity: self.quantity,
            instructions: self.instructions,
        })
    }
}

/// Create Order Request
///
/// `lines` may be omitted; the order is then assembled from the server
/// cart. All money fields are decimal strings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// delivery or pickup
    #[salvo(schema(value_type = String))]
    pub delivery_type: DeliveryType,

    pub payment_method: String,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    pub phone: String,

    pub items_price: String,
    pub tax_price: String,
    pub delivery_price: String,
    pub discount: String,
    pub total_price: String,

    #[serde(default)]
    pub coupon_code: Option<String>,

    #[serde(default)]
    pub lines: Vec<OrderLineRequest>,
}

impl CreateOrderRequest {
    fn into_new_order(self) -> Result<NewOrder, StatusError> {
        let lines = self
            .lines
            .into_iter()
            .map(OrderLineRequest::into_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewOrder {
            delivery_type: self.delivery_type,
            payment_method: self.payment_method,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            phone: self.phone,
            items_price: self.items_price.as_str().into_money("items_price")?,
            tax_price: self.tax_price.as_str().into_money("tax_price")?,
            delivery_price: self.delivery_price.as_str().into_money("delivery_price")?,
            discount: self.discount.as_str().into_money("discount")?,
            total_price: self.total_price.as_str().into_money("total_price")?,
            coupon_code: self.coupon_code,
            lines,
        })
    }
}

/// Create Order Handler
///
/// Places an order for the authenticated user.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty order or bad payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .create_order(user.uuid, json.into_inner().into_new_order()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
