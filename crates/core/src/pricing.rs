//! Price breakdown arithmetic

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    cart::{AppliedCoupon, CartLine},
    orders::DeliveryType,
};

/// Tax rate applied to the items subtotal, in percent points.
#[must_use]
pub fn tax_percent() -> Decimal {
    Decimal::new(5, 0)
}

/// Flat delivery fee charged for delivery orders.
#[must_use]
pub fn delivery_fee() -> Decimal {
    Decimal::new(5, 0)
}

/// An itemized order total.
///
/// All figures are rounded to two decimal places with midpoint rounding
/// away from zero.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceBreakdown {
    /// Sum of unit price x quantity over all lines.
    pub items: Decimal,

    /// Tax on the items subtotal.
    pub tax: Decimal,

    /// Delivery fee (zero for pickup).
    pub delivery: Decimal,

    /// Coupon discount on the pre-tax items subtotal.
    pub discount: Decimal,

    /// items + tax + delivery - discount.
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Compute the breakdown for a set of cart lines.
    ///
    /// The discount is a percentage of the pre-tax items subtotal; tax is
    /// charged on the undiscounted subtotal. An empty cart prices to zero
    /// across the board, including the delivery fee.
    #[must_use]
    pub fn compute(
        lines: &[CartLine],
        delivery_type: DeliveryType,
        coupon: Option<&AppliedCoupon>,
    ) -> Self {
        if lines.is_empty() {
            return Self {
                items: Decimal::ZERO,
                tax: Decimal::ZERO,
                delivery: Decimal::ZERO,
                discount: Decimal::ZERO,
                total: Decimal::ZERO,
            };
        }

        let items: Decimal = lines
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();

        let tax = round_money(Percentage::from(tax_percent() / Decimal::ONE_HUNDRED) * items);

        let delivery = match delivery_type {
            DeliveryType::Delivery => delivery_fee(),
            DeliveryType::Pickup => Decimal::ZERO,
        };

        let discount = coupon.map_or(Decimal::ZERO, |coupon| {
            round_money(
                Percentage::from(coupon.discount_percent / Decimal::ONE_HUNDRED) * items,
            )
        });

        let total = round_money(items + tax + delivery - discount);

        Self {
            items: round_money(items),
            tax,
            delivery,
            discount,
            total,
        }
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
