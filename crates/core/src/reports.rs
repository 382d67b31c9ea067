//! Sales report aggregation

use std::collections::BTreeMap;

use decimal_percentage::Percentage;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orders::OrderLine;

/// Share of item revenue treated as ingredient/preparation cost.
#[must_use]
pub fn cost_rate() -> Percentage {
    Percentage::from(Decimal::new(5, 1))
}

/// A completed order, reduced to what the report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOrder {
    /// Grand total charged.
    pub total_price: Decimal,

    /// When the order was placed.
    pub placed_at: Timestamp,
}

/// Per-day sales figures. Days are UTC calendar dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    /// UTC date.
    pub date: Date,

    /// Completed orders that day.
    pub orders: u64,

    /// Sum of order totals that day.
    pub revenue: Decimal,

    /// Revenue minus the estimated cost share.
    pub profit: Decimal,
}

/// Aggregated sales for one menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSales {
    /// Menu item identifier.
    pub menu_item: Uuid,

    /// Item name snapshot.
    pub name: String,

    /// Units sold.
    pub quantity_sold: u64,

    /// Line revenue (unit price x quantity).
    pub revenue: Decimal,
}

/// The sales report body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Completed orders in range.
    pub total_orders: u64,

    /// Sum of completed order totals.
    pub total_revenue: Decimal,

    /// Estimated cost: half of line revenue across all order items.
    pub total_cost: Decimal,

    /// Revenue minus cost.
    pub total_profit: Decimal,

    /// Per-day breakdown, ascending by date.
    pub daily: Vec<DailySales>,

    /// Top five items by units sold.
    pub top_items: Vec<ItemSales>,
}

/// Aggregate completed orders and their lines into a sales summary.
///
/// Callers are expected to pass only completed orders inside the report
/// range; this function does no filtering of its own.
#[must_use]
pub fn sales_summary(orders: &[CompletedOrder], lines: &[OrderLine]) -> SalesSummary {
    let total_orders = u64::try_from(orders.len()).unwrap_or(u64::MAX);
    let total_revenue: Decimal = orders.iter().map(|order| order.total_price).sum();

    let line_revenue: Decimal = lines
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum();

    let total_cost = round_money(cost_rate() * line_revenue);
    let total_profit = total_revenue - total_cost;

    let mut by_day: BTreeMap<Date, (u64, Decimal)> = BTreeMap::new();

    for order in orders {
        let date = order.placed_at.to_zoned(TimeZone::UTC).date();
        let entry = by_day.entry(date).or_insert((0, Decimal::ZERO));

        entry.0 += 1;
        entry.1 += order.total_price;
    }

    let daily = by_day
        .into_iter()
        .map(|(date, (orders, revenue))| DailySales {
            date,
            orders,
            revenue,
            profit: round_money(revenue - cost_rate() * revenue),
        })
        .collect();

    let mut by_item: BTreeMap<Uuid, ItemSales> = BTreeMap::new();

    for line in lines {
        let entry = by_item.entry(line.menu_item).or_insert_with(|| ItemSales {
            menu_item: line.menu_item,
            name: line.name.clone(),
            quantity_sold: 0,
            revenue: Decimal::ZERO,
        });

        entry.quantity_sold += u64::from(line.quantity);
        entry.revenue += line.price * Decimal::from(line.quantity);
    }

    let mut top_items: Vec<ItemSales> = by_item.into_values().collect();

    top_items.sort_by(|a, b| {
        b.quantity_sold
            .cmp(&a.quantity_sold)
            .then_with(|| a.name.cmp(&b.name))
    });
    top_items.truncate(5);

    SalesSummary {
        total_orders,
        total_revenue,
        total_cost,
        total_profit,
        daily,
        top_items,
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn order(total: Decimal, placed_at: Timestamp) -> CompletedOrder {
        CompletedOrder {
            total_price: total,
            placed_at,
        }
    }

    fn sold(menu_item: u128, name: &str, price: Decimal, quantity: u32) -> OrderLine {
        OrderLine {
            menu_item: Uuid::from_u128(menu_item),
            name: name.to_string(),
            price,
            quantity,
            instructions: None,
        }
    }

    #[test]
    fn single_completed_order_produces_one_daily_entry() {
        let orders = [order(Decimal::new(610, 0), Timestamp::UNIX_EPOCH)];
        let lines = [sold(1, "Classic Burger", Decimal::new(200, 0), 3)];

        let summary = sales_summary(&orders, &lines);

        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.total_revenue, Decimal::new(610, 0));
        assert_eq!(summary.daily.len(), 1);
        assert_eq!(
            summary.daily.first().map(|day| (day.orders, day.revenue)),
            Some((1, Decimal::new(610, 0)))
        );
    }

    #[test]
    fn cost_is_half_of_line_revenue() {
        let orders = [order(Decimal::new(610, 0), Timestamp::UNIX_EPOCH)];
        let lines = [sold(1, "Classic Burger", Decimal::new(200, 0), 3)];

        let summary = sales_summary(&orders, &lines);

        assert_eq!(summary.total_cost, Decimal::new(300, 0));
        assert_eq!(summary.total_profit, Decimal::new(310, 0));
    }

    #[test]
    fn orders_group_by_utc_date() {
        let day = SignedDuration::from_hours(24);
        let orders = [
            order(Decimal::new(100, 0), Timestamp::UNIX_EPOCH),
            order(Decimal::new(150, 0), Timestamp::UNIX_EPOCH.saturating_add(day).unwrap_or(Timestamp::MAX)),
            order(
                Decimal::new(50, 0),
                Timestamp::UNIX_EPOCH.saturating_add(SignedDuration::from_hours(2)).unwrap_or(Timestamp::MAX),
            ),
        ];

        let summary = sales_summary(&orders, &[]);

        assert_eq!(summary.daily.len(), 2);
        assert_eq!(
            summary.daily.first().map(|d| (d.orders, d.revenue)),
            Some((2, Decimal::new(150, 0)))
        );
    }

    #[test]
    fn top_items_rank_by_quantity_and_cap_at_five() {
        let lines: Vec<OrderLine> = (1..=6)
            .map(|n| {
                sold(
                    n,
                    &format!("Item {n}"),
                    Decimal::new(100, 0),
                    u32::try_from(n).unwrap_or(1),
                )
            })
            .collect();

        let summary = sales_summary(&[], &lines);

        assert_eq!(summary.top_items.len(), 5);
        assert_eq!(
            summary.top_items.first().map(|item| item.quantity_sold),
            Some(6)
        );
    }

    #[test]
    fn repeated_lines_for_an_item_accumulate() {
        let lines = [
            sold(1, "Margherita", Decimal::new(400, 0), 1),
            sold(1, "Margherita", Decimal::new(400, 0), 2),
        ];

        let summary = sales_summary(&[], &lines);

        assert_eq!(summary.top_items.len(), 1);
        assert_eq!(
            summary
                .top_items
                .first()
                .map(|item| (item.quantity_sold, item.revenue)),
            Some((3, Decimal::new(1200, 0)))
        );
    }
}
