//! Money and quantity arithmetic using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Monetary values round to 2 decimal
//! places, stock quantities to 3, both half-up.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places)
const MONEY_PLACES: u32 = 2;

/// Rounding for stock quantities (3 decimal places)
const STOCK_PLACES: u32 = 3;

fn round_dp(value: f64, places: u32) -> f64 {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary amount to 2 decimal places, half-up
pub fn round_money(value: f64) -> f64 {
    round_dp(value, MONEY_PLACES)
}

/// Round a stock quantity to 3 decimal places, half-up
pub fn round_stock(value: f64) -> f64 {
    round_dp(value, STOCK_PLACES)
}

/// Line subtotal: unit price × quantity, rounded to money precision
pub fn line_subtotal(unit_price: f64, quantity: i64) -> f64 {
    let price = Decimal::from_f64(unit_price).unwrap_or_default();
    let total = price * Decimal::from(quantity);
    total
        .round_dp_with_strategy(MONEY_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum of line subtotals over (unit price, quantity) pairs
pub fn order_total(lines: impl IntoIterator<Item = (f64, i64)>) -> f64 {
    let total = lines
        .into_iter()
        .map(|(price, qty)| Decimal::from_f64(price).unwrap_or_default() * Decimal::from(qty))
        .sum::<Decimal>();
    total
        .round_dp_with_strategy(MONEY_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Ingredient quantity needed: per-serving amount × servings, stock precision
pub fn needed_quantity(per_serving: f64, servings: i64) -> f64 {
    let per = Decimal::from_f64(per_serving).unwrap_or_default();
    let total = per * Decimal::from(servings);
    total
        .round_dp_with_strategy(STOCK_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.005), 10.01);
        assert_eq!(round_money(10.004), 10.0);
        assert_eq!(round_money(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_round_stock() {
        assert_eq!(round_stock(1.0005), 1.001);
        assert_eq!(round_stock(2.5), 2.5);
    }

    #[test]
    fn test_line_subtotal() {
        assert_eq!(line_subtotal(9.99, 3), 29.97);
        // f64 naive math would give 0.30000000000000004 here
        assert_eq!(line_subtotal(0.1, 3), 0.3);
    }

    #[test]
    fn test_order_total() {
        let total = order_total(vec![(9.99, 2), (4.5, 1), (0.1, 3)]);
        assert_eq!(total, 24.78);
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_needed_quantity() {
        assert_eq!(needed_quantity(0.25, 3), 0.75);
        assert_eq!(needed_quantity(1.5, 2), 3.0);
        // per-serving amounts keep 3 decimal places
        assert_eq!(needed_quantity(0.333, 3), 0.999);
    }
}
