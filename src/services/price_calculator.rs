use serde::{Deserialize, Serialize};

use crate::models::{coupon::Coupon, item::Item};

/// Subtotal, discount and final total of a calculation, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// Stateless price rules. Holds nothing, reads nothing global, never fails.
pub struct PriceCalculator;

impl PriceCalculator {
    /// Final payable price for `items`, reduced by `coupon` if present.
    ///
    /// The discount is floored: 12.5 units of discount become 12.
    pub fn calculate_final_price(items: &[Item], coupon: Option<&Coupon>) -> u64 {
        Self::breakdown(items, coupon).total
    }

    pub fn breakdown(items: &[Item], coupon: Option<&Coupon>) -> PriceBreakdown {
        let subtotal = Self::subtotal(items);
        let discount = coupon.map_or(0, |c| Self::discount(subtotal, c));

        PriceBreakdown {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    /// Sum of item costs; saturates instead of overflowing.
    pub fn subtotal(items: &[Item]) -> u64 {
        items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.cost))
    }

    /// `floor(subtotal * pct / 100)`, never more than `subtotal`.
    ///
    /// Whole percentages are computed in `u128` and are exact for every
    /// subtotal. Fractional percentages go through `f64`, which is exact only
    /// while `subtotal * pct` stays below 2^53.
    pub fn discount(subtotal: u64, coupon: &Coupon) -> u64 {
        let pct = coupon.discount_percentage();
        if pct.fract() == 0.0 {
            // pct is a whole number in [0, 100], so the product fits in u128
            let exact = subtotal as u128 * pct as u128 / 100;
            return exact as u64;
        }

        let raw = (subtotal as f64 * pct / 100.0).floor();
        // past 2^53 the float can land beyond subtotal
        (raw as u64).min(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(costs: &[u64]) -> Vec<Item> {
        costs.iter().map(|&cost| Item::with_cost(cost)).collect()
    }

    fn coupon(pct: f64) -> Coupon {
        Coupon::percentage(pct).unwrap()
    }

    #[test]
    fn test_no_coupon_returns_subtotal() {
        let cart = items(&[250, 150, 100]);
        assert_eq!(PriceCalculator::calculate_final_price(&cart, None), 500);
    }

    #[test]
    fn test_ten_percent_coupon() {
        let cart = items(&[250, 150, 100]);
        let c = coupon(10.0);
        assert_eq!(PriceCalculator::calculate_final_price(&cart, Some(&c)), 450);
    }

    #[test]
    fn test_empty_items_with_coupon() {
        let c = coupon(50.0);
        assert_eq!(PriceCalculator::calculate_final_price(&[], Some(&c)), 0);
        assert_eq!(PriceCalculator::calculate_final_price(&[], None), 0);
    }

    #[test]
    fn test_half_discount_truncates() {
        let cart = items(&[99]);
        let c = coupon(50.0);
        let breakdown = PriceCalculator::breakdown(&cart, Some(&c));
        assert_eq!(breakdown.discount, 49);
        assert_eq!(breakdown.total, 50);
    }

    #[test]
    fn test_thirty_three_percent_of_hundred() {
        let cart = items(&[60, 40]);
        let c = coupon(33.0);
        let breakdown = PriceCalculator::breakdown(&cart, Some(&c));
        assert_eq!(
            breakdown,
            PriceBreakdown {
                subtotal: 100,
                discount: 33,
                total: 67
            }
        );
    }

    #[test]
    fn test_twelve_and_a_half_floors_to_twelve() {
        let cart = items(&[25]);
        let c = coupon(50.0);
        assert_eq!(PriceCalculator::discount(25, &c), 12);
        assert_eq!(PriceCalculator::calculate_final_price(&cart, Some(&c)), 13);
    }

    #[test]
    fn test_zero_and_full_discount() {
        let cart = items(&[1, 2, 3]);
        assert_eq!(PriceCalculator::calculate_final_price(&cart, Some(&coupon(0.0))), 6);
        assert_eq!(PriceCalculator::calculate_final_price(&cart, Some(&coupon(100.0))), 0);
    }

    #[test]
    fn test_subtotal_saturates() {
        let cart = items(&[u64::MAX, 1]);
        assert_eq!(PriceCalculator::subtotal(&cart), u64::MAX);
        assert_eq!(
            PriceCalculator::calculate_final_price(&cart, Some(&coupon(100.0))),
            0
        );
    }

    #[test]
    fn test_whole_percentages_exact_for_large_subtotals() {
        let subtotal = 1u64 << 52;
        let breakdown = PriceCalculator::breakdown(&items(&[subtotal]), Some(&coupon(26.0)));
        assert_eq!(breakdown.discount, 1_170_935_903_116_328);
        assert_eq!(breakdown.total, 3_332_663_724_254_168);

        assert_eq!(
            PriceCalculator::discount(u64::MAX, &coupon(50.0)),
            9_223_372_036_854_775_807
        );
        assert_eq!(PriceCalculator::discount(u64::MAX, &coupon(100.0)), u64::MAX);
    }

    #[test]
    fn test_fractional_percentage_floors() {
        assert_eq!(PriceCalculator::discount(100, &coupon(12.5)), 12);
        assert_eq!(PriceCalculator::discount(1000, &coupon(2.5)), 25);
    }

    #[test]
    fn test_does_not_mutate_inputs() {
        let cart = items(&[10, 20]);
        let snapshot = cart.clone();
        let c = coupon(25.0);
        let first = PriceCalculator::calculate_final_price(&cart, Some(&c));
        let second = PriceCalculator::calculate_final_price(&cart, Some(&c));
        assert_eq!(first, second);
        assert_eq!(cart, snapshot);
    }
}
