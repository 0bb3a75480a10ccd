//! Cart pricing: line subtotals, cart totals and the quantity floor.
//!
//! All arithmetic is done in [`Decimal`] at full precision. Rounding to
//! cents happens only when a value is formatted for display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CartItem, OrderItem};

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: u32 = 1;

/// Anything that carries a unit price and a quantity.
pub trait LineItem {
    /// Unit price; `None` is priced at zero.
    fn unit_price(&self) -> Option<Decimal>;
    fn quantity(&self) -> u32;
}

impl LineItem for CartItem {
    fn unit_price(&self) -> Option<Decimal> {
        self.product_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl LineItem for OrderItem {
    fn unit_price(&self) -> Option<Decimal> {
        Some(self.price)
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Unit price times quantity, with an absent price counted as zero.
pub fn line_subtotal<T: LineItem + ?Sized>(item: &T) -> Decimal {
    item.unit_price().unwrap_or(Decimal::ZERO) * Decimal::from(item.quantity())
}

/// Sum of [`line_subtotal`] over `items`; zero for an empty slice.
pub fn cart_total<T: LineItem>(items: &[T]) -> Decimal {
    items.iter().map(line_subtotal).sum()
}

/// Like [`cart_total`] but for a cart that may not have loaded yet.
pub fn cart_total_opt<T: LineItem>(items: Option<&[T]>) -> Decimal {
    items.map_or(Decimal::ZERO, cart_total)
}

/// Floors a requested quantity at [`MIN_QUANTITY`].
pub fn clamp_quantity(requested: i64) -> u32 {
    u32::try_from(requested.max(i64::from(MIN_QUANTITY))).unwrap_or(u32::MAX)
}

/// Quantity after a decrement, or `None` when already at the floor.
///
/// A `None` means no update request should be issued.
pub fn decrement(quantity: u32) -> Option<u32> {
    let next = clamp_quantity(i64::from(quantity) - 1);
    (next < quantity).then_some(next)
}

/// Quantity after an increment, also repairing a quantity below the floor.
pub fn increment(quantity: u32) -> u32 {
    clamp_quantity(i64::from(quantity) + 1)
}

/// Rounds an amount to cents, half away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars with two decimals, e.g. `$149.97`.
pub fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", round_for_display(amount))
}
