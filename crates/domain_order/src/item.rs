//! Order line items

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, OrderItemId, ProductId, ProductUnitId};

use crate::error::OrderError;

/// A single line of an order
///
/// The line total is fixed at creation: `quantity × unit_price − discount`,
/// never negative. `conversion_factor` is captured from the catalog at
/// creation time so the base-unit quantity stays stable even if the
/// catalog changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Unique identifier
    pub id: OrderItemId,
    /// Product sold
    pub product_id: ProductId,
    /// Sale unit used
    pub product_unit_id: ProductUnitId,
    /// Quantity in the sale unit, positive
    pub quantity: Decimal,
    /// Base units per sale unit at order time
    pub conversion_factor: Decimal,
    /// Price per sale unit, non-negative
    pub unit_price: Money,
    /// Line discount, non-negative
    pub discount: Money,
    /// quantity × unit_price − discount
    pub line_total: Money,
}

impl OrderItem {
    /// Creates a validated line item
    ///
    /// # Errors
    ///
    /// - `Validation` if quantity or conversion factor is not positive
    /// - `Validation` if the unit price or discount is negative
    /// - `Validation` if the discount exceeds the line subtotal
    pub fn new(
        product_id: ProductId,
        product_unit_id: ProductUnitId,
        quantity: Decimal,
        conversion_factor: Decimal,
        unit_price: Money,
        discount: Money,
    ) -> Result<Self, OrderError> {
        if quantity <= dec!(0) {
            return Err(OrderError::validation(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        if conversion_factor <= dec!(0) {
            return Err(OrderError::validation(format!(
                "conversion factor must be positive, got {conversion_factor}"
            )));
        }
        if unit_price.is_negative() {
            return Err(OrderError::validation(format!(
                "unit price must not be negative, got {unit_price}"
            )));
        }
        if discount.is_negative() {
            return Err(OrderError::validation(format!(
                "discount must not be negative, got {discount}"
            )));
        }

        let subtotal = unit_price
            .checked_mul(quantity)
            .map_err(|e| OrderError::Calculation(e.to_string()))?;
        let line_total = subtotal
            .checked_sub(&discount)
            .map_err(|e| OrderError::Calculation(e.to_string()))?;
        if line_total.is_negative() {
            return Err(OrderError::validation(
                "discount exceeds the line subtotal".to_string(),
            ));
        }

        Ok(Self {
            id: OrderItemId::new_v7(),
            product_id,
            product_unit_id,
            quantity,
            conversion_factor,
            unit_price,
            discount,
            line_total,
        })
    }

    /// Quantity in base units, used for stock deduction
    pub fn base_quantity(&self) -> Decimal {
        self.quantity * self.conversion_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: Decimal, price: Decimal, discount: Decimal) -> Result<OrderItem, OrderError> {
        OrderItem::new(
            ProductId::new(),
            ProductUnitId::new(),
            qty,
            dec!(1),
            Money::vnd(price),
            Money::vnd(discount),
        )
    }

    #[test]
    fn test_line_total_with_discount() {
        let i = item(dec!(5), dec!(85000), dec!(5000)).unwrap();
        assert_eq!(i.line_total, Money::vnd(dec!(420000)));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(item(dec!(0), dec!(1000), dec!(0)).is_err());
        assert!(item(dec!(-2), dec!(1000), dec!(0)).is_err());
    }

    #[test]
    fn test_discount_beyond_subtotal_rejected() {
        assert!(item(dec!(1), dec!(1000), dec!(2000)).is_err());
    }

    #[test]
    fn test_base_quantity_uses_conversion() {
        let i = OrderItem::new(
            ProductId::new(),
            ProductUnitId::new(),
            dec!(2),
            dec!(24),
            Money::vnd(dec!(240000)),
            Money::zero(core_kernel::Currency::VND),
        )
        .unwrap();
        assert_eq!(i.base_quantity(), dec!(48));
    }
}
