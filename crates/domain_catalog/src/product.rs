//! Product and ProductUnit definitions
//!
//! A product may be sold in several units (bag, kg, box). Each unit carries
//! a conversion factor to the product's canonical base unit; all stock is
//! tracked in base units.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, ProductId, ProductUnitId, StoreId};

use crate::error::CatalogError;

/// A sellable product in a store's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Owning store
    pub store_id: StoreId,
    /// Product name
    pub name: String,
    /// Stock-keeping unit code
    pub sku: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Whether the product is sellable
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new active product
    pub fn new(store_id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new_v7(),
            store_id,
            name: name.into(),
            sku: None,
            category: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Sets the SKU code
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Sets the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A sale unit of a product, e.g. "bao" (bag) or "kg"
///
/// `conversion_factor` expresses how many base units one sale unit holds:
/// a crate of 24 cans has factor 24 when the base unit is the can.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUnit {
    /// Unique identifier
    pub id: ProductUnitId,
    /// Owning product
    pub product_id: ProductId,
    /// Unit display name
    pub unit_name: String,
    /// Sale price per unit
    pub price: Money,
    /// Purchase cost per unit, if known
    pub cost_price: Option<Money>,
    /// Base units per sale unit, must be positive
    pub conversion_factor: Decimal,
    /// Whether this is the product's default unit
    pub is_default: bool,
    /// Whether the unit is currently sellable
    pub is_active: bool,
}

impl ProductUnit {
    /// Creates a new unit
    ///
    /// # Errors
    ///
    /// Returns error if the conversion factor is not positive
    pub fn new(
        product_id: ProductId,
        unit_name: impl Into<String>,
        price: Money,
        conversion_factor: Decimal,
    ) -> Result<Self, CatalogError> {
        if conversion_factor <= dec!(0) {
            return Err(CatalogError::Validation(format!(
                "conversion factor must be positive, got {conversion_factor}"
            )));
        }

        Ok(Self {
            id: ProductUnitId::new_v7(),
            product_id,
            unit_name: unit_name.into(),
            price,
            cost_price: None,
            conversion_factor,
            is_default: false,
            is_active: true,
        })
    }

    /// Marks this unit as the product default
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Sets the purchase cost price
    pub fn with_cost_price(mut self, cost: Money) -> Self {
        self.cost_price = Some(cost);
        self
    }

    /// Converts a quantity in this unit to base units
    pub fn to_base_quantity(&self, quantity: Decimal) -> Decimal {
        quantity * self.conversion_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    #[test]
    fn test_unit_rejects_non_positive_factor() {
        let product = Product::new(StoreId::new(), "Coca 330ml");
        let price = Money::new(dec!(10000), Currency::VND);
        assert!(ProductUnit::new(product.id, "thung", price, dec!(0)).is_err());
        assert!(ProductUnit::new(product.id, "thung", price, dec!(-1)).is_err());
    }

    #[test]
    fn test_base_quantity_conversion() {
        let product = Product::new(StoreId::new(), "Coca 330ml");
        let unit = ProductUnit::new(
            product.id,
            "thung",
            Money::vnd(dec!(240000)),
            dec!(24),
        )
        .unwrap();

        assert_eq!(unit.to_base_quantity(dec!(2)), dec!(48));
    }
}
