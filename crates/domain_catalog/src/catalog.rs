//! Per-store catalog lookups
//!
//! The catalog is the membership authority for order validation: every
//! order item must reference an active unit of a product in the same
//! store's catalog.

use std::collections::HashMap;

use core_kernel::{ProductId, ProductUnitId, StoreId};

use crate::error::CatalogError;
use crate::product::{Product, ProductUnit};

/// In-memory catalog of products and units, indexed by identifier
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    units: HashMap<ProductUnitId, ProductUnit>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product
    pub fn add_product(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Adds a unit
    ///
    /// # Errors
    ///
    /// Returns error if the owning product is not in the catalog
    pub fn add_unit(&mut self, unit: ProductUnit) -> Result<(), CatalogError> {
        if !self.products.contains_key(&unit.product_id) {
            return Err(CatalogError::ProductNotFound(unit.product_id.to_string()));
        }
        self.units.insert(unit.id, unit);
        Ok(())
    }

    /// Gets a product by ID
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Gets a unit by ID
    pub fn unit(&self, id: ProductUnitId) -> Option<&ProductUnit> {
        self.units.get(&id)
    }

    /// Iterates over all products
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Resolves a unit for ordering within a store
    ///
    /// Verifies the unit exists, is active, and belongs to an active product
    /// of the given store, and returns the unit with its product.
    ///
    /// # Errors
    ///
    /// - `UnitNotFound` if the unit is unknown
    /// - `UnitInactive` if the unit or its product is deactivated
    /// - `WrongStore` if the product belongs to another store
    pub fn resolve_unit(
        &self,
        store_id: StoreId,
        unit_id: ProductUnitId,
    ) -> Result<(&Product, &ProductUnit), CatalogError> {
        let unit = self
            .units
            .get(&unit_id)
            .ok_or_else(|| CatalogError::UnitNotFound(unit_id.to_string()))?;

        let product = self
            .products
            .get(&unit.product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(unit.product_id.to_string()))?;

        if product.store_id != store_id {
            return Err(CatalogError::WrongStore {
                unit: unit_id.to_string(),
                store: store_id.to_string(),
            });
        }

        if !unit.is_active || !product.is_active {
            return Err(CatalogError::UnitInactive(unit_id.to_string()));
        }

        Ok((product, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    fn catalog_with_unit() -> (Catalog, StoreId, ProductUnitId) {
        let store = StoreId::new();
        let product = Product::new(store, "Xi mang PCB40");
        let unit =
            ProductUnit::new(product.id, "bao", Money::vnd(dec!(85000)), dec!(1)).unwrap();
        let unit_id = unit.id;

        let mut catalog = Catalog::new();
        catalog.add_product(product);
        catalog.add_unit(unit).unwrap();
        (catalog, store, unit_id)
    }

    #[test]
    fn test_resolve_unit_happy_path() {
        let (catalog, store, unit_id) = catalog_with_unit();
        let (product, unit) = catalog.resolve_unit(store, unit_id).unwrap();
        assert_eq!(product.name, "Xi mang PCB40");
        assert_eq!(unit.unit_name, "bao");
    }

    #[test]
    fn test_resolve_unit_wrong_store() {
        let (catalog, _store, unit_id) = catalog_with_unit();
        let other = StoreId::new();
        assert!(matches!(
            catalog.resolve_unit(other, unit_id),
            Err(CatalogError::WrongStore { .. })
        ));
    }

    #[test]
    fn test_resolve_inactive_unit() {
        let (mut catalog, store, unit_id) = catalog_with_unit();
        catalog.units.get_mut(&unit_id).unwrap().is_active = false;
        assert!(matches!(
            catalog.resolve_unit(store, unit_id),
            Err(CatalogError::UnitInactive(_))
        ));
    }

    #[test]
    fn test_add_unit_requires_product() {
        let mut catalog = Catalog::new();
        let orphan = ProductUnit::new(
            ProductId::new(),
            "kg",
            Money::vnd(dec!(12000)),
            dec!(1),
        )
        .unwrap();
        assert!(matches!(
            catalog.add_unit(orphan),
            Err(CatalogError::ProductNotFound(_))
        ));
    }
}
