//! Fixture builders
//!
//! A seeded store mirrors a typical household shop: bagged cement sold by
//! the bag, canned beer sold by the can or the 24-can crate, and one
//! regular customer who buys on credit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use app_confirmation::{
    ConfirmationEngine, CreateOrderRequest, DraftItemRequest, EngineConfig, OrderItemRequest,
    SubmitDraftRequest,
};
use core_kernel::{CustomerId, EmployeeId, Money, ProductId, ProductUnitId, StoreId};
use domain_catalog::{Product, ProductUnit};
use domain_debt::{CreditEnforcement, CreditPolicy, Customer};
use domain_order::DraftSource;

/// A ready-to-use store with a small catalog and one credit customer
pub struct StoreFixture {
    pub engine: ConfirmationEngine,
    pub store_id: StoreId,
    pub employee: EmployeeId,
    pub cement: ProductId,
    /// Cement sold by the bag, conversion factor 1
    pub cement_bag: ProductUnitId,
    pub beer: ProductId,
    /// Beer sold by the can, the base unit
    pub beer_can: ProductUnitId,
    /// Beer sold by the 24-can crate
    pub beer_crate: ProductUnitId,
    pub customer: CustomerId,
}

/// Builds the standard fixture; no stock is imported
pub async fn seeded_store() -> StoreFixture {
    crate::init_tracing();

    let store_id = StoreId::new();
    let engine = ConfirmationEngine::new(store_id, "0001", EngineConfig::default());

    let cement_product = Product::new(store_id, "Xi mang PCB40").with_category("vat lieu");
    let cement = cement_product.id;
    let cement_bag_unit = ProductUnit::new(cement, "bao", Money::vnd(dec!(85000)), dec!(1))
        .unwrap()
        .with_cost_price(Money::vnd(dec!(78000)))
        .as_default();
    let cement_bag = cement_bag_unit.id;

    let beer_product = Product::new(store_id, "Bia 333").with_category("nuoc uong");
    let beer = beer_product.id;
    let beer_can_unit = ProductUnit::new(beer, "lon", Money::vnd(dec!(11000)), dec!(1))
        .unwrap()
        .as_default();
    let beer_can = beer_can_unit.id;
    let beer_crate_unit = ProductUnit::new(beer, "thung", Money::vnd(dec!(250000)), dec!(24))
        .unwrap()
        .with_cost_price(Money::vnd(dec!(230000)));
    let beer_crate = beer_crate_unit.id;

    engine.add_product(cement_product).await;
    engine.add_unit(cement_bag_unit).await.unwrap();
    engine.add_product(beer_product).await;
    engine.add_unit(beer_can_unit).await.unwrap();
    engine.add_unit(beer_crate_unit).await.unwrap();

    let customer = engine
        .add_customer(Customer::new(store_id, "Chu Ba").with_phone("0903123456"))
        .await;

    StoreFixture {
        engine,
        store_id,
        employee: EmployeeId::new(),
        cement,
        cement_bag,
        beer,
        beer_can,
        beer_crate,
        customer,
    }
}

impl StoreFixture {
    /// Registers a customer with a credit limit
    pub async fn customer_with_limit(
        &self,
        name: &str,
        limit: Decimal,
        enforcement: CreditEnforcement,
    ) -> CustomerId {
        let policy = match enforcement {
            CreditEnforcement::Hard => CreditPolicy::hard_limit(Money::vnd(limit)),
            CreditEnforcement::Advisory => CreditPolicy::advisory_limit(Money::vnd(limit)),
        };
        self.engine
            .add_customer(Customer::new(self.store_id, name).with_credit_policy(policy))
            .await
    }
}

/// A one-line cash order request at catalog price
pub fn order_request(unit: ProductUnitId, quantity: Decimal) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![OrderItemRequest {
            product_unit_id: unit,
            quantity,
            unit_price: None,
            discount: None,
        }],
        customer_id: None,
        is_credit: false,
        notes: None,
    }
}

/// A one-line credit order request for a customer
pub fn credit_order_request(
    unit: ProductUnitId,
    quantity: Decimal,
    customer: CustomerId,
) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![OrderItemRequest {
            product_unit_id: unit,
            quantity,
            unit_price: None,
            discount: None,
        }],
        customer_id: Some(customer),
        is_credit: true,
        notes: None,
    }
}

/// A one-line AI draft with the unit already resolved by the parser
pub fn draft_request(
    raw_text: &str,
    unit: ProductUnitId,
    quantity: Decimal,
    confidence: Decimal,
) -> SubmitDraftRequest {
    SubmitDraftRequest {
        raw_text: raw_text.to_string(),
        source: DraftSource::Text,
        items: vec![DraftItemRequest {
            product_name: "san pham".to_string(),
            unit_name: "don vi".to_string(),
            quantity,
            product_unit_id: Some(unit),
        }],
        customer_id: None,
        customer_name: None,
        is_credit: false,
        confidence,
    }
}
