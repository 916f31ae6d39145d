//! Request payloads accepted by the engine
//!
//! Inbound shapes are validated before touching any aggregate so a bad
//! payload never reaches the ledgers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CustomerId, ProductUnitId};
use domain_order::DraftSource;

/// One line of a counter order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    /// Sale unit being ordered
    pub product_unit_id: ProductUnitId,
    /// Quantity in the sale unit
    pub quantity: Decimal,
    /// Price override per sale unit; defaults to the catalog price
    pub unit_price: Option<Decimal>,
    /// Line discount
    pub discount: Option<Decimal>,
}

/// A counter order keyed in by an employee
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "order must have at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,
    pub customer_id: Option<CustomerId>,
    /// Credit sale ("ban chiu"); requires a customer
    #[serde(default)]
    pub is_credit: bool,
    pub notes: Option<String>,
}

/// One parsed line of an AI draft
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DraftItemRequest {
    /// Product name as heard/read
    #[validate(length(min = 1, message = "product name must not be empty"))]
    pub product_name: String,
    /// Unit name as heard/read
    #[validate(length(min = 1, message = "unit name must not be empty"))]
    pub unit_name: String,
    pub quantity: Decimal,
    /// Catalog unit, if the parser resolved one
    pub product_unit_id: Option<ProductUnitId>,
}

/// An AI-parsed candidate order from the NLP producer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitDraftRequest {
    /// Original text or transcript, kept verbatim for audit
    #[validate(length(min = 1, message = "raw text must not be empty"))]
    pub raw_text: String,
    pub source: DraftSource,
    #[validate(length(min = 1, message = "draft must have at least one item"), nested)]
    pub items: Vec<DraftItemRequest>,
    pub customer_id: Option<CustomerId>,
    pub customer_name: Option<String>,
    #[serde(default)]
    pub is_credit: bool,
    /// Parser confidence in [0, 1]; never skips human review
    pub confidence: Decimal,
}
