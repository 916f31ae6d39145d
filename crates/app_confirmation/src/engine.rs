//! The confirmation orchestrator
//!
//! Confirmation is staged then committed: per-item figures are derived
//! from a read-lock snapshot of the order, and every business check plus
//! every ledger write happens inside one write-lock scope, so an order's
//! effects land in all three ledgers or in none. A version mismatch
//! between snapshot and commit restages, a bounded number of times.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{
    CustomerId, DraftOrderId, EmployeeId, Money, OrderId, PaymentId, PeriodGrouping, ProductId,
    ProductUnitId, ReportPeriod, SourceRef, StoreId,
};
use domain_debt::{Customer, DebtLedgerEntry};
use domain_inventory::StockMovement;
use domain_order::{DraftItem, DraftOrder, Order, OrderError, OrderItem, OrderSource, OrderState};
use domain_posting::{BusinessEvent, EventKind, LedgerPosting, PostingError, PostingTemplate};
use domain_report::{summarize, ReportInputs, ReportPeriodSummary};

use crate::config::EngineConfig;
use crate::dto::{CreateOrderRequest, SubmitDraftRequest};
use crate::error::ConfirmationError;
use crate::receipt::{
    ConfirmationReceipt, DraftSubmission, PaymentReceipt, ReversalReceipt, StockImportReceipt,
};
use crate::state::{ConfirmationRecord, EngineState};

/// Figures derived from a snapshot of the order, keyed to its version
///
/// Nothing here touches the ledgers; the snapshot is revalidated under
/// the write lock before anything is applied.
struct StagedConfirmation {
    order_version: u32,
    order_number: String,
    total: Money,
    is_credit: bool,
    customer_id: Option<CustomerId>,
    /// Per item: product, sale unit, base-unit quantity to deduct
    requirements: Vec<(ProductId, Option<ProductUnitId>, Decimal)>,
    /// Cost of goods over items whose unit has a known cost price
    cost_total: Option<Money>,
    occurred_on: NaiveDate,
}

/// Per-store engine around the three ledgers
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ConfirmationEngine {
    config: EngineConfig,
    state: Arc<RwLock<EngineState>>,
}

impl ConfirmationEngine {
    /// Creates an engine for one store with the standard TT88 templates
    pub fn new(store_id: StoreId, store_code: impl Into<String>, config: EngineConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(EngineState::new(store_id, store_code))),
        }
    }

    /// An engine posting through a caller-supplied template registry
    pub fn with_registry(
        store_id: StoreId,
        store_code: impl Into<String>,
        registry: domain_posting::TemplateRegistry,
        config: EngineConfig,
    ) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(EngineState::with_posting(
                store_id,
                store_code,
                domain_posting::PostingEngine::new(registry),
            ))),
        }
    }

    /// Registers an additional posting template version
    pub async fn register_template(&self, template: PostingTemplate) {
        self.state.write().await.posting.register_template(template);
    }

    /// Adds a product to the store catalog
    pub async fn add_product(&self, product: domain_catalog::Product) -> ProductId {
        let id = product.id;
        self.state.write().await.catalog.add_product(product);
        id
    }

    /// Adds a sale unit to an existing product
    pub async fn add_unit(
        &self,
        unit: domain_catalog::ProductUnit,
    ) -> Result<ProductUnitId, ConfirmationError> {
        let id = unit.id;
        self.state.write().await.catalog.add_unit(unit)?;
        Ok(id)
    }

    /// Registers a customer with the debt ledger
    pub async fn add_customer(&self, customer: Customer) -> CustomerId {
        let id = customer.id;
        self.state.write().await.debt.add_customer(customer);
        id
    }

    /// Creates a counter order in `Draft`
    ///
    /// Prices default to the catalog; no stock is reserved until the
    /// order is confirmed.
    ///
    /// # Errors
    ///
    /// - `Validation` on a malformed payload
    /// - `Catalog` if a unit cannot be resolved for this store
    /// - `Debt` if a credit sale names an unregistered customer
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
        created_by: EmployeeId,
    ) -> Result<OrderId, ConfirmationError> {
        request.validate()?;

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if request.is_credit {
            let customer_id = request
                .customer_id
                .ok_or_else(|| OrderError::validation("a credit sale requires a customer"))?;
            if state.debt.customer(customer_id).is_none() {
                return Err(domain_debt::DebtError::CustomerNotFound(
                    customer_id.to_string(),
                )
                .into());
            }
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let (_, unit) = state.catalog.resolve_unit(state.store_id, line.product_unit_id)?;
            let unit_price = match line.unit_price {
                Some(price) => Money::vnd(price),
                None => unit.price,
            };
            let discount = Money::vnd(line.discount.unwrap_or_default());
            items.push(OrderItem::new(
                unit.product_id,
                unit.id,
                line.quantity,
                unit.conversion_factor,
                unit_price,
                discount,
            )?);
        }

        let number = state.next_order_number(Utc::now().date_naive());
        let mut order = Order::create(
            state.store_id,
            number,
            items,
            request.customer_id,
            OrderSource::Counter,
            request.is_credit,
            created_by,
        )?;
        if let Some(notes) = request.notes {
            order = order.with_notes(notes);
        }

        let order_id = order.id();
        for event in order.take_events() {
            debug!(?event, "order event");
        }
        info!(order = %order_id, order_number = %order.order_number(), "order created");
        state.orders.insert(order_id, order);
        Ok(order_id)
    }

    /// Accepts an AI draft from the NLP producer
    ///
    /// The raw text is stored verbatim. When every line resolves to a
    /// catalog unit, a linked order is created in `PendingConfirmation`;
    /// whatever the parser's confidence, a human still has to confirm it.
    /// Unresolved lines leave the draft pending with warnings and no
    /// order.
    pub async fn submit_draft(
        &self,
        request: SubmitDraftRequest,
        submitted_by: EmployeeId,
    ) -> Result<DraftSubmission, ConfirmationError> {
        request.validate()?;

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let draft_items: Vec<DraftItem> = request
            .items
            .iter()
            .map(|line| DraftItem {
                product_name: line.product_name.clone(),
                unit_name: line.unit_name.clone(),
                quantity: line.quantity,
                product_unit_id: line.product_unit_id,
            })
            .collect();

        let mut draft = DraftOrder::new(
            state.store_id,
            request.raw_text.clone(),
            request.source,
            draft_items,
            request.confidence,
        )?;
        if let Some(customer_id) = request.customer_id {
            let name = request
                .customer_name
                .clone()
                .or_else(|| state.debt.customer(customer_id).map(|c| c.name.clone()))
                .unwrap_or_default();
            draft = draft.with_customer(customer_id, name);
        }
        if request.is_credit {
            draft = draft.on_credit();
        }

        // Resolve each line; failures become warnings, not errors, so the
        // draft survives for an employee to fix up.
        let mut warnings = Vec::new();
        let mut items = Vec::new();
        for line in &request.items {
            match line.product_unit_id {
                None => warnings.push(format!("unresolved product '{}'", line.product_name)),
                Some(unit_id) => {
                    match state.catalog.resolve_unit(state.store_id, unit_id) {
                        Ok((_, unit)) => {
                            match OrderItem::new(
                                unit.product_id,
                                unit.id,
                                line.quantity,
                                unit.conversion_factor,
                                unit.price,
                                Money::vnd(Decimal::ZERO),
                            ) {
                                Ok(item) => items.push(item),
                                Err(e) => warnings
                                    .push(format!("invalid line '{}': {e}", line.product_name)),
                            }
                        }
                        Err(e) => {
                            warnings.push(format!("cannot resolve '{}': {e}", line.product_name))
                        }
                    }
                }
            }
        }
        if request.is_credit && request.customer_id.is_none() {
            warnings.push("credit sale without a resolved customer".to_string());
        }
        for warning in &warnings {
            draft = draft.with_warning(warning.clone());
        }

        let draft_id = draft.id;
        let order_id = if warnings.is_empty() {
            let number = state.next_order_number(Utc::now().date_naive());
            let mut order = Order::create(
                state.store_id,
                number,
                items,
                request.customer_id,
                OrderSource::Ai,
                request.is_credit,
                submitted_by,
            )?
            .with_source_draft(draft_id);
            let id = order.id();
            for event in order.take_events() {
                debug!(?event, "order event");
            }
            state.orders.insert(id, order);
            Some(id)
        } else {
            None
        };

        info!(
            draft = %draft_id,
            order = ?order_id,
            warning_count = warnings.len(),
            "draft submitted"
        );
        state.drafts.insert(draft_id, draft);
        Ok(DraftSubmission {
            draft_id,
            order_id,
            warnings,
        })
    }

    /// Confirms an order, committing its effects to all three ledgers
    ///
    /// Idempotent under `idempotency_key`: a replay returns the stored
    /// receipt; reusing the key for a different order is an error. On a
    /// business rejection the order keeps its state with a failure marker
    /// and may be retried once the condition is fixed.
    ///
    /// # Errors
    ///
    /// - `Inventory(InsufficientStock)` if the batch availability check fails
    /// - `Debt(CreditLimitExceeded)` under a breached hard limit
    /// - `Posting(TemplateNotFound)` if no template covers the sale date
    /// - `DuplicateConfirmation` on key reuse across orders
    /// - `ConcurrencyConflict` after exhausting version-conflict retries
    pub async fn confirm_order(
        &self,
        order_id: OrderId,
        idempotency_key: &str,
        confirmed_by: EmployeeId,
    ) -> Result<ConfirmationReceipt, ConfirmationError> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;

            // Replay fast path, before staging touches the order.
            {
                let state = self.state.read().await;
                if let Some(record) = state.confirmations.get(idempotency_key) {
                    if record.order_id != order_id {
                        return Err(ConfirmationError::DuplicateConfirmation {
                            key: idempotency_key.to_string(),
                        });
                    }
                    debug!(order = %order_id, key = idempotency_key, "confirmation replayed");
                    return Ok(record.receipt.clone());
                }
            }

            let staged = self.stage(order_id).await?;
            match self
                .try_commit(order_id, staged, idempotency_key, confirmed_by)
                .await
            {
                Err(ConfirmationError::ConcurrencyConflict { .. }) => {
                    if attempts > self.config.max_confirm_retries {
                        return Err(ConfirmationError::ConcurrencyConflict { attempts });
                    }
                    debug!(order = %order_id, attempt = attempts, "version conflict, restaging");
                }
                other => return other,
            }
        }
    }

    /// Derives per-item figures from a snapshot of the order
    async fn stage(&self, order_id: OrderId) -> Result<StagedConfirmation, ConfirmationError> {
        let state = self.state.read().await;
        let order = state
            .orders
            .get(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;

        if !order.is_confirmable() {
            return Err(OrderError::InvalidState {
                action: "confirm",
                state: order.state().label().to_string(),
            }
            .into());
        }

        let mut requirements = Vec::with_capacity(order.items().len());
        let mut cost_total: Option<Money> = None;
        for item in order.items() {
            requirements.push((item.product_id, Some(item.product_unit_id), item.base_quantity()));

            let unit_cost = state
                .catalog
                .unit(item.product_unit_id)
                .and_then(|unit| unit.cost_price);
            if let Some(unit_cost) = unit_cost {
                let line_cost = unit_cost.checked_mul(item.quantity)?;
                cost_total = Some(match cost_total {
                    Some(total) => total.checked_add(&line_cost)?,
                    None => line_cost,
                });
            }
        }

        Ok(StagedConfirmation {
            order_version: order.version(),
            order_number: order.order_number().to_string(),
            total: order.total(),
            is_credit: order.is_credit(),
            customer_id: order.customer_id(),
            requirements,
            cost_total,
            occurred_on: Utc::now().date_naive(),
        })
    }

    /// Revalidates the snapshot and applies the whole unit of work
    async fn try_commit(
        &self,
        order_id: OrderId,
        staged: StagedConfirmation,
        idempotency_key: &str,
        confirmed_by: EmployeeId,
    ) -> Result<ConfirmationReceipt, ConfirmationError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        // Authoritative idempotency check; a concurrent task may have won.
        if let Some(record) = state.confirmations.get(idempotency_key) {
            if record.order_id != order_id {
                return Err(ConfirmationError::DuplicateConfirmation {
                    key: idempotency_key.to_string(),
                });
            }
            return Ok(record.receipt.clone());
        }

        let order = state
            .orders
            .get(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;
        if order.version() != staged.order_version {
            return Err(ConfirmationError::ConcurrencyConflict { attempts: 1 });
        }
        if !order.is_confirmable() {
            return Err(OrderError::InvalidState {
                action: "confirm",
                state: order.state().label().to_string(),
            }
            .into());
        }

        // Business checks. A rejection marks the order failed but leaves
        // it retryable; nothing has been written yet.
        let product_requirements: Vec<(ProductId, Decimal)> = staged
            .requirements
            .iter()
            .map(|(product_id, _, qty)| (*product_id, *qty))
            .collect();
        if let Err(e) = state.inventory.check_available(&product_requirements) {
            Self::mark_failed(state, order_id, &e.to_string());
            return Err(e.into());
        }
        if staged.is_credit {
            if let Some(customer_id) = staged.customer_id {
                if let Err(e) = state.debt.check_credit(customer_id, staged.total) {
                    Self::mark_failed(state, order_id, &e.to_string());
                    return Err(e.into());
                }
            }
        }

        // Expand the posting before any ledger write so a missing or
        // unbalanced template aborts with nothing to undo.
        let kind = if staged.is_credit {
            EventKind::CreditSale
        } else {
            EventKind::CashSale
        };
        let mut event = BusinessEvent::new(
            kind,
            SourceRef::Order(order_id),
            staged.occurred_on,
            staged.total,
            format!("Sale {}", staged.order_number),
        );
        if let Some(cost) = staged.cost_total {
            event = event.with_cost(cost);
        }
        let posting = match state.posting.prepare(&event) {
            Ok(posting) => posting,
            Err(e) => {
                Self::mark_failed(state, order_id, &e.to_string());
                return Err(e.into());
            }
        };

        // Apply. Every check has passed under this same lock, so none of
        // these writes can be refused.
        let mut movement_ids = Vec::with_capacity(staged.requirements.len());
        for (product_id, unit_id, base_quantity) in &staged.requirements {
            movement_ids.push(state.inventory.deduct(
                *product_id,
                *unit_id,
                *base_quantity,
                SourceRef::Order(order_id),
            )?);
        }

        let mut warnings = Vec::new();
        let mut debt_entry_id = None;
        if staged.is_credit {
            if let Some(customer_id) = staged.customer_id {
                let recorded =
                    state
                        .debt
                        .record_credit(customer_id, staged.total, SourceRef::Order(order_id))?;
                debt_entry_id = Some(recorded.entry_id);
                if let Some(warning) = recorded.warning {
                    warn!(order = %order_id, %warning, "credit limit warning");
                    warnings.push(warning);
                }
            }
        }

        let posting_id = state.posting.commit(posting)?;

        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;
        order.confirm(confirmed_by)?;
        order.bump_version();
        let source_draft_id = order.source_draft_id();
        for event in order.take_events() {
            debug!(?event, "order event");
        }

        if let Some(draft_id) = source_draft_id {
            if let Some(draft) = state.drafts.get_mut(&draft_id) {
                if let Err(e) = draft.mark_confirmed(order_id, confirmed_by) {
                    warn!(draft = %draft_id, error = %e, "draft already processed");
                }
            }
        }

        let receipt = ConfirmationReceipt {
            order_id,
            order_number: staged.order_number.clone(),
            total: staged.total,
            movement_ids,
            debt_entry_id,
            posting_id,
            warnings,
            confirmed_at: Utc::now(),
        };
        state.confirmations.insert(
            idempotency_key.to_string(),
            ConfirmationRecord {
                order_id,
                receipt: receipt.clone(),
            },
        );
        info!(
            order = %order_id,
            order_number = %staged.order_number,
            total = %staged.total,
            posting = %posting_id,
            "order confirmed"
        );
        Ok(receipt)
    }

    fn mark_failed(state: &mut EngineState, order_id: OrderId, message: &str) {
        if let Some(order) = state.orders.get_mut(&order_id) {
            order.record_failure(message);
            order.bump_version();
            order.take_events();
        }
        warn!(order = %order_id, %message, "confirmation aborted");
    }

    /// Cancels an unconfirmed order; no ledger effect exists to undo
    pub async fn cancel_order(
        &self,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<(), ConfirmationError> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;
        order.cancel(reason)?;
        order.bump_version();
        for event in order.take_events() {
            debug!(?event, "order event");
        }
        info!(order = %order_id, "order cancelled");
        Ok(())
    }

    /// Rejects a pending AI order and its source draft
    pub async fn reject_order(
        &self,
        order_id: OrderId,
        reason: Option<String>,
        rejected_by: EmployeeId,
    ) -> Result<(), ConfirmationError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;
        order.reject(reason.clone())?;
        order.bump_version();
        let source_draft_id = order.source_draft_id();
        for event in order.take_events() {
            debug!(?event, "order event");
        }

        if let Some(draft_id) = source_draft_id {
            if let Some(draft) = state.drafts.get_mut(&draft_id) {
                if let Err(e) = draft.mark_rejected(reason, rejected_by) {
                    warn!(draft = %draft_id, error = %e, "draft already processed");
                }
            }
        }
        info!(order = %order_id, "order rejected");
        Ok(())
    }

    /// Rejects a pending draft that never produced an order
    pub async fn reject_draft(
        &self,
        draft_id: DraftOrderId,
        reason: Option<String>,
        rejected_by: EmployeeId,
    ) -> Result<(), ConfirmationError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let draft = state
            .drafts
            .get_mut(&draft_id)
            .ok_or_else(|| ConfirmationError::DraftNotFound(draft_id.to_string()))?;
        draft.mark_rejected(reason.clone(), rejected_by)?;

        // A linked pending order, if one was created, is rejected with it.
        if let Some(order) = state
            .orders
            .values_mut()
            .find(|o| o.source_draft_id() == Some(draft_id))
        {
            if order.state() == &OrderState::PendingConfirmation {
                order.reject(reason)?;
                order.bump_version();
                order.take_events();
            }
        }
        info!(draft = %draft_id, "draft rejected");
        Ok(())
    }

    /// Reverses a confirmed order: compensating records in all three
    /// ledgers, never edits to history
    ///
    /// The stock comes back as `CancelRestore` movements, the credit
    /// portion as a `Reversal` entry, and the posting as a flipped-side
    /// posting linked both ways. The order ends `Cancelled`.
    ///
    /// # Errors
    ///
    /// - `Order(InvalidState)` unless the order is `Confirmed`
    /// - `Posting(AlreadyReversed)` if it was already reversed
    pub async fn reverse_order(
        &self,
        order_id: OrderId,
        reason: impl Into<String>,
    ) -> Result<ReversalReceipt, ConfirmationError> {
        let reason = reason.into();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let order = state
            .orders
            .get(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;
        if !matches!(order.state(), OrderState::Confirmed { .. }) {
            return Err(OrderError::InvalidState {
                action: "reverse",
                state: order.state().label().to_string(),
            }
            .into());
        }
        let is_credit = order.is_credit();
        let customer_id = order.customer_id();
        let total = order.total();
        let requirements: Vec<(ProductId, Option<ProductUnitId>, Decimal)> = order
            .items()
            .iter()
            .map(|item| (item.product_id, Some(item.product_unit_id), item.base_quantity()))
            .collect();

        let posting_id = state
            .posting
            .postings()
            .iter()
            .find(|p| p.event_ref == SourceRef::Order(order_id) && p.is_active())
            .map(|p| p.id)
            .ok_or_else(|| PostingError::PostingNotFound(order_id.to_string()))?;

        let reversal_posting_id = state.posting.reverse(posting_id, &reason)?;
        let mut restore_movement_ids = Vec::with_capacity(requirements.len());
        for (product_id, unit_id, base_quantity) in requirements {
            restore_movement_ids.push(state.inventory.restore(
                product_id,
                unit_id,
                base_quantity,
                SourceRef::ReversalOf(posting_id),
            )?);
        }
        let debt_entry_id = match (is_credit, customer_id) {
            (true, Some(customer_id)) => Some(state.debt.record_reversal(
                customer_id,
                total,
                SourceRef::ReversalOf(posting_id),
            )?),
            _ => None,
        };

        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ConfirmationError::OrderNotFound(order_id.to_string()))?;
        order.mark_reversed(Some(reason))?;
        order.bump_version();
        for event in order.take_events() {
            debug!(?event, "order event");
        }

        info!(
            order = %order_id,
            reversal_posting = %reversal_posting_id,
            "confirmed order reversed"
        );
        Ok(ReversalReceipt {
            order_id,
            restore_movement_ids,
            debt_entry_id,
            reversal_posting_id,
        })
    }

    /// Records a customer paying down their debt
    ///
    /// The debt entry and the accounting posting land together; a missing
    /// template leaves the debt ledger untouched.
    pub async fn record_payment(
        &self,
        customer_id: CustomerId,
        amount: Money,
        occurred_on: NaiveDate,
    ) -> Result<PaymentReceipt, ConfirmationError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let payment_id = PaymentId::new_v7();
        let event = BusinessEvent::new(
            EventKind::DebtPayment,
            SourceRef::Payment(payment_id),
            occurred_on,
            amount,
            format!("Customer payment {payment_id}"),
        );
        let posting = state.posting.prepare(&event)?;
        let debt_entry_id =
            state
                .debt
                .record_payment(customer_id, amount, SourceRef::Payment(payment_id))?;
        let posting_id = state.posting.commit(posting)?;
        let balance_after = state.debt.balance(customer_id)?;

        info!(
            customer = %customer_id,
            %amount,
            balance = %balance_after,
            "payment recorded"
        );
        Ok(PaymentReceipt {
            payment_id,
            debt_entry_id,
            posting_id,
            balance_after,
        })
    }

    /// Records goods received, in sale units of the given unit
    ///
    /// When a cost is known (explicit or from the unit's cost price) the
    /// import is also posted to the accounting journal.
    pub async fn record_stock_import(
        &self,
        product_unit_id: ProductUnitId,
        quantity: Decimal,
        unit_cost: Option<Money>,
        occurred_on: NaiveDate,
    ) -> Result<StockImportReceipt, ConfirmationError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let (product, unit) = state.catalog.resolve_unit(state.store_id, product_unit_id)?;
        let product_id = product.id;
        let product_name = product.name.clone();
        let base_quantity = unit.to_base_quantity(quantity);
        let total_cost = match unit_cost.or(unit.cost_price) {
            Some(cost) => Some(cost.checked_mul(quantity)?),
            None => None,
        };

        let import_ref = SourceRef::StockImport(Uuid::new_v4());
        let posting = match total_cost {
            Some(cost) => Some(state.posting.prepare(&BusinessEvent::new(
                EventKind::StockImport,
                import_ref,
                occurred_on,
                cost,
                format!("Stock import {product_name}"),
            ))?),
            None => None,
        };

        let movement_id =
            state
                .inventory
                .record_import(product_id, Some(product_unit_id), base_quantity, import_ref)?;
        let posting_id = match posting {
            Some(posting) => Some(state.posting.commit(posting)?),
            None => None,
        };

        info!(product = %product_id, %quantity, "stock import recorded");
        Ok(StockImportReceipt {
            movement_id,
            posting_id,
        })
    }

    /// Applies a signed stocktake correction
    pub async fn adjust_stock(
        &self,
        product_id: ProductId,
        delta: Decimal,
    ) -> Result<core_kernel::MovementId, ConfirmationError> {
        let mut state = self.state.write().await;
        let movement_id =
            state
                .inventory
                .adjust(product_id, delta, SourceRef::Adjustment(Uuid::new_v4()))?;
        info!(product = %product_id, %delta, "stock adjusted");
        Ok(movement_id)
    }

    /// Snapshot of an order
    pub async fn order(&self, order_id: OrderId) -> Option<Order> {
        self.state.read().await.orders.get(&order_id).cloned()
    }

    /// Snapshot of a draft
    pub async fn draft(&self, draft_id: DraftOrderId) -> Option<DraftOrder> {
        self.state.read().await.drafts.get(&draft_id).cloned()
    }

    /// Current stock level of a product, in base units
    pub async fn available_stock(&self, product_id: ProductId) -> Decimal {
        self.state.read().await.inventory.available_stock(product_id)
    }

    /// A customer's outstanding balance
    pub async fn customer_balance(
        &self,
        customer_id: CustomerId,
    ) -> Result<Money, ConfirmationError> {
        Ok(self.state.read().await.debt.balance(customer_id)?)
    }

    /// Snapshot of the movement log
    pub async fn movements(&self) -> Vec<StockMovement> {
        self.state.read().await.inventory.movements().to_vec()
    }

    /// Snapshot of the debt entry log
    pub async fn debt_entries(&self) -> Vec<DebtLedgerEntry> {
        self.state.read().await.debt.entries().to_vec()
    }

    /// Snapshot of the posting journal
    pub async fn postings(&self) -> Vec<LedgerPosting> {
        self.state.read().await.posting.postings().to_vec()
    }

    /// Derives a period summary from the three ledger streams
    pub async fn summarize(
        &self,
        period: ReportPeriod,
        grouping: PeriodGrouping,
    ) -> ReportPeriodSummary {
        let state = self.state.read().await;
        summarize(
            state.store_id,
            period,
            grouping,
            self.config.low_stock_threshold,
            ReportInputs {
                movements: state.inventory.movements(),
                debt_entries: state.debt.entries(),
                postings: state.posting.postings(),
            },
        )
    }
}
