//! Order orchestrator for the fulfillment pipeline.

use common::OrderId;
use domain::{
    Confirmation, Invoice, Money, OrderRequest, Transaction, TransactionId, VerifiedOrder,
};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::events::PipelineEvent;
use crate::record::FulfillmentRecord;
use crate::services::catalog::{CatalogSource, InMemoryCatalog};
use crate::services::invoice::{InMemoryInvoiceIssuer, InvoiceIssuer};
use crate::services::notify::{InMemoryNotifier, Notifier};
use crate::services::payment::{InMemoryPaymentGateway, PaymentGateway};
use crate::services::stock::{InMemoryStockVerifier, StockVerifier};
use crate::stages;

/// The result of a completed order.
#[derive(Debug, Clone)]
pub struct Fulfillment {
    /// Identifier assigned to this order run.
    pub order_id: OrderId,
    /// The verified line items, in request order.
    pub items: VerifiedOrder,
    /// The charged total.
    pub total: Money,
    /// The payment transaction.
    pub transaction: Transaction,
    /// The issued invoice.
    pub invoice: Invoice,
    /// The delivered confirmation, or `None` when delivery failed
    /// (notification is best-effort).
    pub confirmation: Option<Confirmation>,
    /// The full event trail for this order.
    pub record: FulfillmentRecord,
}

/// Sequences the fulfillment stages for one order at a time.
///
/// Drives catalog lookup → stock verification → charge → invoice →
/// notification, short-circuiting on the first failure. If a stage fails
/// after a successful charge, exactly one compensating cancellation is
/// issued against that transaction.
pub struct Orchestrator<C, S, P, I, N>
where
    C: CatalogSource,
    S: StockVerifier,
    P: PaymentGateway,
    I: InvoiceIssuer,
    N: Notifier,
{
    catalog: C,
    stock: S,
    payment: P,
    invoices: I,
    notifier: N,
}

impl<C, S, P, I, N> Orchestrator<C, S, P, I, N>
where
    C: CatalogSource,
    S: StockVerifier,
    P: PaymentGateway,
    I: InvoiceIssuer,
    N: Notifier,
{
    /// Creates a new orchestrator over the given stage services.
    pub fn new(catalog: C, stock: S, payment: P, invoices: I, notifier: N) -> Self {
        Self {
            catalog,
            stock,
            payment,
            invoices,
            notifier,
        }
    }

    /// Fulfills a validated order request.
    ///
    /// Returns the [`Fulfillment`] on success. Any stage failure aborts
    /// the downstream stages and surfaces as the corresponding
    /// [`PipelineError`]; the caller decides how to log or display it.
    #[tracing::instrument(skip(self, request), fields(payer = request.payer()))]
    pub async fn fulfill(&self, request: &OrderRequest) -> Result<Fulfillment, PipelineError> {
        metrics::counter!("orders_total").increment(1);
        let start = std::time::Instant::now();

        let order_id = OrderId::new();
        let mut record = FulfillmentRecord::default();
        record.apply(PipelineEvent::pipeline_started(order_id));

        // Stage 1: catalog lookup
        tracing::info!(%order_id, stage = stages::STAGE_LOOKUP, "stage started");
        record.apply(PipelineEvent::stage_started(stages::STAGE_LOOKUP));
        let items = match self.catalog.fetch(request.skus()).await {
            Ok(items) => items,
            Err(e) => return Err(self.abort(&mut record, start, stages::STAGE_LOOKUP, e)),
        };
        if items.is_empty() {
            return Err(self.abort(
                &mut record,
                start,
                stages::STAGE_LOOKUP,
                PipelineError::LookupEmpty,
            ));
        }
        record.apply(PipelineEvent::stage_completed(
            stages::STAGE_LOOKUP,
            None,
            None,
        ));

        // Stage 2: stock verification
        tracing::info!(%order_id, stage = stages::STAGE_VERIFY_STOCK, "stage started");
        record.apply(PipelineEvent::stage_started(stages::STAGE_VERIFY_STOCK));
        let refreshed = match self.stock.verify(items).await {
            Ok(refreshed) => refreshed,
            Err(e) => return Err(self.abort(&mut record, start, stages::STAGE_VERIFY_STOCK, e)),
        };
        let verified = match VerifiedOrder::new(refreshed) {
            Ok(verified) => verified,
            Err(e) => {
                return Err(self.abort(
                    &mut record,
                    start,
                    stages::STAGE_VERIFY_STOCK,
                    e.into(),
                ));
            }
        };
        record.apply(PipelineEvent::stage_completed(
            stages::STAGE_VERIFY_STOCK,
            None,
            None,
        ));

        // Stage 3: charge the total
        let total = verified.total();
        tracing::info!(%order_id, stage = stages::STAGE_CHARGE, %total, "stage started");
        record.apply(PipelineEvent::stage_started(stages::STAGE_CHARGE));
        let transaction = match self.payment.charge(request.payer(), total).await {
            Ok(transaction) => transaction,
            Err(e) => return Err(self.abort(&mut record, start, stages::STAGE_CHARGE, e)),
        };
        record.apply(PipelineEvent::stage_completed(
            stages::STAGE_CHARGE,
            Some(transaction.id),
            None,
        ));

        // Stage 4: invoice. The only stage past which a real charge exists
        // uncompensated, so a failure here rolls the payment back before
        // the error is reported.
        tracing::info!(%order_id, stage = stages::STAGE_INVOICE, "stage started");
        record.apply(PipelineEvent::stage_started(stages::STAGE_INVOICE));
        let invoice = match self.invoices.issue(transaction.id).await {
            Ok(invoice) => invoice,
            Err(e) => {
                record.apply(PipelineEvent::stage_failed(
                    stages::STAGE_INVOICE,
                    e.to_string(),
                ));
                self.rollback_payment(&mut record, transaction.id).await;
                return Err(self.fail(&mut record, start, e));
            }
        };
        record.apply(PipelineEvent::stage_completed(
            stages::STAGE_INVOICE,
            None,
            Some(invoice.number.clone()),
        ));

        // Stage 5: notification, best-effort. A delivery failure is logged
        // and the order still completes.
        tracing::info!(%order_id, stage = stages::STAGE_NOTIFY, "stage started");
        record.apply(PipelineEvent::stage_started(stages::STAGE_NOTIFY));
        let confirmation = match self.notifier.send(request.address(), &invoice.number).await {
            Ok(confirmation) => {
                record.apply(PipelineEvent::stage_completed(
                    stages::STAGE_NOTIFY,
                    None,
                    None,
                ));
                Some(confirmation)
            }
            Err(error) => {
                record.apply(PipelineEvent::stage_failed(
                    stages::STAGE_NOTIFY,
                    error.to_string(),
                ));
                tracing::warn!(%order_id, %error, "confirmation delivery failed, completing anyway");
                None
            }
        };

        record.apply(PipelineEvent::pipeline_completed());
        let duration = start.elapsed().as_secs_f64();
        metrics::histogram!("order_duration_seconds").record(duration);
        metrics::counter!("orders_completed").increment(1);
        tracing::info!(%order_id, duration, "order completed");

        Ok(Fulfillment {
            order_id,
            items: verified,
            total,
            transaction,
            invoice,
            confirmation,
            record,
        })
    }

    /// Issues the compensating payment cancellation, at most once per order.
    async fn rollback_payment(
        &self,
        record: &mut FulfillmentRecord,
        transaction_id: TransactionId,
    ) {
        if record.payment_cancelled() {
            return;
        }

        match self.payment.cancel(transaction_id).await {
            Ok(ack) => {
                record.apply(PipelineEvent::payment_cancelled(ack.transaction_id));
                metrics::counter!("payment_cancellations_total").increment(1);
                tracing::info!(%transaction_id, "payment rolled back");
            }
            Err(error) => {
                // No retry policy exists; the failed rollback is logged and
                // the original stage error still surfaces to the caller.
                tracing::error!(%transaction_id, %error, "payment rollback failed");
            }
        }
    }

    /// Records a stage failure, then aborts the order.
    fn abort(
        &self,
        record: &mut FulfillmentRecord,
        start: std::time::Instant,
        stage: &str,
        error: PipelineError,
    ) -> PipelineError {
        record.apply(PipelineEvent::stage_failed(stage, error.to_string()));
        self.fail(record, start, error)
    }

    /// Marks the order failed and surfaces the error.
    fn fail(
        &self,
        record: &mut FulfillmentRecord,
        start: std::time::Instant,
        error: PipelineError,
    ) -> PipelineError {
        record.apply(PipelineEvent::pipeline_failed(error.to_string()));
        metrics::histogram!("order_duration_seconds").record(start.elapsed().as_secs_f64());
        metrics::counter!("orders_failed").increment(1);
        tracing::warn!(state = %record.state(), error = %error, "order failed");
        error
    }
}

impl
    Orchestrator<
        InMemoryCatalog,
        InMemoryStockVerifier,
        InMemoryPaymentGateway,
        InMemoryInvoiceIssuer,
        InMemoryNotifier,
    >
{
    /// Builds a fully in-memory pipeline seeded with the demo catalog.
    pub fn in_memory(config: &PipelineConfig) -> Self {
        let catalog = InMemoryCatalog::with_demo_titles(config.lookup_delay);
        let stock = InMemoryStockVerifier::with_delay(config.stock_delay);
        let payment =
            InMemoryPaymentGateway::with_delays(config.charge_delay, config.cancel_delay);
        if config.simulate_payment_failure {
            payment.set_fail_on_charge(true);
        }
        let invoices = InMemoryInvoiceIssuer::with_delay(config.invoice_delay);
        let notifier = InMemoryNotifier::with_delay(config.notify_delay);

        Self::new(catalog, stock, payment, invoices, notifier)
    }
}
