//! End-to-end tests for the fulfillment pipeline.

use std::time::Duration;

use common::Sku;
use domain::{Money, OrderRequest, TransactionId, ValidationError};
use pipeline::{
    InMemoryCatalog, InMemoryInvoiceIssuer, InMemoryNotifier, InMemoryPaymentGateway,
    InMemoryStockVerifier, Orchestrator, PipelineError, PipelineState, DEMO_INVOICE_NUMBER,
    DEMO_TRANSACTION_ID,
};

type TestOrchestrator = Orchestrator<
    InMemoryCatalog,
    InMemoryStockVerifier,
    InMemoryPaymentGateway,
    InMemoryInvoiceIssuer,
    InMemoryNotifier,
>;

struct TestHarness {
    orchestrator: TestOrchestrator,
    catalog: InMemoryCatalog,
    stock: InMemoryStockVerifier,
    payment: InMemoryPaymentGateway,
    invoices: InMemoryInvoiceIssuer,
    notifier: InMemoryNotifier,
}

impl TestHarness {
    fn new() -> Self {
        let catalog = InMemoryCatalog::with_demo_titles(Duration::from_millis(350));
        let stock = InMemoryStockVerifier::with_delay(Duration::from_millis(250));
        let payment = InMemoryPaymentGateway::with_delays(
            Duration::from_millis(500),
            Duration::from_millis(200),
        );
        let invoices = InMemoryInvoiceIssuer::with_delay(Duration::from_millis(300));
        let notifier = InMemoryNotifier::with_delay(Duration::from_millis(300));

        let orchestrator = Orchestrator::new(
            catalog.clone(),
            stock.clone(),
            payment.clone(),
            invoices.clone(),
            notifier.clone(),
        );

        Self {
            orchestrator,
            catalog,
            stock,
            payment,
            invoices,
            notifier,
        }
    }
}

fn request(skus: &[&str]) -> OrderRequest {
    OrderRequest::new(
        "Alice",
        "alice@example.com",
        skus.iter().map(|s| Sku::new(*s)).collect(),
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_full_order_both_titles() {
    let h = TestHarness::new();

    let fulfillment = h
        .orchestrator
        .fulfill(&request(&["JS101", "NODE201"]))
        .await
        .unwrap();

    // 299.00 + 349.00
    assert_eq!(fulfillment.total, Money::from_cents(64800));
    assert_eq!(fulfillment.transaction.amount, Money::from_cents(64800));
    assert_eq!(fulfillment.transaction.payer, "Alice");
    assert_eq!(fulfillment.invoice.number, DEMO_INVOICE_NUMBER);
    assert_eq!(
        fulfillment.invoice.transaction_id,
        TransactionId::new(DEMO_TRANSACTION_ID)
    );

    let message = &fulfillment.confirmation.unwrap().message;
    assert!(message.contains(DEMO_INVOICE_NUMBER));
    assert!(message.contains("alice@example.com"));

    assert_eq!(fulfillment.record.state(), PipelineState::Completed);
    assert_eq!(fulfillment.record.completed_stages().len(), 5);
    assert_eq!(
        fulfillment.record.transaction_id(),
        Some(TransactionId::new(DEMO_TRANSACTION_ID))
    );
    assert_eq!(fulfillment.record.invoice_number(), Some(DEMO_INVOICE_NUMBER));
    assert!(!fulfillment.record.payment_cancelled());

    assert_eq!(h.payment.payment_count(), 1);
    assert_eq!(h.invoices.issued_count(), 1);
    assert_eq!(h.notifier.sent_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_forced_out_of_stock_never_reaches_payment() {
    let h = TestHarness::new();
    h.stock.force_unavailable("Node.js Guide");

    let result = h
        .orchestrator
        .fulfill(&request(&["JS101", "NODE201"]))
        .await;

    assert_eq!(
        result.unwrap_err(),
        PipelineError::OutOfStock("Node.js Guide".to_string())
    );
    assert_eq!(h.payment.payment_count(), 0);
    assert!(h.payment.cancellations().is_empty());
    assert_eq!(h.invoices.issued_count(), 0);
    assert_eq!(h.notifier.sent_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_declined_payment_skips_invoice_and_notification() {
    let h = TestHarness::new();
    h.payment.set_fail_on_charge(true);

    let result = h.orchestrator.fulfill(&request(&["JS101"])).await;

    assert_eq!(result.unwrap_err(), PipelineError::PaymentDeclined);
    assert_eq!(h.payment.payment_count(), 0);
    assert!(h.payment.cancellations().is_empty());
    assert_eq!(h.invoices.issued_count(), 0);
    assert_eq!(h.notifier.sent_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_sku_fails_before_stock_verification() {
    let h = TestHarness::new();

    let result = h.orchestrator.fulfill(&request(&["UNKNOWN1"])).await;

    assert_eq!(result.unwrap_err(), PipelineError::LookupEmpty);
    assert_eq!(h.stock.verification_count(), 0);
    assert_eq!(h.payment.payment_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_skus_are_dropped_not_fatal() {
    let h = TestHarness::new();

    let fulfillment = h
        .orchestrator
        .fulfill(&request(&["JS101", "UNKNOWN1"]))
        .await
        .unwrap();

    // Only the known title is billed.
    assert_eq!(fulfillment.items.len(), 1);
    assert_eq!(fulfillment.total, Money::from_cents(29900));
}

#[tokio::test(start_paused = true)]
async fn test_items_keep_request_order() {
    let h = TestHarness::new();

    let fulfillment = h
        .orchestrator
        .fulfill(&request(&["NODE201", "JS101"]))
        .await
        .unwrap();

    let titles: Vec<&str> = fulfillment
        .items
        .items()
        .iter()
        .map(|item| item.title.as_str())
        .collect();
    assert_eq!(titles, ["Node.js Guide", "JavaScript Basics"]);
}

#[tokio::test(start_paused = true)]
async fn test_invoice_failure_compensates_exactly_once() {
    let h = TestHarness::new();
    h.invoices.set_fail_on_issue(true);

    let expected = TransactionId::new(DEMO_TRANSACTION_ID);
    let result = h
        .orchestrator
        .fulfill(&request(&["JS101", "NODE201"]))
        .await;

    assert_eq!(
        result.unwrap_err(),
        PipelineError::UnknownTransaction(expected)
    );
    // Exactly one cancellation, referencing the charged transaction.
    assert_eq!(h.payment.cancellations(), vec![expected]);
    assert_eq!(h.payment.payment_count(), 0);
    assert_eq!(h.notifier.sent_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_notification_failure_is_best_effort() {
    let h = TestHarness::new();
    h.notifier.set_fail_on_send(true);

    let fulfillment = h.orchestrator.fulfill(&request(&["JS101"])).await.unwrap();

    assert!(fulfillment.confirmation.is_none());
    assert_eq!(fulfillment.record.state(), PipelineState::Completed);
    assert!(h.payment.cancellations().is_empty());
    assert_eq!(h.payment.payment_count(), 1);
    assert_eq!(h.invoices.issued_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_requests_rejected_at_the_boundary() {
    assert_eq!(
        OrderRequest::new("", "alice@example.com", vec![Sku::new("JS101")]).unwrap_err(),
        ValidationError::BlankPayer
    );
    assert_eq!(
        OrderRequest::new("Alice", "alice@example.com", vec![]).unwrap_err(),
        ValidationError::EmptySkuList
    );
}

#[tokio::test(start_paused = true)]
async fn test_independent_orders_run_concurrently() {
    let h = TestHarness::new();

    let first_req = request(&["JS101"]);
    let second_req = request(&["NODE201"]);
    let first = h.orchestrator.fulfill(&first_req);
    let second = h.orchestrator.fulfill(&second_req);
    let (a, b) = tokio::join!(first, second);

    let a = a.unwrap();
    let b = b.unwrap();
    assert_ne!(a.order_id, b.order_id);
    assert_eq!(a.total, Money::from_cents(29900));
    assert_eq!(b.total, Money::from_cents(34900));
    assert_eq!(h.invoices.issued_count(), 2);
    assert_eq!(h.notifier.sent_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_catalog_is_shared_read_only_between_orders() {
    let h = TestHarness::new();
    assert_eq!(h.catalog.entry_count(), 2);

    let _ = h.orchestrator.fulfill(&request(&["JS101"])).await.unwrap();
    let _ = h.orchestrator.fulfill(&request(&["JS101"])).await.unwrap();

    // Fulfillment never mutates the catalog.
    assert_eq!(h.catalog.entry_count(), 2);
}
