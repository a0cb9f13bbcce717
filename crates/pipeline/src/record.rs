//! Fulfillment record built from the pipeline event trail.

use common::OrderId;
use domain::TransactionId;
use serde::{Deserialize, Serialize};

use crate::events::PipelineEvent;
use crate::state::PipelineState;

/// The accumulated state of one order's trip through the pipeline.
///
/// Built by applying [`PipelineEvent`]s in order. Tracks the current
/// state, completed stages, and context gathered along the way
/// (transaction ID, invoice number, failure reason).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FulfillmentRecord {
    order_id: Option<OrderId>,
    state: PipelineState,
    completed_stages: Vec<String>,
    transaction_id: Option<TransactionId>,
    invoice_number: Option<String>,
    payment_cancelled: bool,
    failure_reason: Option<String>,
    events: Vec<PipelineEvent>,
}

impl FulfillmentRecord {
    /// Applies an event, advancing the record's state.
    pub fn apply(&mut self, event: PipelineEvent) {
        match &event {
            PipelineEvent::PipelineStarted(data) => {
                self.order_id = Some(data.order_id);
            }
            PipelineEvent::StageStarted(data) => {
                if let Some(state) = PipelineState::for_stage(&data.stage) {
                    self.state = state;
                }
            }
            PipelineEvent::StageCompleted(data) => {
                self.completed_stages.push(data.stage.clone());
                if let Some(tid) = data.transaction_id {
                    self.transaction_id = Some(tid);
                }
                if let Some(number) = &data.invoice_number {
                    self.invoice_number = Some(number.clone());
                }
            }
            PipelineEvent::StageFailed(data) => {
                self.failure_reason = Some(data.error.clone());
            }
            PipelineEvent::PaymentCancelled(_) => {
                self.payment_cancelled = true;
            }
            PipelineEvent::PipelineCompleted(_) => {
                self.state = PipelineState::Completed;
            }
            PipelineEvent::PipelineFailed(data) => {
                self.state = PipelineState::Failed;
                self.failure_reason = Some(data.reason.clone());
            }
        }
        self.events.push(event);
    }

    /// Returns the order ID.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Returns the current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Returns the names of completed stages, in completion order.
    pub fn completed_stages(&self) -> &[String] {
        &self.completed_stages
    }

    /// Returns the transaction ID, if the charge stage completed.
    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction_id
    }

    /// Returns the invoice number, if the invoice stage completed.
    pub fn invoice_number(&self) -> Option<&str> {
        self.invoice_number.as_deref()
    }

    /// Returns true if the compensating payment cancellation was issued.
    pub fn payment_cancelled(&self) -> bool {
        self.payment_cancelled
    }

    /// Returns the failure reason, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Returns the full event trail.
    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }
}
