//! Pipeline event trail.
//!
//! The orchestrator records one event per state transition. The trail is
//! in-memory only (nothing survives the order's execution) and is returned
//! to callers as part of the fulfillment record.

use chrono::{DateTime, Utc};
use common::OrderId;
use domain::TransactionId;
use serde::{Deserialize, Serialize};

/// Events that occur while an order moves through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// Pipeline execution started for an order.
    PipelineStarted(PipelineStartedData),

    /// A stage started execution.
    StageStarted(StageData),

    /// A stage completed successfully.
    StageCompleted(StageCompletedData),

    /// A stage failed.
    StageFailed(StageFailedData),

    /// The compensating payment cancellation was issued.
    PaymentCancelled(PaymentCancelledData),

    /// All stages completed.
    PipelineCompleted(PipelineCompletedData),

    /// The order was aborted after a stage failure.
    PipelineFailed(PipelineFailedData),
}

impl PipelineEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            PipelineEvent::PipelineStarted(_) => "PipelineStarted",
            PipelineEvent::StageStarted(_) => "StageStarted",
            PipelineEvent::StageCompleted(_) => "StageCompleted",
            PipelineEvent::StageFailed(_) => "StageFailed",
            PipelineEvent::PaymentCancelled(_) => "PaymentCancelled",
            PipelineEvent::PipelineCompleted(_) => "PipelineCompleted",
            PipelineEvent::PipelineFailed(_) => "PipelineFailed",
        }
    }
}

/// Data for PipelineStarted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStartedData {
    /// The order being fulfilled.
    pub order_id: OrderId,
    /// When fulfillment started.
    pub started_at: DateTime<Utc>,
}

/// Data for StageStarted (just the stage name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageData {
    /// The stage name.
    pub stage: String,
}

/// Data for StageCompleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCompletedData {
    /// The stage name.
    pub stage: String,
    /// Transaction ID (set after the charge stage).
    pub transaction_id: Option<TransactionId>,
    /// Invoice number (set after the invoice stage).
    pub invoice_number: Option<String>,
}

/// Data for StageFailed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFailedData {
    /// The stage that failed.
    pub stage: String,
    /// Error message describing the failure.
    pub error: String,
}

/// Data for PaymentCancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCancelledData {
    /// The transaction that was rolled back.
    pub transaction_id: TransactionId,
}

/// Data for PipelineCompleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineCompletedData {
    /// When the order completed.
    pub completed_at: DateTime<Utc>,
}

/// Data for PipelineFailed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineFailedData {
    /// Reason for failure.
    pub reason: String,
    /// When the order failed.
    pub failed_at: DateTime<Utc>,
}

// Convenience constructors
impl PipelineEvent {
    /// Creates a PipelineStarted event.
    pub fn pipeline_started(order_id: OrderId) -> Self {
        PipelineEvent::PipelineStarted(PipelineStartedData {
            order_id,
            started_at: Utc::now(),
        })
    }

    /// Creates a StageStarted event.
    pub fn stage_started(stage: impl Into<String>) -> Self {
        PipelineEvent::StageStarted(StageData {
            stage: stage.into(),
        })
    }

    /// Creates a StageCompleted event.
    pub fn stage_completed(
        stage: impl Into<String>,
        transaction_id: Option<TransactionId>,
        invoice_number: Option<String>,
    ) -> Self {
        PipelineEvent::StageCompleted(StageCompletedData {
            stage: stage.into(),
            transaction_id,
            invoice_number,
        })
    }

    /// Creates a StageFailed event.
    pub fn stage_failed(stage: impl Into<String>, error: impl Into<String>) -> Self {
        PipelineEvent::StageFailed(StageFailedData {
            stage: stage.into(),
            error: error.into(),
        })
    }

    /// Creates a PaymentCancelled event.
    pub fn payment_cancelled(transaction_id: TransactionId) -> Self {
        PipelineEvent::PaymentCancelled(PaymentCancelledData { transaction_id })
    }

    /// Creates a PipelineCompleted event.
    pub fn pipeline_completed() -> Self {
        PipelineEvent::PipelineCompleted(PipelineCompletedData {
            completed_at: Utc::now(),
        })
    }

    /// Creates a PipelineFailed event.
    pub fn pipeline_failed(reason: impl Into<String>) -> Self {
        PipelineEvent::PipelineFailed(PipelineFailedData {
            reason: reason.into(),
            failed_at: Utc::now(),
        })
    }
}
