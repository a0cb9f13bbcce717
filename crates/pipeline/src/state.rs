//! Pipeline state machine.

use serde::{Deserialize, Serialize};

use crate::stages;

/// The state of an order as it moves through the fulfillment pipeline.
///
/// State transitions:
/// ```text
/// Pending ──► LookingUp ──► VerifyingStock ──► Charging ──► Invoicing ──► Notifying ──► Completed
///                 │               │               │             │             │
///                 └───────────────┴───────────────┴─────────────┴─────────────┴──► Failed
/// ```
///
/// `Failed` is reachable from every non-terminal state. `Notifying` only
/// transitions to `Completed`: notification is best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PipelineState {
    /// Order accepted, no stage started yet.
    #[default]
    Pending,

    /// Resolving SKUs against the catalog.
    LookingUp,

    /// Verifying stock availability.
    VerifyingStock,

    /// Charging the order total.
    Charging,

    /// Issuing the invoice.
    Invoicing,

    /// Delivering the confirmation.
    Notifying,

    /// All stages done (terminal state).
    Completed,

    /// A stage failed and the order was aborted (terminal state).
    Failed,
}

impl PipelineState {
    /// Returns the state a stage runs in, or `None` for an unknown stage.
    pub fn for_stage(stage: &str) -> Option<Self> {
        match stage {
            stages::STAGE_LOOKUP => Some(PipelineState::LookingUp),
            stages::STAGE_VERIFY_STOCK => Some(PipelineState::VerifyingStock),
            stages::STAGE_CHARGE => Some(PipelineState::Charging),
            stages::STAGE_INVOICE => Some(PipelineState::Invoicing),
            stages::STAGE_NOTIFY => Some(PipelineState::Notifying),
            _ => None,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Completed | PipelineState::Failed)
    }

    /// Returns true if a real charge exists uncompensated past this state.
    ///
    /// Only failures in these states require the compensating payment
    /// cancellation.
    pub fn holds_charge(&self) -> bool {
        matches!(self, PipelineState::Invoicing | PipelineState::Notifying)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Pending => "Pending",
            PipelineState::LookingUp => "LookingUp",
            PipelineState::VerifyingStock => "VerifyingStock",
            PipelineState::Charging => "Charging",
            PipelineState::Invoicing => "Invoicing",
            PipelineState::Notifying => "Notifying",
            PipelineState::Completed => "Completed",
            PipelineState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
