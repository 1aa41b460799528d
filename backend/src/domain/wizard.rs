//! The five-step audit workflow as an explicit state value.
//!
//! ```text
//! Configuring ─next→ EnteringBoxes{0} → … → EnteringBoxes{n-1} ─next→ Validating
//!     ─next→ Summarizing ─next→ Reporting
//! ```
//!
//! Every transition is a pure function from a state and an action to a new
//! state. A rejected action returns an error and the caller keeps its old
//! state. `Reset` discards all entered data and cannot be undone, so the UI
//! confirms it with the auditor first.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::models::{CashBox, NewSession, SessionValidationError};
use crate::domain::reconciliation::{reconcile, Reconciliation};

/// Largest number of cash boxes in one session
pub const MAX_CASH_BOXES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Configuring,
    EnteringBoxes { index: usize },
    Validating,
    Summarizing,
    Reporting,
}

impl WizardStep {
    /// 1-based step number shown to the auditor
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Configuring => 1,
            WizardStep::EnteringBoxes { .. } => 2,
            WizardStep::Validating => 3,
            WizardStep::Summarizing => 4,
            WizardStep::Reporting => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Set the number of boxes; the date and auditor are only changed when given
    Configure {
        box_count: usize,
        session_date: Option<NaiveDate>,
        auditor_name: Option<String>,
    },
    Next,
    Back,
    Reset,
    UpdateBox { index: usize, cash_box: CashBox },
    SetAuditor { name: String },
    SetSessionDate { date: Option<NaiveDate> },
}

impl WizardAction {
    pub fn configure(box_count: usize) -> Self {
        WizardAction::Configure {
            box_count,
            session_date: None,
            auditor_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Box count must be between 1 and {max}, got {count}")]
    InvalidBoxCount { count: usize, max: usize },
    #[error("Box count can only be changed while configuring")]
    NotConfiguring,
    #[error("Configure at least one cash box before continuing")]
    NoCashBoxes,
    #[error("Cash box {index} does not exist ({len} configured)")]
    BoxIndexOutOfRange { index: usize, len: usize },
    #[error("Already at the first step")]
    AtFirstStep,
    #[error("Already at the last step")]
    AtLastStep,
    #[error("Unknown wizard step {0}")]
    InvalidStep(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub session_date: Option<NaiveDate>,
    pub auditor_name: String,
    pub cash_boxes: Vec<CashBox>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state received from a client, checking the step is reachable
    pub fn restore(
        step: WizardStep,
        session_date: Option<NaiveDate>,
        auditor_name: String,
        cash_boxes: Vec<CashBox>,
    ) -> Result<Self, WizardError> {
        if cash_boxes.len() > MAX_CASH_BOXES {
            return Err(WizardError::InvalidBoxCount {
                count: cash_boxes.len(),
                max: MAX_CASH_BOXES,
            });
        }
        match step {
            WizardStep::Configuring => {}
            _ if cash_boxes.is_empty() => return Err(WizardError::NoCashBoxes),
            WizardStep::EnteringBoxes { index } if index >= cash_boxes.len() => {
                return Err(WizardError::BoxIndexOutOfRange {
                    index,
                    len: cash_boxes.len(),
                });
            }
            _ => {}
        }
        Ok(Self {
            step,
            session_date,
            auditor_name,
            cash_boxes,
        })
    }

    /// Box being edited in step 2
    pub fn current_box(&self) -> Option<&CashBox> {
        match self.step {
            WizardStep::EnteringBoxes { index } => self.cash_boxes.get(index),
            _ => None,
        }
    }

    /// Running totals over the boxes entered so far
    pub fn summary(&self) -> Reconciliation {
        reconcile(&self.cash_boxes)
    }

    /// Turn the wizard data into a session ready to be saved.
    ///
    /// Every call produces a new session; avoiding double submission is up to
    /// the caller (or the idempotency key).
    pub fn finalize(&self, idempotency_key: Option<Uuid>) -> Result<NewSession, SessionValidationError> {
        let session_date = self
            .session_date
            .ok_or(SessionValidationError::MissingSessionDate)?;
        NewSession::finalize(session_date, &self.auditor_name, &self.cash_boxes, idempotency_key)
    }
}

/// Apply one action to a state
pub fn transition(state: &WizardState, action: WizardAction) -> Result<WizardState, WizardError> {
    let mut next = state.clone();
    match action {
        WizardAction::Reset => return Ok(WizardState::new()),
        WizardAction::Configure {
            box_count,
            session_date,
            auditor_name,
        } => {
            if state.step != WizardStep::Configuring {
                return Err(WizardError::NotConfiguring);
            }
            if box_count == 0 || box_count > MAX_CASH_BOXES {
                return Err(WizardError::InvalidBoxCount {
                    count: box_count,
                    max: MAX_CASH_BOXES,
                });
            }
            // Entered boxes survive a reconfiguration by position
            next.cash_boxes.resize_with(box_count, CashBox::blank);
            if let Some(date) = session_date {
                next.session_date = Some(date);
            }
            if let Some(name) = auditor_name {
                next.auditor_name = name;
            }
        }
        WizardAction::Next => {
            next.step = forward(state)?;
        }
        WizardAction::Back => {
            next.step = backward(state)?;
        }
        WizardAction::UpdateBox { index, cash_box } => {
            let len = next.cash_boxes.len();
            let slot = next
                .cash_boxes
                .get_mut(index)
                .ok_or(WizardError::BoxIndexOutOfRange { index, len })?;
            *slot = cash_box;
        }
        WizardAction::SetAuditor { name } => {
            next.auditor_name = name;
        }
        WizardAction::SetSessionDate { date } => {
            next.session_date = date;
        }
    }
    Ok(next)
}

fn forward(state: &WizardState) -> Result<WizardStep, WizardError> {
    let count = state.cash_boxes.len();
    match state.step {
        WizardStep::Configuring if count == 0 => Err(WizardError::NoCashBoxes),
        WizardStep::Configuring => Ok(WizardStep::EnteringBoxes { index: 0 }),
        WizardStep::EnteringBoxes { index } if index + 1 < count => {
            Ok(WizardStep::EnteringBoxes { index: index + 1 })
        }
        WizardStep::EnteringBoxes { .. } => Ok(WizardStep::Validating),
        WizardStep::Validating => Ok(WizardStep::Summarizing),
        WizardStep::Summarizing => Ok(WizardStep::Reporting),
        WizardStep::Reporting => Err(WizardError::AtLastStep),
    }
}

fn backward(state: &WizardState) -> Result<WizardStep, WizardError> {
    match state.step {
        WizardStep::Configuring => Err(WizardError::AtFirstStep),
        WizardStep::EnteringBoxes { index: 0 } => Ok(WizardStep::Configuring),
        WizardStep::EnteringBoxes { index } => Ok(WizardStep::EnteringBoxes { index: index - 1 }),
        WizardStep::Validating => match state.cash_boxes.len() {
            0 => Ok(WizardStep::Configuring),
            count => Ok(WizardStep::EnteringBoxes { index: count - 1 }),
        },
        WizardStep::Summarizing => Ok(WizardStep::Validating),
        WizardStep::Reporting => Ok(WizardStep::Summarizing),
    }
}
