//! Single-active-workflow guard.

use std::sync::Arc;

use parking_lot::Mutex;
use rastersketch_core::{ValidationError, WorkflowKind};

/// Shared slot that at most one workflow can hold at a time.
///
/// Cloning yields another handle onto the same slot.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGate {
    active: Arc<Mutex<Option<WorkflowKind>>>,
}

impl WorkflowGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `kind`.
    ///
    /// The returned ticket frees the slot when dropped, including when the
    /// workflow future holding it is dropped mid-await.
    pub fn try_enter(&self, kind: WorkflowKind) -> Result<WorkflowTicket, ValidationError> {
        let mut active = self.active.lock();
        if let Some(current) = *active {
            tracing::debug!("{} workflow refused, {} is running", kind, current);
            return Err(ValidationError::WorkflowBusy { active: current });
        }
        *active = Some(kind);
        Ok(WorkflowTicket {
            gate: self.clone(),
            kind,
        })
    }

    /// Fails with `WorkflowBusy` if a workflow holds the slot.
    pub fn ensure_idle(&self) -> Result<(), ValidationError> {
        match *self.active.lock() {
            Some(active) => Err(ValidationError::WorkflowBusy { active }),
            None => Ok(()),
        }
    }

    /// The workflow currently holding the slot.
    pub fn active(&self) -> Option<WorkflowKind> {
        *self.active.lock()
    }
}

/// Proof of holding the workflow slot.
#[derive(Debug)]
#[must_use = "the gate is released as soon as the ticket is dropped"]
pub struct WorkflowTicket {
    gate: WorkflowGate,
    kind: WorkflowKind,
}

impl WorkflowTicket {
    pub fn kind(&self) -> WorkflowKind {
        self.kind
    }
}

impl Drop for WorkflowTicket {
    fn drop(&mut self) {
        *self.gate.active.lock() = None;
    }
}
