//! # Confirmation Gate
//!
//! Destructive actions (delete, reject, status toggles) go through a gate that holds
//! the target while the user is asked to confirm.
//!
//! ```text
//! Closed --trigger(t)--> PendingConfirmation(t) --confirm--> Executing(t) --settled--> Closed
//!                                 |
//!                                 +--cancel--> Closed
//! ```

use std::fmt::Debug;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState<T> {
    Closed,
    PendingConfirmation(T),
    Executing(T),
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    #[error("A confirmation is already pending")]
    AlreadyPending,

    #[error("The confirmed action is still running")]
    Busy,

    #[error("Nothing is awaiting confirmation")]
    NothingToConfirm,
}

impl<T> Default for GateState<T> {
    fn default() -> Self {
        GateState::Closed
    }
}

/// Holds at most one target awaiting confirmation.
#[derive(Debug)]
pub struct ConfirmationGate<T> {
    state: GateState<T>,
}

impl<T> Default for ConfirmationGate<T> {
    fn default() -> Self {
        Self {
            state: GateState::Closed,
        }
    }
}

impl<T: Clone + Debug> ConfirmationGate<T> {
    pub fn new() -> Self {
        Self {
            state: GateState::Closed,
        }
    }

    pub fn state(&self) -> &GateState<T> {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, GateState::Closed)
    }

    /// The row the gate is currently about, if any.
    pub fn target(&self) -> Option<&T> {
        match &self.state {
            GateState::Closed => None,
            GateState::PendingConfirmation(t) | GateState::Executing(t) => Some(t),
        }
    }

    /// Asks for confirmation on `target`.
    pub fn trigger(&mut self, target: T) -> Result<(), GateError> {
        match self.state {
            GateState::Closed => {
                self.state = GateState::PendingConfirmation(target);
                Ok(())
            }
            GateState::PendingConfirmation(_) => Err(GateError::AlreadyPending),
            GateState::Executing(_) => Err(GateError::Busy),
        }
    }

    /// Dismisses a pending confirmation. Returns the dropped target.
    pub fn cancel(&mut self) -> Result<T, GateError> {
        match std::mem::take(&mut self.state) {
            GateState::PendingConfirmation(target) => Ok(target),
            GateState::Executing(target) => {
                self.state = GateState::Executing(target);
                Err(GateError::Busy)
            }
            GateState::Closed => Err(GateError::NothingToConfirm),
        }
    }

    /// Moves a pending confirmation to `Executing` and hands back its target.
    pub fn begin(&mut self) -> Result<T, GateError> {
        match &self.state {
            GateState::PendingConfirmation(target) => {
                let target = target.clone();
                self.state = GateState::Executing(target.clone());
                Ok(target)
            }
            GateState::Executing(_) => Err(GateError::Busy),
            GateState::Closed => Err(GateError::NothingToConfirm),
        }
    }

    /// Closes the gate after the confirmed action settled.
    pub fn finish(&mut self) {
        self.state = GateState::Closed;
    }

    /// Confirms and runs `action` on the target. The gate is closed afterwards
    /// whatever the action returned, and also if the returned future is dropped.
    pub async fn confirm<F, Fut, R>(&mut self, action: F) -> Result<R, GateError>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let target = self.begin()?;
        let _close = CloseOnDrop(&mut self.state);
        Ok(action(target).await)
    }
}

struct CloseOnDrop<'a, T>(&'a mut GateState<T>);

impl<T> Drop for CloseOnDrop<'_, T> {
    fn drop(&mut self) {
        *self.0 = GateState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_then_cancel_has_no_effect() {
        let mut gate = ConfirmationGate::new();
        gate.trigger("C100").unwrap();
        assert_eq!(gate.target(), Some(&"C100"));

        assert_eq!(gate.cancel(), Ok("C100"));
        assert!(gate.is_closed());
    }

    #[test]
    fn only_one_pending_confirmation() {
        let mut gate = ConfirmationGate::new();
        gate.trigger(1).unwrap();
        assert_eq!(gate.trigger(2), Err(GateError::AlreadyPending));
        assert_eq!(gate.target(), Some(&1));
    }

    #[test]
    fn confirm_without_trigger_is_rejected() {
        let mut gate = ConfirmationGate::<u32>::new();
        assert_eq!(gate.begin(), Err(GateError::NothingToConfirm));
        assert_eq!(gate.cancel(), Err(GateError::NothingToConfirm));
    }

    #[test]
    fn executing_cannot_be_cancelled_or_retriggered() {
        let mut gate = ConfirmationGate::new();
        gate.trigger("row").unwrap();
        assert_eq!(gate.begin(), Ok("row"));
        assert_eq!(gate.state(), &GateState::Executing("row"));

        assert_eq!(gate.cancel(), Err(GateError::Busy));
        assert_eq!(gate.trigger("other"), Err(GateError::Busy));
        assert_eq!(gate.state(), &GateState::Executing("row"));

        gate.finish();
        assert!(gate.is_closed());
    }

    #[tokio::test]
    async fn confirm_runs_once_and_closes_on_failure() {
        let mut gate = ConfirmationGate::new();
        gate.trigger("C100".to_string()).unwrap();

        let mut seen = Vec::new();
        let result: Result<Result<(), String>, GateError> = gate
            .confirm(|id| {
                seen.push(id);
                async { Err("backend down".to_string()) }
            })
            .await;

        assert_eq!(result, Ok(Err("backend down".to_string())));
        assert_eq!(seen, vec!["C100".to_string()]);
        assert!(gate.is_closed());
    }
}
