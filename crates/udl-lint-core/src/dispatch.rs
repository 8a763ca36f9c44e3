//! Handing finished requests back to their owner.

use crate::error::DispatchError;
use crate::request::LintRequest;
use std::sync::mpsc;

/// Delivers a finished request to the thread that owns its document.
pub trait ResultDispatcher: Send + Sync {
    /// Schedules `request` on the owning thread.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DocumentGone`] if the owner no longer exists.
    fn dispatch(&self, request: LintRequest) -> Result<(), DispatchError>;
}

impl<F> ResultDispatcher for F
where
    F: Fn(LintRequest) -> Result<(), DispatchError> + Send + Sync,
{
    fn dispatch(&self, request: LintRequest) -> Result<(), DispatchError> {
        self(request)
    }
}

/// Sends finished requests over a channel.
///
/// The owning thread drains the paired receiver. Dropping the receiver
/// makes every later dispatch fail with [`DispatchError::DocumentGone`].
#[derive(Debug)]
pub struct ChannelDispatcher {
    sender: mpsc::Sender<LintRequest>,
}

impl ChannelDispatcher {
    /// Creates a dispatcher and the receiver for the owning thread.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<LintRequest>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl ResultDispatcher for ChannelDispatcher {
    fn dispatch(&self, request: LintRequest) -> Result<(), DispatchError> {
        self.sender
            .send(request)
            .map_err(|_| DispatchError::DocumentGone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_to_receiver() {
        let (dispatcher, rx) = ChannelDispatcher::new();
        dispatcher
            .dispatch(LintRequest::new("u", "Text", "x"))
            .expect("receiver alive");
        assert_eq!(rx.try_recv().expect("delivered").uid, "u");
    }

    #[test]
    fn dropped_receiver_means_document_gone() {
        let (dispatcher, rx) = ChannelDispatcher::new();
        drop(rx);
        let err = dispatcher
            .dispatch(LintRequest::new("u", "Text", "x"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::DocumentGone));
    }

    #[test]
    fn closures_are_dispatchers() {
        let d = |_: LintRequest| -> Result<(), DispatchError> {
            Err(DispatchError::Failed {
                message: "ui busy".into(),
            })
        };
        assert!(d.dispatch(LintRequest::new("u", "Text", "")).is_err());
    }
}
