//! Completion signals for running transitions

use tokio::sync::oneshot;

use crate::error::TransitionError;
use crate::Result;

/// Completion side of a transition.
///
/// Navigation never waits on this; hosts that need to run cleanup after the
/// animation settles can poll [`is_finished`](Self::is_finished) or await
/// [`wait`](Self::wait).
#[derive(Debug)]
pub struct TransitionHandle {
    receiver: Option<oneshot::Receiver<()>>,
    finished: bool,
}

/// Producer side, fired by the transition when its work is done.
#[derive(Debug)]
pub struct TransitionSignal {
    sender: oneshot::Sender<()>,
}

impl TransitionHandle {
    /// A handle for work that already finished synchronously
    pub fn completed() -> Self {
        Self {
            receiver: None,
            finished: true,
        }
    }

    pub fn pending() -> (Self, TransitionSignal) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                receiver: Some(receiver),
                finished: false,
            },
            TransitionSignal { sender },
        )
    }

    pub fn is_finished(&mut self) -> bool {
        if !self.finished {
            if let Some(receiver) = self.receiver.as_mut() {
                if receiver.try_recv().is_ok() {
                    self.finished = true;
                    self.receiver = None;
                }
            }
        }
        self.finished
    }

    /// Resolve once the transition signals completion.
    pub async fn wait(self) -> Result<()> {
        match self.receiver {
            Some(receiver) if !self.finished => {
                receiver.await.map_err(|_| TransitionError::Abandoned)
            }
            _ => Ok(()),
        }
    }
}

impl TransitionSignal {
    pub fn finish(self) {
        // The handle may have been dropped; nobody is waiting then
        let _ = self.sender.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_handle() {
        let mut handle = TransitionHandle::completed();
        assert!(handle.is_finished());
    }

    #[test]
    fn test_pending_until_signalled() {
        let (mut handle, signal) = TransitionHandle::pending();
        assert!(!handle.is_finished());

        signal.finish();
        assert!(handle.is_finished());
        // Stays finished once observed
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_wait_resolves_after_finish() {
        let (handle, signal) = TransitionHandle::pending();
        let waiter = tokio::spawn(handle.wait());

        signal.finish();
        assert_eq!(waiter.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_dropped_signal_is_abandoned() {
        let (handle, signal) = TransitionHandle::pending();
        drop(signal);

        assert_eq!(handle.wait().await, Err(TransitionError::Abandoned));
    }
}
