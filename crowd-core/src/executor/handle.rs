//! Blocking handle for a submitted task.

use std::{any::Any, sync::mpsc};

use super::error::PoolError;

pub(super) type TaskOutcome<T> = Result<T, Box<dyn Any + Send + 'static>>;

/// Handle to a task queued with [`super::TaskPool::submit`].
///
/// Dropping the handle does not cancel the task; it still runs to completion
/// and its result is discarded.
#[derive(Debug)]
#[must_use = "a task handle does nothing unless joined"]
pub struct TaskHandle<T> {
    receiver: mpsc::Receiver<TaskOutcome<T>>,
}

impl<T> TaskHandle<T> {
    pub(super) fn new(receiver: mpsc::Receiver<TaskOutcome<T>>) -> Self {
        Self { receiver }
    }

    /// Blocks until the task finishes and returns its result.
    ///
    /// # Errors
    /// Returns [`PoolError::TaskPanicked`] when the task panicked and
    /// [`PoolError::ResultLost`] when it was dropped without running.
    pub fn join(self) -> Result<T, PoolError> {
        match self.receiver.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(PoolError::TaskPanicked {
                message: panic_message(payload.as_ref()),
            }),
            Err(mpsc::RecvError) => Err(PoolError::ResultLost),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("non-string panic payload")
    }
}
