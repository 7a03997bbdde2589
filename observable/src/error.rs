use thiserror::Error;

/// The error an observer callback returns when it fails to handle an event
pub type UpdateError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum NotifyError {
    /// An observer callback failed. Observers after `position` were not called in that round.
    #[error("observer at position {position} failed: {source}")]
    Dispatch { position: usize, source: UpdateError },
}

impl NotifyError {
    /// Position (in registration order) of the observer that failed
    pub fn position(&self) -> usize {
        match self {
            NotifyError::Dispatch { position, .. } => *position,
        }
    }

    /// Unwraps the error returned by the failing observer
    pub fn into_source(self) -> UpdateError {
        match self {
            NotifyError::Dispatch { source, .. } => source,
        }
    }
}

/// Returned by channel observers whose receiving half has been dropped
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("observer channel is disconnected")]
pub struct Disconnected;
