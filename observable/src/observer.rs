use std::sync::Arc;

use crate::error::{Disconnected, UpdateError};

/// An Observer receives the events delivered by an [`Observable`](crate::Observable).
///
/// `update` is the callback invoked for observers registered with
/// [`Observable::add_observer`](crate::Observable::add_observer). Observers registered with
/// [`Observable::add_observer_with`](crate::Observable::add_observer_with) need not implement
/// this trait at all.
pub trait Observer<E>: Send + Sync {
    fn update(&self, event: &E) -> Result<(), UpdateError>;
}

/// Identity of a registered observer, derived from the address of its `Arc` allocation.
/// Two handles compare equal only if they point to the same observer.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObserverId(usize);

impl ObserverId {
    pub fn of<W: ?Sized>(target: &Arc<W>) -> Self { ObserverId(Arc::as_ptr(target) as *const () as usize) }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

// Observer implementations for channel senders - each event is cloned into the channel

impl<E> Observer<E> for std::sync::mpsc::Sender<E>
where E: Clone + Send
{
    fn update(&self, event: &E) -> Result<(), UpdateError> { self.send(event.clone()).map_err(|_| Disconnected.into()) }
}

#[cfg(feature = "tokio")]
impl<E> Observer<E> for tokio::sync::mpsc::UnboundedSender<E>
where E: Clone + Send
{
    fn update(&self, event: &E) -> Result<(), UpdateError> { self.send(event.clone()).map_err(|_| Disconnected.into()) }
}
