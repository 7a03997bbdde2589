use std::sync::Arc;

use crate::{NotifyError, Observable, Observer, ObserverId, UpdateError};

/// Gives a type the full observable API by delegating to an [`Observable`] it holds.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use observable::{Observable, Observer, Subject, UpdateError};
///
/// #[derive(Default)]
/// struct Ticker {
///     observers: Observable<u32>,
/// }
///
/// impl Subject<u32> for Ticker {
///     fn observable(&self) -> &Observable<u32> { &self.observers }
/// }
///
/// impl Ticker {
///     fn tick(&self, price: u32) {
///         self.changed(true);
///         self.notify_observers(&price).unwrap();
///     }
/// }
///
/// #[derive(Default)]
/// struct Last(Mutex<Option<u32>>);
///
/// impl Observer<u32> for Last {
///     fn update(&self, price: &u32) -> Result<(), UpdateError> {
///         *self.0.lock().unwrap() = Some(*price);
///         Ok(())
///     }
/// }
///
/// let ticker = Ticker::default();
/// let last = Arc::new(Last::default());
/// ticker.add_observer(&last);
/// ticker.tick(140);
/// assert_eq!(*last.0.lock().unwrap(), Some(140));
/// ```
pub trait Subject<E: 'static> {
    fn observable(&self) -> &Observable<E>;

    fn add_observer<W>(&self, target: &Arc<W>) -> ObserverId
    where W: Observer<E> + ?Sized + 'static {
        self.observable().add_observer(target)
    }

    fn add_observer_with<W, F>(&self, target: &Arc<W>, selector: F) -> ObserverId
    where
        W: ?Sized + Send + Sync + 'static,
        F: Fn(&W, &E) -> Result<(), UpdateError> + Send + Sync + 'static,
    {
        self.observable().add_observer_with(target, selector)
    }

    fn delete_observer<W: ?Sized>(&self, target: &Arc<W>) { self.observable().delete_observer(target) }

    fn delete_observers(&self) { self.observable().delete_observers() }

    fn count_observers(&self) -> usize { self.observable().count_observers() }

    fn changed(&self, state: bool) { self.observable().changed(state) }

    fn is_changed(&self) -> bool { self.observable().is_changed() }

    fn notify_observers(&self, event: &E) -> Result<(), NotifyError> { self.observable().notify_observers(event) }

    fn publish(&self, event: &E) -> Result<(), NotifyError> { self.observable().publish(event) }
}
