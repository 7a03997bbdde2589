use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace, warn};

use crate::error::{NotifyError, UpdateError};
use crate::observer::{Observer, ObserverId};

/// Returns `None` once the target has been dropped
type Callback<E> = Arc<dyn Fn(&E) -> Option<Result<(), UpdateError>> + Send + Sync>;

/// A registered observer: the target's identity plus the callback bound at registration time.
/// The entry only holds a weak reference to the target.
struct Entry<E> {
    id: ObserverId,
    callback: Callback<E>,
    live: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl<E> Clone for Entry<E> {
    fn clone(&self) -> Self { Self { id: self.id, callback: self.callback.clone(), live: self.live.clone() } }
}

impl<E> Entry<E> {
    fn is_live(&self) -> bool { (self.live)() }
}

/// Tracks a list of observers and delivers events of type `E` to them once the
/// owner has marked itself as changed.
///
/// Observers are held weakly: a registration never keeps its observer alive, and an observer
/// that has been dropped is skipped and forgotten. Clones share the same observer list and
/// changed flag.
pub struct Observable<E>(Arc<Inner<E>>);

struct Inner<E> {
    observers: RwLock<Vec<Entry<E>>>,
    changed: AtomicBool,
}

impl<E> Clone for Observable<E> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<E> Default for Observable<E> {
    fn default() -> Self { Self::new() }
}

impl<E> std::fmt::Debug for Observable<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable").field("observers", &self.count_observers()).field("changed", &self.is_changed()).finish()
    }
}

impl<E> Observable<E> {
    /// Creates an observable with no observers and the changed flag cleared
    pub fn new() -> Self { Self(Arc::new(Inner { observers: RwLock::new(Vec::new()), changed: AtomicBool::new(false) })) }

    /// Removes every registration of `target`, whichever callback it was registered with
    pub fn delete_observer<W: ?Sized>(&self, target: &Arc<W>) { self.delete_observer_id(ObserverId::of(target)) }

    /// Removes every registration whose target has the given identity
    pub fn delete_observer_id(&self, id: ObserverId) {
        let mut observers = self.write();
        let before = observers.len();
        observers.retain(|entry| entry.id != id);
        trace!("Observable removed {} registration(s) of observer {}", before - observers.len(), id);
    }

    /// Removes all observers
    pub fn delete_observers(&self) {
        self.write().clear();
        trace!("Observable removed all observers");
    }

    /// Number of registrations whose observer is still alive. An observer registered twice counts twice.
    pub fn count_observers(&self) -> usize { self.read().iter().filter(|entry| entry.is_live()).count() }

    /// Sets the changed flag. `changed(false)` discards a pending notification.
    pub fn changed(&self, state: bool) { self.0.changed.store(state, Ordering::SeqCst) }

    /// Whether a notification is pending. Never modifies the flag.
    pub fn is_changed(&self) -> bool { self.0.changed.load(Ordering::SeqCst) }

    /// Delivers `event` to every observer if the changed flag is set, then leaves the flag cleared.
    ///
    /// Observers are called in registration order from a snapshot of the list taken when the
    /// round starts, so observers added during the round are not called until the next one and
    /// observers deleted during the round are still called in this one. The flag is cleared
    /// before the first observer is called, which lets an observer mark the observable changed
    /// and notify again.
    ///
    /// Stops at the first observer that returns an error. The remaining observers of the round
    /// are not called.
    pub fn notify_observers(&self, event: &E) -> Result<(), NotifyError> {
        if !self.is_changed() {
            trace!("Observable not changed, skipping notification");
            return Ok(());
        }

        // no lock may be held while observers run
        let snapshot: Vec<Entry<E>> = self.read().clone();
        // test and clear in one step so a concurrent `changed(true)` is never lost
        if !self.0.changed.swap(false, Ordering::SeqCst) {
            trace!("Observable notification already consumed");
            return Ok(());
        }

        debug!("Observable notifying {} observer(s)", snapshot.len());
        let mut dropped = 0;
        for (position, entry) in snapshot.iter().enumerate() {
            match (entry.callback)(event) {
                Some(Ok(())) => {}
                Some(Err(source)) => {
                    warn!("Observer {} at position {} failed, aborting notification: {}", entry.id, position, source);
                    self.prune();
                    return Err(NotifyError::Dispatch { position, source });
                }
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            trace!("Observable skipped {} dropped observer(s)", dropped);
            self.prune();
        }
        Ok(())
    }

    /// Marks the observable changed and notifies observers of `event`
    pub fn publish(&self, event: &E) -> Result<(), NotifyError> {
        self.changed(true);
        self.notify_observers(event)
    }

    /// Forgets registrations whose observer has been dropped
    fn prune(&self) { self.write().retain(|entry| entry.is_live()) }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry<E>>> { self.0.observers.read().unwrap_or_else(PoisonError::into_inner) }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry<E>>> { self.0.observers.write().unwrap_or_else(PoisonError::into_inner) }
}

impl<E: 'static> Observable<E> {
    /// Registers `target` to have [`Observer::update`] called on every notification
    pub fn add_observer<W>(&self, target: &Arc<W>) -> ObserverId
    where W: Observer<E> + ?Sized + 'static {
        self.add_observer_with(target, W::update)
    }

    /// Registers `target` to have `selector` called on every notification instead of
    /// [`Observer::update`]. Any method with a matching signature works as a selector:
    ///
    /// ```rust
    /// use std::sync::{Arc, Mutex};
    /// use observable::{Observable, UpdateError};
    ///
    /// #[derive(Default)]
    /// struct Log(Mutex<Vec<String>>);
    ///
    /// impl Log {
    ///     fn record(&self, line: &String) -> Result<(), UpdateError> {
    ///         self.0.lock().unwrap().push(line.clone());
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let lines = Observable::<String>::new();
    /// let log = Arc::new(Log::default());
    /// lines.add_observer_with(&log, Log::record);
    ///
    /// lines.publish(&"started".to_string()).unwrap();
    /// assert_eq!(*log.0.lock().unwrap(), ["started"]);
    /// ```
    pub fn add_observer_with<W, F>(&self, target: &Arc<W>, selector: F) -> ObserverId
    where
        W: ?Sized + Send + Sync + 'static,
        F: Fn(&W, &E) -> Result<(), UpdateError> + Send + Sync + 'static,
    {
        // the weak reference also keeps the address reserved, so the id stays unique
        let id = ObserverId::of(target);
        let weak = Arc::downgrade(target);
        let live = {
            let weak = weak.clone();
            Arc::new(move || weak.strong_count() > 0)
        };
        let callback: Callback<E> = Arc::new(move |event: &E| weak.upgrade().map(|target| selector(&*target, event)));

        let mut observers = self.write();
        observers.retain(|entry| entry.is_live());
        observers.push(Entry { id, callback, live });
        trace!("Observable added observer {} ({} registered)", id, observers.len());
        id
    }
}
