/*!
A composable observer primitive.

An [`Observable`] keeps an ordered list of observers and a "changed" flag. The owner marks
itself changed when something worth reporting happens, then calls
[`Observable::notify_observers`]; observers are only called if the flag is set, and the flag is
cleared by every notification round.

# Design
- Composition, not inheritance: a producer holds an `Observable<E>` field and may implement
  [`Subject`] to expose the observable API directly.
- The event type `E` is chosen by the producer. Observers receive `&E`.
- The callback is bound at registration time, either [`Observer::update`] or any method with a
  matching signature ([`Observable::add_observer_with`]), so a target that cannot receive the
  event is rejected by the compiler.
- Observers are identified by their `Arc` allocation and held weakly: a registration never
  keeps its observer alive, and a dropped observer is skipped and forgotten. Registering the
  same observer twice creates two independent registrations; deleting it removes both.
- Delivery is synchronous, in registration order, from a snapshot of the list. The first
  observer error aborts the round and is returned to the caller.

# Basic usage

```rust
use std::sync::{Arc, Mutex};
use observable::{Observable, Observer, UpdateError};

#[derive(Default)]
struct Tally(Mutex<Vec<u32>>);

impl Observer<u32> for Tally {
    fn update(&self, price: &u32) -> Result<(), UpdateError> {
        self.0.lock().unwrap().push(*price);
        Ok(())
    }
}

let prices = Observable::<u32>::new();
let tally = Arc::new(Tally::default());
prices.add_observer(&tally);

// not marked as changed, so nothing is delivered
prices.notify_observers(&60).unwrap();

prices.changed(true);
prices.notify_observers(&100).unwrap();
assert_eq!(*tally.0.lock().unwrap(), [100]);
assert!(!prices.is_changed());
```
*/

mod error;
mod observable;
mod observer;
mod subject;

pub use error::*;
pub use observable::*;
pub use observer::*;
pub use subject::*;
