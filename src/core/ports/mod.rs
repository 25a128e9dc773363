//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core logic and the outside
//! world: byte storage, the dataset location, and the clock.
//!
//! Implementations live in the `adapters` module.

mod clock;
mod dataset_source;
mod key_value_store;

pub use clock::{Clock, SystemClock};
pub use dataset_source::{DatasetSource, LoadError};
pub use key_value_store::{KeyValueStore, StoreError};
