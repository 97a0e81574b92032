//! Operator sources. Each one wraps an upstream source and implements
//! `Subscribeable` itself; `ObservableExt` is the chaining front end.
mod filter;
mod join;
mod map;
mod merge_map;
mod skip;
mod take;
mod tap;

pub use filter::Filter;
pub use join::Join;
pub use map::Map;
pub use merge_map::MergeMap;
pub use skip::Skip;
pub use take::Take;
pub use tap::{Tap, TapObserver};
