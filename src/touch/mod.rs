mod bridge;
mod event;
mod tracker;

pub use bridge::{TouchBridge, TouchHandle, TouchSink};
pub use event::{TouchEvent, TouchPhase};
pub use tracker::ContactTracker;
