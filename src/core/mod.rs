//! Runtime core: the hub and its coordinator.
//!
//! The only public API from this module is [`Hub`], which accepts publish and
//! subscribe requests and hands them to a coordinator task.
//!
//! Internal modules:
//! - [`coordinator`]: single task owning the live set, replay history and delivery;
//! - [`hub`]: public handle, request hand-off and lifecycle.

mod coordinator;
mod hub;

pub use hub::Hub;
