//! Delivery protocol between subscribers and the coordinator.
//!
//! ## Contents
//! - `handshake::pair` builds the request/offer pair behind every subscription
//! - `Puller` consumer half: request, then wait
//! - `Offerer` coordinator half: observe the request, offer without blocking
//!
//! See `core/coordinator.rs` for how a fan-out pass drives the offer side.

mod handshake;

pub(crate) use handshake::{Offerer, Puller, Readiness, pair};
