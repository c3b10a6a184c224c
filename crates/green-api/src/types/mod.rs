//! Wire types for the Green-API gateway.

pub mod notification;
pub mod send;

pub use notification::*;
pub use send::*;
