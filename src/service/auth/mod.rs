//! Authorization: effective-policy resolution and the gate.

pub mod authorization;

pub use authorization::AuthorizationService;
