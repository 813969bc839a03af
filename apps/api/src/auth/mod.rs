// Passwordless sign-in: one-time 6-digit codes delivered out-of-band,
// exchanged for a server-side bearer session.

pub mod code;
pub mod delivery;
pub mod extract;
pub mod handlers;
pub mod service;
pub mod session;
