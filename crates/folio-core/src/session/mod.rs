//! Session domain module.
//!
//! A session is a single claimed username shared by everything that uses the
//! same storage scope. There is no password, token or expiry: logging in is an
//! identity claim, not authentication. Anything downstream that needs real
//! authentication must add it explicitly rather than rely on this.

mod model;

pub use model::{LoginKind, Session};
