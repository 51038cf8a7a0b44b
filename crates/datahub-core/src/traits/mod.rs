//! Collaborator traits defined in `datahub-core` and implemented by other
//! crates or by the embedding application.

pub mod authority;
pub mod clock;

pub use authority::{DenyAllKeys, PrivilegedKeyAuthority};
pub use clock::{Clock, FixedClock, SystemClock};
