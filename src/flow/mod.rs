//! Request coordinators.
//!
//! Each coordinator is a short, sequential pipeline: validate the request,
//! call the external collaborators through their seams, and map every
//! outcome into the boundary taxonomy ([`crate::error::ApiError`]).
//!
//! - [`SignupCoordinator`]: validate → create account → conditional profile
//!   write, with explicit partial-failure semantics between the two writes.
//! - [`LoginCoordinator`]: presence check → authenticate. No persistence,
//!   no reconciliation.
//!
//! Collaborators are constructor-injected, so tests drive the coordinators
//! (and the handlers above them) with in-memory fakes.

mod login;
mod signup;

pub use login::{LoginCoordinator, LoginRequest};
pub use signup::{CreatedAccount, SignupCoordinator, SignupRequest};
