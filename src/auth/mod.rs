//! Auth backend collaborator: receives credentials once a form submits.

pub mod backend;
pub mod memory;

pub use backend::{AuthBackend, LoginCredentials, Registration};
pub use memory::InMemoryAuthBackend;
