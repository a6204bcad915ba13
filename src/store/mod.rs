//! Session persistence: where the onboarding outcome is handed off.

pub mod memory;
pub mod traits;

pub use memory::MemorySessionStore;
pub use traits::SessionStore;
