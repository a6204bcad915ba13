//! Declarative field validation for the login and registration forms.
//!
//! A `FormSchema` maps field names to ordered rule chains. `FormState` holds
//! the live values, touched/dirty flags and derived errors, and decides which
//! errors are visible.

pub mod engine;
pub mod rules;
pub mod schemas;
pub mod value;

pub use engine::{FieldSpec, FieldState, FormSchema, FormState, SubmissionStatus};
pub use rules::Rule;
pub use value::{FieldErrors, FieldValue, FormValues};
