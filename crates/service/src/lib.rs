//! Service layer holding the todo item business rules.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Expected outcomes are enums; only storage failures are errors.

pub mod todo;
#[cfg(test)]
pub mod test_support;
