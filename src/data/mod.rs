//! Database repository layer.
//!
//! Repository structs handle database operations for each domain entity.
//! Repositories use SeaORM entity models internally and return domain models
//! to maintain separation between the data layer and business logic layer.

pub mod guild;
pub mod member;

#[cfg(test)]
mod test;
