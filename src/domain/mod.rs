//! Domain layer - Bounded contexts and shared primitives.

pub mod enrollment;
pub mod foundation;
