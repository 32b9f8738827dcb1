//! AI systems (strategic layer logic)

pub mod brain;
pub mod patrol;

// Re-export all systems
pub use brain::*;
pub use patrol::*;
