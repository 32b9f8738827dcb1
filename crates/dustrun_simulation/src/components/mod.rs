//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: Enemy, Player, Health
//! - movement: NavAgent + PathStatus (контракт с locomotion driver)
//! - world: BodyCollider (LOS raycasts), PatrolMarker
//!
//! AI-состояние врага (EnemyState, PursuitMemory, ...) живёт в `crate::ai`.

pub mod actor;
pub mod movement;
pub mod world;

pub use actor::*;
pub use movement::*;
pub use world::*;
