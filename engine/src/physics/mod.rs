//! Physics module
//!
//! Player-vs-maze collision on the horizontal plane. No rigid bodies, no
//! gravity: the player is a circle and walls are the square footprints of
//! solid cells.
//!
//! # Submodules
//!
//! - [`types`] - Rectangle and resolution result types
//! - [`collision`] - Circle-vs-rectangle test and the per-frame resolver

pub mod collision;
pub mod types;

pub use collision::{CollisionResolver, check_collision_circle_rec};
pub use types::{CollisionOutcome, Rectangle, to_plane};
