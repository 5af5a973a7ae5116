//! # Granny Common
//!
//! Foundational types shared by the Granny House crates:
//! - Axis-aligned boxes and rays with a slab intersection test
//! - Id newtypes for run-scoped objects
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_prelude_exports() {
        let aabb = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.ray_distance(&ray).is_some());
        assert_eq!(ItemId::new(3).to_string(), "item-3");
    }

    #[test]
    fn test_error_conversion() {
        let err: GrannyError = LayoutError::NotEnoughSpawnSlots { items: 10, slots: 4 }.into();
        assert!(err.to_string().contains("10"));
    }
}
