use std::ops::RangeInclusive;

use glam::Vec3;

use crate::model::{BlockPosition, VoxelWorld};

/// Axis-aligned bounding box stored as center + half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self { center, half_extents }
    }

    /// The closed unit cube a block occupies.
    pub fn of_block(position: BlockPosition) -> Self {
        Self::new(position.center(), Vec3::splat(0.5))
    }

    /// Player volume for an eye-point `position`: `width` x `height` x `width`,
    /// hanging `height` below the eye.
    pub fn of_player(position: Vec3, width: f32, height: f32) -> Self {
        Self::new(
            Vec3::new(position.x, position.y - height / 2.0, position.z),
            Vec3::new(width / 2.0, height / 2.0, width / 2.0),
        )
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Strict overlap on all three axes; boxes sharing only a face, edge or
    /// corner do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x
            && a_min.y < b_max.y && a_max.y > b_min.y
            && a_min.z < b_max.z && a_max.z > b_min.z
    }
}

/// Range of integer cells whose unit cubes could overlap [min, max] on one axis.
fn cell_range(min: f32, max: f32) -> RangeInclusive<i32> {
    ((min - 0.5).floor() as i32)..=((max + 0.5).ceil() as i32)
}

fn cell_count(range: &RangeInclusive<i32>) -> u64 {
    (i64::from(*range.end()) - i64::from(*range.start()) + 1).max(0) as u64
}

/// Box-vs-world overlap queries.
///
/// Instead of scanning every block, only the handful of cells the query
/// box can touch are looked up in the world's position index. Each
/// candidate still goes through the exact strict-overlap test. When the
/// box spans more cells than the world holds blocks, the blocks are
/// scanned directly instead.
pub struct CollisionEngine;

impl CollisionEngine {
    pub fn intersects(aabb: &Aabb, world: &VoxelWorld) -> bool {
        Self::first_overlap(aabb, world).is_some()
    }

    /// First block whose cube strictly overlaps `aabb`, if any.
    pub fn first_overlap(aabb: &Aabb, world: &VoxelWorld) -> Option<BlockPosition> {
        let (min, max) = (aabb.min(), aabb.max());
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        let (xs, ys, zs) = (
            cell_range(min.x, max.x),
            cell_range(min.y, max.y),
            cell_range(min.z, max.z),
        );
        let candidates = cell_count(&xs)
            .saturating_mul(cell_count(&ys))
            .saturating_mul(cell_count(&zs));
        if candidates > world.len() as u64 {
            return world
                .all()
                .map(|block| block.position)
                .find(|&position| aabb.intersects(&Aabb::of_block(position)));
        }

        for y in ys {
            for z in zs.clone() {
                for x in xs.clone() {
                    let position = BlockPosition(x, y, z);
                    if world.is_occupied(position) && aabb.intersects(&Aabb::of_block(position)) {
                        return Some(position);
                    }
                }
            }
        }
        None
    }
}
