use glam::IVec3;

use super::collision::Aabb;
use crate::model::{BlockPosition, Camera, Material, RayHit, VoxelWorld};

/// Which edit the player asked for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    Place,
    Remove,
}

/// Outcome of one targeting query; applied to the world and then dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetResult {
    Placement {
        position: BlockPosition,
        face_normal: IVec3,
        material: Material,
    },
    Removal {
        position: BlockPosition,
    },
}

impl TargetResult {
    pub fn position(&self) -> BlockPosition {
        match *self {
            TargetResult::Placement { position, .. } | TargetResult::Removal { position } => {
                position
            }
        }
    }

    /// Applies the edit. False when the world rejected it (occupied/empty cell).
    pub fn apply(&self, world: &mut VoxelWorld) -> bool {
        match *self {
            TargetResult::Placement { position, material, .. } => world.place(position, material),
            TargetResult::Removal { position } => world.remove(position),
        }
    }
}

/// Supplies the nearest ray/block hit for the current view, or nothing.
pub trait RaycastProvider {
    fn cast(&self, world: &VoxelWorld) -> Option<RayHit>;
}

impl RaycastProvider for Camera {
    fn cast(&self, world: &VoxelWorld) -> Option<RayHit> {
        self.raycast(world, self.reach)
    }
}

/// Maps a pointed-at surface to the cell to fill or clear.
///
/// Does no ray math of its own; distance ordering is the raycast provider's job.
#[derive(Clone, Copy, Debug)]
pub struct Targeting {
    pub placement_material: Material,
}

impl Default for Targeting {
    fn default() -> Self {
        Self { placement_material: Material::Dirt }
    }
}

impl Targeting {
    pub fn new(placement_material: Material) -> Self {
        Self { placement_material }
    }

    pub fn resolve(
        &self,
        hit: Option<&RayHit>,
        action: EditAction,
        player: &Aabb,
    ) -> Option<TargetResult> {
        let hit = hit?;
        match action {
            EditAction::Place => {
                let position = placement_cell(hit);
                if Aabb::of_block(position).intersects(player) {
                    tracing::debug!(?position, "placement rejected, would bury the player");
                    return None;
                }
                Some(TargetResult::Placement {
                    position,
                    face_normal: hit.normal,
                    material: self.placement_material,
                })
            }
            EditAction::Remove => Some(TargetResult::Removal { position: hit.block }),
        }
    }
}

/// Cell sharing the hit face, one step from the hit block along the outward normal.
pub fn placement_cell(hit: &RayHit) -> BlockPosition {
    hit.block.offset(hit.normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn hit(point: Vec3, normal: IVec3, block: BlockPosition) -> RayHit {
        RayHit { point, normal, block, distance: 1.0 }
    }

    fn far_away_player() -> Aabb {
        Aabb::of_player(Vec3::new(100.0, 100.0, 100.0), 1.0, 1.8)
    }

    #[test]
    fn test_placement_cell_on_top_face() {
        let h = hit(Vec3::new(0.5, 1.0, 0.5), IVec3::Y, BlockPosition(0, 0, 0));
        let result = Targeting::default().resolve(Some(&h), EditAction::Place, &far_away_player());

        assert_eq!(
            result,
            Some(TargetResult::Placement {
                position: BlockPosition(0, 1, 0),
                face_normal: IVec3::Y,
                material: Material::Dirt,
            })
        );
    }

    #[test]
    fn test_no_hit_is_no_target() {
        let targeting = Targeting::default();
        assert!(targeting.resolve(None, EditAction::Place, &far_away_player()).is_none());
        assert!(targeting.resolve(None, EditAction::Remove, &far_away_player()).is_none());
    }

    #[test]
    fn test_placement_inside_player_is_rejected() {
        // player eye at (0, 2.8, 0): box spans y [1.0, 2.8]
        let player = Aabb::of_player(Vec3::new(0.0, 2.8, 0.0), 1.0, 1.8);
        let h = hit(Vec3::new(0.2, 1.0, 0.2), IVec3::Y, BlockPosition(0, 0, 0));
        assert!(Targeting::default().resolve(Some(&h), EditAction::Place, &player).is_none());

        // same hit, player moved clear
        let player = Aabb::of_player(Vec3::new(3.0, 2.8, 0.0), 1.0, 1.8);
        assert!(Targeting::default().resolve(Some(&h), EditAction::Place, &player).is_some());
    }

    #[test]
    fn test_removal_targets_hit_block() {
        // even when the block overlaps the player, removal is always valid
        let player = Aabb::of_player(Vec3::new(0.0, 1.0, 0.0), 1.0, 1.8);
        let h = hit(Vec3::new(0.1, 0.5, 0.1), IVec3::Y, BlockPosition(0, 0, 0));
        assert_eq!(
            Targeting::default().resolve(Some(&h), EditAction::Remove, &player),
            Some(TargetResult::Removal { position: BlockPosition(0, 0, 0) })
        );
    }

    #[test]
    fn test_apply_edits_world() {
        let mut world = VoxelWorld::new();
        let place = TargetResult::Placement {
            position: BlockPosition(1, 1, 1),
            face_normal: IVec3::X,
            material: Material::Stone,
        };
        assert!(place.apply(&mut world));
        assert!(!place.apply(&mut world));
        assert_eq!(world.len(), 1);

        let remove = TargetResult::Removal { position: place.position() };
        assert!(remove.apply(&mut world));
        assert!(!remove.apply(&mut world));
        assert!(world.is_empty());
    }

    #[test]
    fn test_side_face_placement() {
        // hit point on the lower half of the face still lands on the direct neighbour
        let h = hit(Vec3::new(2.5, 0.3, 0.6), IVec3::X, BlockPosition(2, 0, 1));
        let result = Targeting::new(Material::Grass)
            .resolve(Some(&h), EditAction::Place, &far_away_player())
            .map(|r| r.position());
        assert_eq!(result, Some(BlockPosition(3, 0, 1)));
    }

    #[test]
    fn test_negative_face_placement_does_not_skip_a_cell() {
        let h = hit(Vec3::new(-0.5, 0.0, 0.0), IVec3::NEG_X, BlockPosition(0, 0, 0));
        assert_eq!(placement_cell(&h), BlockPosition(-1, 0, 0));

        let h = hit(Vec3::new(0.1, -0.5, -0.2), IVec3::NEG_Y, BlockPosition(0, 0, 0));
        assert_eq!(placement_cell(&h), BlockPosition(0, -1, 0));
    }
}
