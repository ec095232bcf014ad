use glam::Vec3;
use serde::Deserialize;

use super::collision::{Aabb, CollisionEngine};
use crate::config::PhysicsConfig;
use crate::model::{MoveIntent, PlayerState, VoxelWorld};

/// What a vertical collision undoes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingRollback {
    /// Restore the whole pre-tick position, dropping this tick's horizontal progress.
    #[default]
    Full,
    /// Restore only y; horizontal progress survives unless it alone still overlaps.
    Vertical,
}

/// Handles player physics (gravity, collision, jumping) on a fixed tick.
///
/// Each tick resolves x and z independently against the pre-tick position,
/// which lets the player slide along walls, then commits y and rolls back
/// on overlap. A hard floor keeps the eye at or above `player_height`.
pub struct PlayerController {
    state: PlayerState,
    pub config: PhysicsConfig,
}

impl PlayerController {
    pub fn new(spawn: Vec3, config: PhysicsConfig) -> Self {
        Self {
            state: PlayerState::new(spawn),
            config,
        }
    }

    pub fn with_landing(mut self, landing: LandingRollback) -> Self {
        self.config.landing = landing;
        self
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    /// Current collision volume.
    pub fn bounding_box(&self) -> Aabb {
        self.box_at(self.state.position)
    }

    fn box_at(&self, position: Vec3) -> Aabb {
        Aabb::of_player(position, self.config.player_width, self.config.player_height)
    }

    fn collides(&self, position: Vec3, world: &VoxelWorld) -> bool {
        CollisionEngine::intersects(&self.box_at(position), world)
    }

    /// Advance one tick.
    pub fn update(&mut self, intent: &MoveIntent, world: &VoxelWorld) {
        let start = self.state.position;
        let was_grounded = self.state.grounded;

        if intent.jump_requested && self.state.grounded {
            self.state.velocity.y = self.config.jump_impulse;
            self.state.grounded = false;
            tracing::trace!(impulse = self.config.jump_impulse, "jump");
        }

        let (dir_x, dir_z) = intent.horizontal_direction();
        self.state.velocity.x = dir_x * self.config.move_speed;
        self.state.velocity.z = dir_z * self.config.move_speed;
        self.state.velocity.y -= self.config.gravity;

        // X: probe from the pre-tick position
        let tentative = Vec3::new(start.x + self.state.velocity.x, start.y, start.z);
        if !self.collides(tentative, world) {
            self.state.position.x = tentative.x;
        }

        // Z: forward intent moves toward -Z; probed at the pre-tick x
        let tentative = Vec3::new(start.x, start.y, start.z - self.state.velocity.z);
        if !self.collides(tentative, world) {
            self.state.position.z = tentative.z;
        }

        // Y: commit first, then roll back on overlap
        self.state.position.y += self.state.velocity.y;
        self.state.grounded = false;
        if self.collides(self.state.position, world) {
            match self.config.landing {
                LandingRollback::Full => self.state.position = start,
                LandingRollback::Vertical => {
                    self.state.position.y = start.y;
                    if self.collides(self.state.position, world) {
                        self.state.position = start;
                    }
                }
            }
            self.state.velocity.y = 0.0;
            self.state.grounded = true;
        }

        if self.state.position.y < self.config.player_height {
            self.state.position.y = self.config.player_height;
            self.state.velocity.y = 0.0;
            self.state.grounded = true;
        }

        if was_grounded != self.state.grounded {
            tracing::debug!(
                grounded = self.state.grounded,
                position = ?self.state.position,
                "player grounded state changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::world::{generate, BlockPosition, Material, TerrainGenerator};

    fn controller_at(x: f32, y: f32, z: f32) -> PlayerController {
        PlayerController::new(Vec3::new(x, y, z), PhysicsConfig::default())
    }

    fn floor_world(size: i32) -> VoxelWorld {
        let mut world = VoxelWorld::new();
        for x in -size..=size {
            for z in -size..=size {
                world.place(BlockPosition(x, 0, z), Material::Stone);
            }
        }
        world
    }

    fn assert_not_penetrating(player: &PlayerController, world: &VoxelWorld) {
        assert!(
            !CollisionEngine::intersects(&player.bounding_box(), world),
            "player overlaps a block at {:?}",
            player.position()
        );
    }

    #[test]
    fn test_floor_clamp() {
        let world = VoxelWorld::new();
        let mut player = controller_at(0.0, 3.0, 0.0);
        player.state.velocity.y = -10.0;

        player.update(&MoveIntent::default(), &world);

        assert_eq!(player.position().y, 1.8);
        assert_eq!(player.state().velocity.y, 0.0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_starts_airborne_and_falls() {
        let world = VoxelWorld::new();
        let mut player = controller_at(0.0, 10.0, 0.0);
        assert!(!player.is_grounded());

        player.update(&MoveIntent::default(), &world);
        assert!(!player.is_grounded());
        assert!((player.position().y - 9.98).abs() < 1e-5);
        assert!((player.state().velocity.y + 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_lands_on_block_and_stays_out_of_it() {
        let world = floor_world(3);
        let mut player = controller_at(0.0, 4.0, 0.0);

        for _ in 0..200 {
            player.update(&MoveIntent::default(), &world);
            assert_not_penetrating(&player, &world);
        }
        assert!(player.is_grounded());
        assert_eq!(player.state().velocity.y, 0.0);
        // feet rest within one gravity step of the block top (0.5)
        let feet = player.position().y - 1.8;
        assert!(feet > 0.5 - 1e-4 && feet < 0.5 + 0.05, "feet at {feet}");
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let world = VoxelWorld::new();
        let jump = MoveIntent { jump_requested: true, ..Default::default() };

        let mut airborne = controller_at(0.0, 10.0, 0.0);
        airborne.update(&jump, &world);
        assert!(airborne.position().y < 10.0);

        let mut player = controller_at(0.0, 1.8, 0.0);
        player.update(&MoveIntent::default(), &world);
        assert!(player.is_grounded());

        player.update(&jump, &world);
        assert!(!player.is_grounded());
        assert!((player.state().velocity.y - 0.48).abs() < 1e-6);
        assert!((player.position().y - 2.28).abs() < 1e-5);
    }

    #[test]
    fn test_walk_in_open_air_moves_along_axes() {
        let world = VoxelWorld::new();
        let mut player = controller_at(0.0, 1.8, 0.0);

        let right = MoveIntent { right: true, ..Default::default() };
        player.update(&right, &world);
        assert!((player.position().x - 0.15).abs() < 1e-6);

        let forward = MoveIntent { forward: true, ..Default::default() };
        player.update(&forward, &world);
        assert!((player.position().z + 0.15).abs() < 1e-6);
        assert!((player.state().velocity.z - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_wall_blocks_x_but_slides_along_z() {
        let mut world = VoxelWorld::new();
        // wall at x = 1 spanning the player's height, several cells deep along z
        for y in 0..4 {
            for z in -3..=3 {
                world.place(BlockPosition(1, y, z), Material::Stone);
            }
        }
        // the clamp keeps the player at 1.8 in this world, box spans x [-0.5, 0.5]
        let mut player = controller_at(0.0, 1.8, 0.0);
        let into_wall_and_forward = MoveIntent { right: true, forward: true, ..Default::default() };

        player.update(&into_wall_and_forward, &world);

        assert_eq!(player.position().x, 0.0);
        assert!(player.position().z < 0.0);
        // velocity.x is kept even though the move was dropped
        assert!(player.state().velocity.x > 0.0);
        assert_not_penetrating(&player, &world);
    }

    #[test]
    fn test_z_is_probed_at_pre_tick_x() {
        // a column diagonally ahead-right: each axis alone only touches it
        let mut world = VoxelWorld::new();
        for y in 0..4 {
            world.place(BlockPosition(1, y, -1), Material::Stone);
        }
        let mut player = controller_at(0.0, 1.8, 0.0);
        let diagonal = MoveIntent { right: true, forward: true, ..Default::default() };

        player.update(&diagonal, &world);

        // both axes commit, the combined box overlaps on the y probe, full rollback
        assert_eq!(player.position(), Vec3::new(0.0, 1.8, 0.0));
        assert!(player.is_grounded());
        assert_not_penetrating(&player, &world);
    }

    #[test]
    fn test_full_rollback_drops_horizontal_progress_on_landing() {
        let world = floor_world(3);
        let mut player = controller_at(0.0, 3.0, 0.0);
        // settle onto the floor
        for _ in 0..50 {
            player.update(&MoveIntent::default(), &world);
        }
        assert!(player.is_grounded());
        let settled = player.position();

        let right = MoveIntent { right: true, ..Default::default() };
        player.update(&right, &world);
        assert!(player.is_grounded());
        assert_eq!(player.position(), settled);
    }

    #[test]
    fn test_vertical_rollback_keeps_horizontal_progress() {
        let world = floor_world(3);
        let mut player = controller_at(0.0, 3.0, 0.0).with_landing(LandingRollback::Vertical);
        for _ in 0..50 {
            player.update(&MoveIntent::default(), &world);
        }
        let settled = player.position();

        let right = MoveIntent { right: true, ..Default::default() };
        player.update(&right, &world);
        assert!(player.is_grounded());
        assert_eq!(player.position().y, settled.y);
        assert!((player.position().x - settled.x - 0.15).abs() < 1e-6);
        assert_not_penetrating(&player, &world);
    }

    #[test]
    fn test_scripted_walk_never_penetrates_terrain() {
        let mut world = VoxelWorld::new();
        generate(&mut world, 24, &TerrainGenerator::new());

        for landing in [LandingRollback::Full, LandingRollback::Vertical] {
            let mut player = controller_at(0.5, 14.0, 0.5).with_landing(landing);
            let script = [
                MoveIntent { forward: true, ..Default::default() },
                MoveIntent { forward: true, right: true, ..Default::default() },
                MoveIntent { forward: true, jump_requested: true, ..Default::default() },
                MoveIntent { left: true, ..Default::default() },
                MoveIntent {
                    backward: true,
                    left: true,
                    jump_requested: true,
                    ..Default::default()
                },
                MoveIntent::default(),
            ];
            for step in 0..600 {
                let intent = script[(step / 25) % script.len()];
                player.update(&intent, &world);
                assert_not_penetrating(&player, &world);
            }
        }
    }
}
