use glam::{IVec3, Vec3};

use super::world::{BlockPosition, VoxelWorld};

/// Nearest ray/block intersection as reported by a raycast provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// point on the block surface where the ray entered
    pub point: Vec3,
    /// outward unit normal of the entered face
    pub normal: IVec3,
    pub block: BlockPosition,
    pub distance: f32,
}

/// First-person camera. The eye follows the player position.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub mouse_sensitivity: f32,
    /// max distance for block picking
    pub reach: f32,
}

impl Camera {
    pub fn new(eye: Vec3) -> Self {
        Self {
            eye,
            // looking down -Z, which is "forward" for movement
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            mouse_sensitivity: 0.002,
            reach: 8.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let cy = self.yaw;
        let cp = self.pitch.clamp(-1.5533, 1.5533); // Slightly less than π/2 to avoid gimbal lock
        Vec3::new(cy.cos() * cp.cos(), cp.sin(), cy.sin() * cp.cos()).normalize()
    }

    /// Apply mouse look delta
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        let pi_half = std::f32::consts::FRAC_PI_2;
        self.pitch = (self.pitch - dy * self.mouse_sensitivity).clamp(-pi_half, pi_half);
    }

    /// Casts from the eye along the view direction against `world`.
    pub fn raycast(&self, world: &VoxelWorld, max_distance: f32) -> Option<RayHit> {
        cast_ray(self.eye, self.forward(), max_distance, |p| world.is_occupied(p))
    }
}

/// Upper bound on cell boundaries a single ray may cross.
pub const MAX_RAY_STEPS: usize = 1024;

// Voxel DDA over unit cubes centered on integer cells.
// Walks cell boundaries in order of distance, so the first solid cell is the nearest hit.
// The cell containing the origin is never reported.
// Gives up after MAX_RAY_STEPS crossings even when max_distance is unbounded.
pub fn cast_ray<F>(origin: Vec3, direction: Vec3, max_distance: f32, is_solid: F) -> Option<RayHit>
where
    F: Fn(BlockPosition) -> bool,
{
    if direction.length_squared() == 0.0 || !direction.is_finite() {
        return None;
    }
    let dir = direction.normalize().to_array();

    // shift so that cells become [c, c + 1)
    let shifted = (origin + Vec3::splat(0.5)).to_array();
    let mut cell = [
        shifted[0].floor() as i32,
        shifted[1].floor() as i32,
        shifted[2].floor() as i32,
    ];

    let mut step = [0i32; 3];
    let mut t_max = [f32::INFINITY; 3];
    let mut t_delta = [f32::INFINITY; 3];
    for axis in 0..3 {
        if dir[axis] > 0.0 {
            step[axis] = 1;
            t_delta[axis] = 1.0 / dir[axis];
            t_max[axis] = (cell[axis] as f32 + 1.0 - shifted[axis]) / dir[axis];
        } else if dir[axis] < 0.0 {
            step[axis] = -1;
            t_delta[axis] = -1.0 / dir[axis];
            t_max[axis] = (shifted[axis] - cell[axis] as f32) / -dir[axis];
        }
    }

    for _ in 0..MAX_RAY_STEPS {
        let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
            0
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };

        let t = t_max[axis];
        if t > max_distance {
            return None;
        }

        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        let block = BlockPosition(cell[0], cell[1], cell[2]);
        if is_solid(block) {
            let mut normal = [0i32; 3];
            normal[axis] = -step[axis];
            return Some(RayHit {
                point: origin + Vec3::from_array(dir) * t,
                normal: IVec3::from_array(normal),
                block,
                distance: t,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::world::Material;

    fn single_block_world() -> VoxelWorld {
        let mut world = VoxelWorld::new();
        world.place(BlockPosition(0, 0, 0), Material::Stone);
        world
    }

    #[test]
    fn test_looking_down_hits_top_face() {
        let world = single_block_world();
        let hit = cast_ray(Vec3::new(0.2, 3.0, 0.1), Vec3::NEG_Y, 8.0, |p| world.is_occupied(p));

        let hit = hit.expect("should hit the block below");
        assert_eq!(hit.block, BlockPosition(0, 0, 0));
        assert_eq!(hit.normal, IVec3::Y);
        assert!((hit.point.y - 0.5).abs() < 1e-5);
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_side_face_normal() {
        let world = single_block_world();
        let hit = cast_ray(Vec3::new(-4.0, 0.0, 0.0), Vec3::X, 8.0, |p| world.is_occupied(p))
            .expect("should hit the -X face");
        assert_eq!(hit.normal, IVec3::NEG_X);
        assert!((hit.point.x + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_block_wins() {
        let mut world = single_block_world();
        world.place(BlockPosition(0, 1, 0), Material::Dirt);
        let hit = cast_ray(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, 8.0, |p| world.is_occupied(p))
            .expect("should hit the upper block");
        assert_eq!(hit.block, BlockPosition(0, 1, 0));
    }

    #[test]
    fn test_out_of_reach_and_degenerate() {
        let world = single_block_world();
        let solid = |p| world.is_occupied(p);
        assert!(cast_ray(Vec3::new(0.0, 20.0, 0.0), Vec3::NEG_Y, 8.0, solid).is_none());
        assert!(cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, 8.0, solid).is_none());
        assert!(cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::Y, 8.0, solid).is_none());
    }

    #[test]
    fn test_unbounded_reach_into_empty_sky_terminates() {
        let world = single_block_world();
        let solid = |p| world.is_occupied(p);
        let up = Vec3::new(0.3, 1.0, 0.2);
        assert!(cast_ray(Vec3::new(0.0, 3.0, 0.0), up, f32::INFINITY, solid).is_none());
        assert!(cast_ray(Vec3::new(0.0, 3.0, 0.0), up, f32::MAX, solid).is_none());
        assert!(cast_ray(Vec3::new(0.0, 3.0, 0.0), up, f32::NAN, solid).is_none());

        // the step bound still leaves ordinary reach untouched
        let hit = cast_ray(Vec3::new(0.0, 100.0, 0.0), Vec3::NEG_Y, f32::INFINITY, solid);
        assert_eq!(hit.map(|h| h.block), Some(BlockPosition(0, 0, 0)));
    }

    #[test]
    fn test_camera_raycast_uses_view_direction() {
        let world = single_block_world();
        let mut camera = Camera::new(Vec3::new(0.0, 3.0, 0.0));
        camera.pitch = -std::f32::consts::FRAC_PI_2;
        let hit = camera.raycast(&world, 8.0).expect("camera looks straight down");
        assert_eq!(hit.block, BlockPosition(0, 0, 0));
    }

    #[test]
    fn test_default_camera_faces_negative_z() {
        let camera = Camera::new(Vec3::ZERO);
        let f = camera.forward();
        assert!(f.z < -0.99, "forward was {f:?}");
    }
}
