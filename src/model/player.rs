use glam::Vec3;

/// Player kinematic state, owned by the PlayerController.
///
/// `position` is the eye point at the top of the collision volume; the
/// volume extends `player_height` below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl PlayerState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }
}

/// One tick of movement input. Held keys are levels, not edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump_requested: bool,
}

impl MoveIntent {
    /// Normalized (x, z) direction; zero when opposing keys cancel or nothing is held.
    pub fn horizontal_direction(&self) -> (f32, f32) {
        let x = self.right as i32 - self.left as i32;
        let z = self.forward as i32 - self.backward as i32;
        if x == 0 && z == 0 {
            return (0.0, 0.0);
        }
        let len = ((x * x + z * z) as f32).sqrt();
        (x as f32 / len, z as f32 / len)
    }
}
