use glam::{IVec3, Vec3};
use serde::Deserialize;

/// Grid cell identity of a block. A block occupies the closed unit cube
/// centered on this integer position.
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct BlockPosition(pub i32, pub i32, pub i32);

impl BlockPosition {
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.0 as f32, self.1 as f32, self.2 as f32)
    }

    /// Neighbouring cell one step along `by`.
    pub fn offset(&self, by: IVec3) -> Self {
        Self(self.0 + by.x, self.1 + by.y, self.2 + by.z)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Grass = 1,
    Dirt = 2,
    Stone = 3,
}

impl Material {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Flat tint handed to the renderer, one per material.
    pub fn color(self) -> [f32; 4] {
        match self {
            Material::Grass => [0.3, 0.8, 0.2, 1.0],
            Material::Dirt => [0.6, 0.4, 0.2, 1.0],
            Material::Stone => [0.5, 0.5, 0.5, 1.0],
        }
    }

    /// Material for layer `y` of a column whose top block sits at `height - 1`.
    pub fn for_layer(y: i32, height: i32) -> Self {
        if y == height - 1 {
            Material::Grass
        } else if y >= height - 3 {
            Material::Dirt
        } else {
            Material::Stone
        }
    }
}

/// A placed unit cube. Never mutated; re-placement builds a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub position: BlockPosition,
    pub material: Material,
}

impl Block {
    pub fn new(position: BlockPosition, material: Material) -> Self {
        Self { position, material }
    }
}
