use std::collections::HashMap;

use super::block::{Block, BlockPosition, Material};

/// Sparse block store keyed by grid cell.
///
/// Single source of truth for collision, picking and rendering. Every key
/// equals the position stored in its value, and a cell holds at most one block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelWorld {
    blocks: HashMap<BlockPosition, Block>,
}

impl VoxelWorld {
    /// creates a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a block at `position`. Never overwrites: returns false and
    /// leaves the world untouched if the cell is occupied.
    pub fn place(&mut self, position: BlockPosition, material: Material) -> bool {
        if self.blocks.contains_key(&position) {
            tracing::trace!(?position, "place rejected, cell occupied");
            return false;
        }
        self.blocks.insert(position, Block::new(position, material));
        true
    }

    /// Deletes the block at `position`. Returns false if the cell is empty.
    pub fn remove(&mut self, position: BlockPosition) -> bool {
        let removed = self.blocks.remove(&position).is_some();
        if !removed {
            tracing::trace!(?position, "remove rejected, cell empty");
        }
        removed
    }

    pub fn block_at(&self, position: BlockPosition) -> Option<&Block> {
        self.blocks.get(&position)
    }

    pub fn is_occupied(&self, position: BlockPosition) -> bool {
        self.blocks.contains_key(&position)
    }

    /// Enumerates every block. Each call starts from scratch; the borrow
    /// keeps edits out while the iterator is alive.
    pub fn all(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
