//! The canvas: an ordered collection of placed blocks plus the selection.
//!
//! All placement events funnel through these operations. Blocks are owned
//! exclusively by the [`Workspace`]; callers refer to them by id.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::catalog::BlockTemplate;
use crate::model::Block;

/// Offset between the dragged preview's corner and the pointer.
pub const DROP_GRAB_OFFSET: (f64, f64) = (100.0, 50.0);
/// Canvas grid pitch that dropped blocks snap to.
pub const GRID_SIZE: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub selected_block_id: Option<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    fn block_mut(&mut self, id: &str) -> Result<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| anyhow!("unknown block id: {}", id))
    }

    /// Drop a new instance of `template` at `(x, y)`, returning its fresh id.
    pub fn add_block(&mut self, template: &BlockTemplate, x: f64, y: f64) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.blocks.push(template.instantiate(id.clone(), x, y));
        id
    }

    /// Reposition an existing block.
    pub fn move_block(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let block = self.block_mut(id)?;
        block.x = x;
        block.y = y;
        Ok(())
    }

    /// Set the text of one input. An empty string clears it back to the
    /// label fallback used by code generation.
    pub fn update_input(&mut self, id: &str, input_id: &str, value: &str) -> Result<()> {
        let block = self.block_mut(id)?;
        let input = block
            .inputs
            .iter_mut()
            .find(|i| i.id == input_id)
            .ok_or_else(|| anyhow!("block {} has no input named {}", id, input_id))?;
        input.value = Some(value.to_string());
        Ok(())
    }

    /// Select a block, or clear the selection with `None`.
    pub fn select_block(&mut self, id: Option<&str>) {
        self.selected_block_id = id.map(str::to_string);
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected_block_id.as_deref().and_then(|id| self.block(id))
    }

    /// Remove a block from the canvas, returning it.
    pub fn delete_block(&mut self, id: &str) -> Result<Block> {
        let idx = self
            .blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| anyhow!("unknown block id: {}", id))?;
        if self.selected_block_id.as_deref() == Some(id) {
            self.selected_block_id = None;
        }
        Ok(self.blocks.remove(idx))
    }
}

/// Convert a drop pointer position into a canvas position.
///
/// The pointer is made relative to the canvas origin, shifted by
/// [`DROP_GRAB_OFFSET`], clamped at zero and snapped to [`GRID_SIZE`].
pub fn snap_drop_position(pointer_x: f64, pointer_y: f64, origin_x: f64, origin_y: f64) -> (f64, f64) {
    let x = (pointer_x - origin_x - DROP_GRAB_OFFSET.0).max(0.0);
    let y = (pointer_y - origin_y - DROP_GRAB_OFFSET.1).max(0.0);
    (snap(x), snap(y))
}

fn snap(v: f64) -> f64 {
    (v / GRID_SIZE).round() * GRID_SIZE
}
