//! Assigns every node a position on the canvas.
//!
//! The horizontal position is the node's in-order rank, so reading the nodes left to right always
//! gives the keys in ascending order, whatever shape the tree has. The vertical position is the
//! node's depth. Both are then scaled into the canvas:
//!
//! ```text
//! x_step = clamp((width - 2 * padding) / (n - 1), min_x_step, max_x_step)
//! x      = (width - (n - 1) * x_step) / 2 + rank * x_step
//! y      = padding + depth * y_step + top_offset
//! ```
//!
//! Layout keeps no state between calls. Run it again after every structural change and whenever
//! the canvas changes size.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;
use crate::tree::Tree;
use crate::{Error, Result};

/// Size of the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels. Only used to report trees that don't fit.
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
        }
    }
}

/// Spacing constants for [`layout`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Margin kept free on the left, right and top.
    pub padding: f64,
    /// Horizontal distance between neighbours never drops below this.
    pub min_x_step: f64,
    /// Horizontal distance between neighbours never exceeds this.
    pub max_x_step: f64,
    /// Vertical distance between levels.
    pub y_step: f64,
    /// Extra space above the root, e.g. for a message banner.
    pub top_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            min_x_step: 40.0,
            max_x_step: 150.0,
            y_step: 60.0,
            top_offset: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Rejects spacing that would put neighbours on top of each other or out of order.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.padding,
            self.min_x_step,
            self.max_x_step,
            self.y_step,
            self.top_offset,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidConfig("layout values must be finite".into()));
        }
        if self.min_x_step <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_x_step must be positive, got {}",
                self.min_x_step
            )));
        }
        if self.max_x_step < self.min_x_step {
            return Err(Error::InvalidConfig(format!(
                "max_x_step ({}) is smaller than min_x_step ({})",
                self.max_x_step, self.min_x_step
            )));
        }
        if self.y_step <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "y_step must be positive, got {}",
                self.y_step
            )));
        }
        Ok(())
    }
}

/// Writes `x` and `y` of every node in `tree`.
pub fn layout(tree: &mut Tree, canvas: Canvas, config: &LayoutConfig) {
    let mut ranked = Vec::with_capacity(tree.len());
    rank(tree, tree.root(), 0, &mut ranked);

    let n = ranked.len();
    if n == 0 {
        return;
    }

    let available = canvas.width - config.padding * 2.0;
    let x_step = if n > 1 {
        available / (n - 1) as f64
    } else {
        available / 2.0
    };
    let x_step = x_step.max(config.min_x_step).min(config.max_x_step);
    let tree_width = (n - 1) as f64 * x_step;
    let start_x = (canvas.width - tree_width) / 2.0;

    let mut deepest = 0;
    for (index, (id, depth)) in ranked.into_iter().enumerate() {
        let node = &mut tree.nodes[id];
        node.x = start_x + index as f64 * x_step;
        node.y = config.padding + depth as f64 * config.y_step + config.top_offset;
        deepest = deepest.max(depth);
    }

    let bottom = config.padding + deepest as f64 * config.y_step + config.top_offset;
    if tree_width > canvas.width || bottom > canvas.height {
        log::debug!(
            "layout of {n} nodes spans {tree_width:.0}x{bottom:.0}, canvas is {:.0}x{:.0}",
            canvas.width,
            canvas.height
        );
    }
}

/// Collects `(id, depth)` in in-order, so the index in `out` is the node's rank.
fn rank(tree: &Tree, node: Option<NodeId>, depth: usize, out: &mut Vec<(NodeId, usize)>) {
    let mut stack = Vec::new();
    let mut current = node.map(|id| (id, depth));
    loop {
        while let Some((id, depth)) = current {
            stack.push((id, depth));
            current = tree.nodes[id].left.map(|left| (left, depth + 1));
        }
        let Some((id, depth)) = stack.pop() else {
            break;
        };
        out.push((id, depth));
        current = tree.nodes[id].right.map(|right| (right, depth + 1));
    }
}
