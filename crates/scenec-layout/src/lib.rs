//! Scene-graph traversal for scenec.
//!
//! Produces the ordered sequence of nodes the resolver and emitter consume.
//! Each entry carries the [`LayoutContext`] inherited from its parent frame:
//!
//! 1. **Root**: top-level nodes, positioned relative to nothing
//! 2. **Flow**: children of an auto-layout frame, sized by flex rules
//! 3. **Absolute**: children of a plain frame, placed at `child.box - parent.box`
//!
//! # Example
//!
//! ```ignore
//! use scenec_layout::ScenegraphWalker;
//!
//! for entry in ScenegraphWalker::new(&tree.roots) {
//!     println!("{}{} {:?}", "  ".repeat(entry.depth), entry.node.name, entry.layout);
//! }
//! ```

mod context;
mod walker;

pub use context::{FlowDirection, LayoutContext};
pub use walker::{ScenegraphWalker, WalkEntry};
