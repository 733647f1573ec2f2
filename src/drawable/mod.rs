//! Drawable 2D labels and the interaction pipeline that edits them.
//!
//! - `box2d` - a box label with handles and mouse down/move/up behaviour
//! - `list` - drawables mirroring the current item
//! - `handler` - canvas events to label edits
//! - `commit` - writing finished edits into the store

pub mod box2d;
pub mod commit;
pub mod handler;
pub mod list;

pub use box2d::{Box2DLabel, Handle};
pub use commit::commit_2d_labels;
pub use handler::Label2DHandler;
pub use list::Label2DList;
