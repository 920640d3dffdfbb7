//! Frame recording.
//!
//! Drawing calls are recorded here in call order and executed against the
//! canvas when the frame is presented.

mod cmd;
mod list;

pub use cmd::{DrawCmd, GraphCmd, ImageCmd};
pub use list::FrameList;
