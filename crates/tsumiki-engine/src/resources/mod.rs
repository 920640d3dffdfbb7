//! Resource images: the pre-baked textures behind each editor tab page.

mod images;
mod slots;
mod tab;

pub use images::{ResourceImages, IMAGE_FORMAT};
pub use slots::SlotState;
pub use tab::TabPageType;
