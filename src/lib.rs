//! Turn one source image into the icon assets a web app ships: three padded
//! PNGs and a multi-resolution `favicon.ico`.

pub mod error;
pub mod icon_gen;
pub mod report;
pub mod resize;

pub use error::IconError;
pub use icon_gen::{generate_icons, DEFAULT_OUTPUT_DIR};
pub use report::{GeneratedFile, Report};
pub use resize::resize_with_padding;
