//! CLI command handlers. Each command is in its own file.

mod check;
mod fetch;
mod image;
mod serve;

pub use check::run_check;
pub use fetch::run_fetch;
pub use image::run_image;
pub use serve::run_serve;
