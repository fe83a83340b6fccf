pub mod color;
pub mod content;
pub mod emoji;
pub mod layout;

pub use color::*;
pub use content::*;
pub use emoji::*;
pub use layout::*;
