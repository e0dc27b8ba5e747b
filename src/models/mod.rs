pub mod aspect;
pub mod brief;
pub mod color;
pub mod gemini;
pub mod image;
pub mod profile;
pub mod request;

pub use aspect::*;
pub use brief::*;
pub use color::*;
pub use self::image::*;
pub use profile::*;
pub use request::*;
