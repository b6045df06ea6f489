//! Page rendering implementations.

mod tera;

pub use self::tera::TeraRenderer;
