//! SeaORM entities mirroring the tables created by the `migration` app.

pub mod category;
pub mod post;
pub mod post_tag;
pub mod tag;
