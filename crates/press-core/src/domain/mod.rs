//! Domain entities - the core content objects and the rules that derive their fields.

mod actor;
mod category;
pub mod normalize;
pub mod page;
mod post;
mod query;
mod tag;
pub mod validate;

pub use actor::{ADMIN_ROLE, Actor};
pub use category::Category;
pub use normalize::{Normalize, slugify};
pub use page::{CategoryPage, HomePage, PostDetailPage, SeoMeta, SiteMeta, TagPage};
pub use post::{Post, Section};
pub use query::PostQuery;
pub use tag::Tag;
pub use validate::Validate;
