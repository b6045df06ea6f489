//! Post entity for SeaORM.
//!
//! Tags live in `post_tags`; conversions to the domain type take them separately.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use press_core::domain::{Section, Tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category_id: Uuid,
    pub image: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub section: String,
    pub published: bool,
    pub views: i32,
    pub meta_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain post from its row and its tags.
    pub fn into_domain(self, tags: Vec<Tag>) -> press_core::domain::Post {
        let section = self.section.parse().unwrap_or_else(|_| {
            tracing::warn!(post_id = %self.id, section = %self.section, "Unknown section, treating as regular");
            Section::Regular
        });

        press_core::domain::Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            category_id: self.category_id,
            image: self.image,
            content: self.content,
            tags,
            section,
            published: self.published,
            views: u32::try_from(self.views).unwrap_or_default(),
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel (tags excluded).
impl From<&press_core::domain::Post> for ActiveModel {
    fn from(post: &press_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title.clone()),
            slug: Set(post.slug.clone()),
            category_id: Set(post.category_id),
            image: Set(post.image.clone()),
            content: Set(post.content.clone()),
            section: Set(post.section.as_str().to_string()),
            published: Set(post.published),
            views: Set(i32::try_from(post.views).unwrap_or(i32::MAX)),
            meta_title: Set(post.meta_title.clone()),
            meta_description: Set(post.meta_description.clone()),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
