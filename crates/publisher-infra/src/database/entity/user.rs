//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use publisher_core::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
    #[sea_orm(unique)]
    pub verification_uuid: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            full_name: model.full_name,
            is_staff: model.is_staff,
            is_active: model.is_active,
            is_verified: model.is_verified,
            is_superuser: model.is_superuser,
            verification_uuid: model.verification_uuid,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            full_name: Set(user.full_name),
            is_staff: Set(user.is_staff),
            is_active: Set(user.is_active),
            is_verified: Set(user.is_verified),
            is_superuser: Set(user.is_superuser),
            verification_uuid: Set(user.verification_uuid),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
