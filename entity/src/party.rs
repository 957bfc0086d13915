use sea_orm::entity::prelude::*;

/// Registry row of a live party voice channel. `channel_id` is the Discord channel id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "party")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: String,
    pub game_category_id: String,
    pub owner_id: String,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_category::Entity",
        from = "Column::GameCategoryId",
        to = "super::game_category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GameCategory,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::DiscordId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::game_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCategory.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
