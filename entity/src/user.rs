use sea_orm::entity::prelude::*;

/// Non-bot member of the main guild.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::party::Entity")]
    Party,
    #[sea_orm(has_one = "super::habitue::Entity")]
    Habitue,
}

impl Related<super::party::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Party.def()
    }
}

impl Related<super::habitue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habitue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
