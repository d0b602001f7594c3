use sea_orm::entity::prelude::*;

/// Per-guild member activity aggregate.
///
/// `placement` holds the member's rank on the previous leaderboard cycle,
/// with `-1` meaning the member has never been ranked.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub user_id: String,
    pub display_name: String,
    pub experience: i64,
    pub voice_activity: i64,
    pub placement: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
