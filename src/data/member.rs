use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::member::Member;

pub struct MemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the guild's top members ordered by experience, highest first.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild to rank
    /// - `limit`: Maximum number of members to return
    pub async fn get_top_by_experience(
        &self,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<Member>, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::member::Column::Experience)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Member::from_entity)
            .collect()
    }

    /// Applies a mutation to a member aggregate in a read-modify-write cycle.
    ///
    /// Loads the row for `(guild_id, user_id)` (or starts from a fresh
    /// aggregate when none exists), applies `mutator`, and writes the result
    /// back as an update or insert.
    ///
    /// # Returns
    /// - `Ok(Member)` - The aggregate as persisted after the mutation
    /// - `Err(DbErr)` - Database error during load or write
    pub async fn modify<F>(&self, guild_id: u64, user_id: u64, mutator: F) -> Result<Member, DbErr>
    where
        F: FnOnce(&mut Member),
    {
        let existing = self.find_model(guild_id, user_id).await?;

        match existing {
            Some(model) => {
                let mut member = Member::from_entity(model.clone())?;
                mutator(&mut member);

                let mut active: entity::member::ActiveModel = model.into();
                active.display_name = ActiveValue::Set(member.display_name.clone());
                active.experience = ActiveValue::Set(member.experience);
                active.voice_activity = ActiveValue::Set(member.voice_activity);
                active.placement = ActiveValue::Set(member.placement);
                active.update(self.db).await?;

                Ok(member)
            }
            None => {
                let mut member = Member::new(guild_id, user_id);
                mutator(&mut member);

                entity::member::ActiveModel {
                    guild_id: ActiveValue::Set(member.guild_id.to_string()),
                    user_id: ActiveValue::Set(member.user_id.to_string()),
                    display_name: ActiveValue::Set(member.display_name.clone()),
                    experience: ActiveValue::Set(member.experience),
                    voice_activity: ActiveValue::Set(member.voice_activity),
                    placement: ActiveValue::Set(member.placement),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;

                Ok(member)
            }
        }
    }

    /// Persists a member aggregate as-is.
    ///
    /// Used by the ranking engine to store placement changes; the aggregate
    /// was loaded moments earlier, so this overwrites all mutable columns.
    pub async fn save(&self, member: &Member) -> Result<(), DbErr> {
        let snapshot = member.clone();
        self.modify(member.guild_id, member.user_id, move |stored| {
            *stored = snapshot;
        })
        .await?;

        Ok(())
    }

    async fn find_model(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<entity::member::Model>, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await
    }
}
