use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::data::guild::GuildRepository;

mod find_by_guild_id;
mod get_all;
mod upsert;
