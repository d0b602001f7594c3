use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::data::member::MemberRepository;
use crate::model::member::Member;

mod get_top_by_experience;
mod modify;
mod save;
