use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use tokio::task::JoinSet;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::data::guild::GuildRepository;
use crate::data::member::MemberRepository;
use crate::error::AppError;
use crate::leaderboard::board::{Entry, Leaderboard, MAX_ENTRIES};
use crate::leaderboard::channel::{publish_leaderboard, DiscordLeaderboardChannel};
use crate::model::guild::Guild;

/// Time zone the weekly schedule is anchored to.
const ZONE: Tz = chrono_tz::Europe::Paris;

/// Day of week the leaderboard is published.
const SCHEDULE_WEEKDAY: Weekday = Weekday::Mon;

/// Local hour of day (in [`ZONE`]) the leaderboard is published.
const SCHEDULE_HOUR: u32 = 18;

/// Interval between publications once the schedule is running.
const SCHEDULE_PERIOD: StdDuration = StdDuration::from_secs(7 * 24 * 60 * 60);

/// Drives the weekly leaderboard batch.
///
/// One delayed job runs the first cycle at the next schedule date, then a
/// 7-day repeating job takes over. Each cycle fans out one publish task per
/// enabled guild; failures are isolated per guild.
pub struct LeaderboardManager {
    db: DatabaseConnection,
    http: Arc<Http>,
    scheduler: Option<JobScheduler>,
}

impl LeaderboardManager {
    pub fn new(db: DatabaseConnection, http: Arc<Http>) -> Self {
        Self {
            db,
            http,
            scheduler: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Starts the weekly schedule.
    ///
    /// Must be called at most once per manager; calling it twice is a
    /// programming error.
    pub async fn schedule(&mut self) -> Result<(), AppError> {
        assert!(!self.is_scheduled(), "leaderboard schedule already started");

        let scheduler = JobScheduler::new().await?;

        let initial_delay = (next_schedule_date() - Utc::now().with_timezone(&ZONE))
            .to_std()
            .unwrap_or_default();

        let db = self.db.clone();
        let http = self.http.clone();
        let chained_scheduler = scheduler.clone();

        // Run the cycle manually at the first schedule date, then hand over
        // to the repeating cadence; a plain repeating job would miss the
        // first fire or drift off the weekday anchor.
        let job = Job::new_one_shot_async(initial_delay, move |_uuid, _lock| {
            let db = db.clone();
            let http = http.clone();
            let scheduler = chained_scheduler.clone();

            Box::pin(async move {
                run_cycle(&db, &http).await;

                let weekly_db = db.clone();
                let weekly_http = http.clone();
                let weekly = Job::new_repeated_async(SCHEDULE_PERIOD, move |_uuid, _lock| {
                    let db = weekly_db.clone();
                    let http = weekly_http.clone();

                    Box::pin(async move {
                        run_cycle(&db, &http).await;
                    })
                });

                match weekly {
                    Ok(weekly) => {
                        if let Err(e) = scheduler.add(weekly).await {
                            tracing::error!("Failed to schedule weekly leaderboard job: {}", e);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to create weekly leaderboard job: {}", e);
                    }
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!("Leaderboard scheduler started, first run at {}", next_schedule_date());

        self.scheduler = Some(scheduler);
        Ok(())
    }

    /// Cancels the pending and repeating jobs.
    ///
    /// In-flight settlement operations are synchronous and unaffected.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.shutdown().await?;
        }
        Ok(())
    }
}

/// Next instant the leaderboard fires, for scheduling and display.
pub fn next_schedule_date() -> DateTime<Tz> {
    next_schedule_date_after(Utc::now().with_timezone(&ZONE))
}

/// Next occurrence of the schedule weekday/time at-or-after `now`.
///
/// Weekday arithmetic happens on local dates so the published wall-clock
/// time survives DST transitions.
pub fn next_schedule_date_after(now: DateTime<Tz>) -> DateTime<Tz> {
    let target = now.with_time(schedule_time()).earliest().unwrap_or(now);

    let mut days_ahead = (7 + SCHEDULE_WEEKDAY.num_days_from_monday() as i64
        - target.weekday().num_days_from_monday() as i64)
        % 7;
    if now >= target && days_ahead == 0 {
        days_ahead = 7;
    }

    let date = target.date_naive() + chrono::Days::new(days_ahead as u64);
    ZONE.from_local_datetime(&date.and_time(schedule_time()))
        .earliest()
        .unwrap_or(target)
}

fn schedule_time() -> NaiveTime {
    NaiveTime::from_hms_opt(SCHEDULE_HOUR, 0, 0).unwrap()
}

/// Runs one leaderboard cycle over every enabled guild.
///
/// Guild pipelines run as independent tasks joined at the end; one guild
/// failing (or stalling) never blocks or aborts its siblings. A failure to
/// load the guild list skips the entire cycle - there is no catch-up for a
/// missed week.
pub async fn run_cycle(db: &DatabaseConnection, http: &Arc<Http>) {
    let guilds = match GuildRepository::new(db).get_all().await {
        Ok(guilds) => guilds,
        Err(e) => {
            tracing::warn!("Skipping leaderboard cycle, failed to load guilds: {}", e);
            return;
        }
    };

    let mut tasks = JoinSet::new();
    for guild in guilds {
        if !guild.leaderboard_enabled {
            continue;
        }
        let Some(channel_id) = guild.leaderboard_channel_id else {
            continue;
        };

        let db = db.clone();
        let http = http.clone();
        tasks.spawn(async move {
            let guild_id = guild.guild_id;
            (guild_id, publish_guild(&db, &http, &guild, channel_id).await)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((guild_id, Err(e))) => {
                tracing::warn!("Failed to publish leaderboard for guild {}: {}", guild_id, e);
            }
            Ok((_, Ok(()))) => {}
            Err(e) => {
                tracing::warn!("Leaderboard publish task failed to run: {}", e);
            }
        }
    }
}

/// Ranks one guild's members, persists placement changes, and republishes
/// its board.
async fn publish_guild(
    db: &DatabaseConnection,
    http: &Arc<Http>,
    guild: &Guild,
    channel_id: u64,
) -> Result<(), AppError> {
    let repository = MemberRepository::new(db);
    let members = repository
        .get_top_by_experience(guild.guild_id, MAX_ENTRIES as u64)
        .await?;
    if members.is_empty() {
        return Ok(());
    }

    let mut board = Leaderboard::new(next_schedule_date());

    for (index, mut member) in members.into_iter().enumerate() {
        let placement = (index + 1) as i32;
        let previous_placement = if member.placement < 0 {
            // Never ranked and fell-off-the-board share the same sentinel.
            (MAX_ENTRIES + 1) as i32
        } else {
            member.placement
        };

        board.register_entry(Entry {
            name: member.display_name.clone(),
            experience: member.experience,
            placement,
            previous_placement,
        });

        if previous_placement != placement {
            member.placement = placement;
            repository.save(&member).await?;
        }
    }

    let Some(channel) = DiscordLeaderboardChannel::resolve(http.clone(), channel_id).await? else {
        return Ok(());
    };
    publish_leaderboard(&channel, board.build()).await
}
