use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::activity::guild_tracker::{GuildActivityTracker, TRACKER_IDLE_TTL};
use crate::activity::member_state::MemberActivityState;
use crate::config::Config;
use crate::data::guild::GuildRepository;
use crate::data::member::MemberRepository;
use crate::error::AppError;
use crate::util::expiring::{ExpiringSet, TtlCache};

/// Settled voice points are worth this many experience points each,
/// before the configured multiplier.
const VOICE_EXPERIENCE_RATE: f64 = 15.0;

/// Minimum interval between experience grants for text messages from the
/// same (author, guild) pair.
const MESSAGE_COOLDOWN: Duration = Duration::from_secs(60);

/// Tunables for activity accrual, snapshotted from [`Config`] at startup.
#[derive(Debug, Clone)]
pub struct ActivitySettings {
    pub max_speaking_members: u32,
    pub experience_multiplier: i64,
    pub message_experience_min: i64,
    pub message_experience_max: i64,
}

impl From<&Config> for ActivitySettings {
    fn from(config: &Config) -> Self {
        Self {
            max_speaking_members: config.max_speaking_members,
            experience_multiplier: config.experience_multiplier,
            message_experience_min: config.message_experience_min,
            message_experience_max: config.message_experience_max,
        }
    }
}

/// A member's voice channel transition, decoded from the gateway event.
#[derive(Debug, Clone)]
pub struct VoiceUpdate {
    pub guild_id: u64,
    pub user_id: u64,
    pub display_name: String,
    pub is_bot: bool,
    /// Whether the member is currently ineligible to accrue (muted,
    /// deafened, or suppressed).
    pub frozen: bool,
    pub channel_left: Option<u64>,
    pub channel_joined: Option<u64>,
    /// The guild's AFK channel; presence there never accrues activity.
    pub afk_channel: Option<u64>,
}

/// A text message notification, decoded from the gateway event.
#[derive(Debug, Clone)]
pub struct MessageReceived {
    pub guild_id: Option<u64>,
    pub author_id: u64,
    pub display_name: String,
    pub is_bot: bool,
    pub is_webhook: bool,
}

/// Translates raw voice/text events into tracker mutations and flushes
/// settled activity into storage.
///
/// Gateway dispatch tasks call into this service concurrently. The guild
/// tracker cache is held behind a short-lived top-level lock that only hands
/// out per-guild tracker handles; each settlement runs under its guild's own
/// lock.
pub struct ActivityService {
    db: DatabaseConnection,
    settings: ActivitySettings,
    guilds: Mutex<TtlCache<u64, Arc<Mutex<GuildActivityTracker>>>>,
    message_cooldowns: Mutex<ExpiringSet<(u64, u64)>>,
}

impl ActivityService {
    pub fn new(db: DatabaseConnection, settings: ActivitySettings) -> Self {
        Self {
            db,
            settings,
            guilds: Mutex::new(TtlCache::new(TRACKER_IDLE_TTL)),
            message_cooldowns: Mutex::new(ExpiringSet::new(MESSAGE_COOLDOWN)),
        }
    }

    /// Applies a voice channel transition.
    ///
    /// Bots never accrue. A guild without a row, or with the leaderboard
    /// disabled, is skipped silently. Leaving a non-AFK channel settles the
    /// member's state and flushes it into storage; joining a non-AFK channel
    /// starts tracking with the member's current frozen state. Flush failures
    /// are logged and dropped: the settled state has already been consumed,
    /// and this subsystem is best-effort telemetry.
    pub async fn handle_voice_update(&self, update: VoiceUpdate) -> Result<(), AppError> {
        if update.is_bot {
            return Ok(());
        }

        let enabled = GuildRepository::new(&self.db)
            .find_by_guild_id(update.guild_id)
            .await?
            .map(|guild| guild.leaderboard_enabled)
            .unwrap_or(false);
        if !enabled {
            return Ok(());
        }

        if let Some(channel_id) = eligible_channel(update.channel_left, update.afk_channel) {
            if let Some(state) = self.stop_recording(update.guild_id, channel_id, update.user_id).await {
                if let Err(e) = self.flush_voice_activity(&update, state).await {
                    tracing::warn!(
                        "Failed to flush voice activity for user {} in guild {}: {}",
                        update.user_id,
                        update.guild_id,
                        e
                    );
                }
            }
        }

        if let Some(channel_id) = eligible_channel(update.channel_joined, update.afk_channel) {
            self.start_recording(update.guild_id, channel_id, update.user_id, update.frozen)
                .await;
        }

        Ok(())
    }

    /// Applies a mute/deafen/suppress toggle as a freeze broadcast.
    ///
    /// The new frozen state is fanned out to every cached channel tracker of
    /// the guild; trackers that do not hold the member ignore it.
    pub async fn handle_freeze(&self, guild_id: u64, user_id: u64, is_bot: bool, frozen: bool) {
        if is_bot {
            return;
        }

        let tracker = {
            let mut guilds = self.guilds.lock().await;
            guilds.get_mut(&guild_id).cloned()
        };

        if let Some(tracker) = tracker {
            tracker.lock().await.freeze(user_id, frozen);
        }
    }

    /// Grants message experience, subject to the per-minute cooldown.
    ///
    /// Only non-bot, non-webhook guild messages count. The (author, guild)
    /// pair enters the cooldown set whether or not the guild has the
    /// leaderboard enabled, so a later enable cannot be farmed retroactively
    /// within the window.
    pub async fn handle_message(&self, message: MessageReceived) -> Result<(), AppError> {
        if message.is_bot || message.is_webhook {
            return Ok(());
        }
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };

        {
            let mut cooldowns = self.message_cooldowns.lock().await;
            if cooldowns.contains(&(message.author_id, guild_id)) {
                return Ok(());
            }
            cooldowns.add((message.author_id, guild_id));
        }

        let enabled = GuildRepository::new(&self.db)
            .find_by_guild_id(guild_id)
            .await?
            .map(|guild| guild.leaderboard_enabled)
            .unwrap_or(false);
        if !enabled {
            return Ok(());
        }

        let gained = {
            let mut rng = rand::rng();
            rng.random_range(self.settings.message_experience_min..self.settings.message_experience_max)
        } * self.settings.experience_multiplier;

        MemberRepository::new(&self.db)
            .modify(guild_id, message.author_id, |member| {
                member.display_name = message.display_name.clone();
                member.experience += gained;
            })
            .await?;

        Ok(())
    }

    async fn start_recording(&self, guild_id: u64, channel_id: u64, user_id: u64, frozen: bool) {
        let tracker = {
            let mut guilds = self.guilds.lock().await;
            let max_speaking = self.settings.max_speaking_members;
            guilds
                .get_or_insert_with(guild_id, || {
                    Arc::new(Mutex::new(GuildActivityTracker::new(max_speaking)))
                })
                .clone()
        };

        tracker.lock().await.add_channel(channel_id, user_id, frozen);
    }

    async fn stop_recording(
        &self,
        guild_id: u64,
        channel_id: u64,
        user_id: u64,
    ) -> Option<MemberActivityState> {
        let tracker = {
            let mut guilds = self.guilds.lock().await;
            guilds.get_mut(&guild_id).cloned()
        }?;

        let (state, now_empty) = {
            let mut tracker = tracker.lock().await;
            let state = tracker.remove_channel(channel_id, user_id);
            (state, tracker.is_empty())
        };

        if now_empty {
            self.guilds.lock().await.remove(&guild_id);
        }
        state
    }

    /// Converts a settled state into persistent experience and voice time.
    pub(crate) async fn flush_voice_activity(
        &self,
        update: &VoiceUpdate,
        state: MemberActivityState,
    ) -> Result<(), sea_orm::DbErr> {
        let gained = (state.activity_points()
            * self.settings.experience_multiplier as f64
            * VOICE_EXPERIENCE_RATE) as i64;
        let voice_millis = state.activity_time_millis() as i64;

        MemberRepository::new(&self.db)
            .modify(update.guild_id, update.user_id, |member| {
                member.display_name = update.display_name.clone();
                member.experience += gained;
                member.voice_activity += voice_millis;
            })
            .await?;

        Ok(())
    }
}

/// Filters out the guild's AFK channel; presence there is not activity.
fn eligible_channel(channel: Option<u64>, afk_channel: Option<u64>) -> Option<u64> {
    channel.filter(|id| Some(*id) != afk_channel)
}
