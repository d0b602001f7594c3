use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serenity::all::{CreateEmbed, CreateEmbedAuthor};

use crate::leaderboard::experience;

/// Maximum number of ranked entries on a board.
pub const MAX_ENTRIES: usize = 16;

/// Display names longer than this are truncated with an ellipsis.
const NAME_LENGTH_LIMIT: usize = 16;

const EMBED_COLOR: u32 = 0xFFE193;

/// Zero-width space; Discord requires a non-empty field name.
const BLANK_FIELD: &str = "\u{200b}";

/// An individual row of the leaderboard.
///
/// Rebuilt on every render and never persisted. `previous_placement` uses
/// `MAX_ENTRIES + 1` as the sentinel for members that were not on the
/// previous board.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub experience: i64,
    pub placement: i32,
    pub previous_placement: i32,
}

/// Direction a member's placement moved since the previous cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Declined,
    Unchanged,
}

impl Trend {
    pub fn glyph(self) -> &'static str {
        match self {
            Trend::Improved => "\u{1F53C}",  // 🔼
            Trend::Declined => "\u{1F53D}",  // 🔽
            Trend::Unchanged => "\u{25AA}",  // ▪
        }
    }
}

impl Entry {
    /// A lower placement number is a better rank.
    pub fn trend(&self) -> Trend {
        if self.placement < self.previous_placement {
            Trend::Improved
        } else if self.placement > self.previous_placement {
            Trend::Declined
        } else {
            Trend::Unchanged
        }
    }
}

/// Render-only view of one guild's ranked members.
pub struct Leaderboard {
    entries: Vec<Entry>,
    next_update: DateTime<Tz>,
}

impl Leaderboard {
    pub fn new(next_update: DateTime<Tz>) -> Self {
        Self {
            entries: Vec::with_capacity(MAX_ENTRIES),
            next_update,
        }
    }

    /// Registers an entry, silently ignoring anything past [`MAX_ENTRIES`].
    pub fn register_entry(&mut self, entry: Entry) {
        if self.entries.len() < MAX_ENTRIES {
            self.entries.push(entry);
        }
    }

    /// Renders the board into a Discord embed.
    ///
    /// Three inline columns (rank and name, experience, level) followed by a
    /// full-width next-update field with a relative timestamp.
    pub fn build(&self) -> CreateEmbed {
        let past_update = self.next_update - Duration::weeks(1);

        CreateEmbed::new()
            .author(CreateEmbedAuthor::new("Weekly Activity Leaderboard"))
            .color(EMBED_COLOR)
            .title(format!(
                "{} \u{2014} {}",
                past_update.format("%d/%m/%Y"),
                self.next_update.format("%d/%m/%Y")
            ))
            .field(BLANK_FIELD, self.name_column(), true)
            .field(BLANK_FIELD, self.experience_column(), true)
            .field(BLANK_FIELD, self.level_column(), true)
            .field(
                BLANK_FIELD,
                format!("Next update <t:{}:R>", self.next_update.timestamp()),
                false,
            )
    }

    pub(crate) fn name_column(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} `#{}` {}",
                    entry.trend().glyph(),
                    entry.placement,
                    truncate_name(&entry.name, NAME_LENGTH_LIMIT)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn experience_column(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("exp: `{}`", format_experience(entry.experience)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn level_column(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "level: `{}`",
                    experience::level_from_experience(entry.experience)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Truncates a display name to `max_length` characters, ellipsis included.
pub fn truncate_name(name: &str, max_length: usize) -> String {
    if name.chars().count() <= max_length {
        name.to_string()
    } else {
        let kept: String = name.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Formats an experience value for display.
///
/// Values with an absolute magnitude of 1000 or more are shortened to a
/// two-decimal "K" form (1500 becomes "1.50K"); smaller values are printed
/// as-is.
pub fn format_experience(experience: i64) -> String {
    if experience.abs() >= 1000 {
        format!("{:.2}K", experience.abs() as f64 / 1000.0)
    } else {
        experience.to_string()
    }
}
