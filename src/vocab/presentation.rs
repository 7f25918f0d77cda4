//! Presentation metadata for statuses.
//!
//! Colours live in their own table so that [`SyncStatus`] stays a plain
//! closed enum usable in exhaustive matches.

use serde::{Deserialize, Serialize};

use super::SyncStatus;

/// Shared colour palette across the external document system and chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Basic,
    Grey,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Basic,
        Color::Grey,
        Color::Brown,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Red,
    ];

    /// Hex colour code (`#RRGGBB`)
    pub fn hex_code(&self) -> &'static str {
        match self {
            Color::Basic => "#FFFFFF",
            Color::Grey => "#808080",
            Color::Brown => "#8B4513",
            Color::Orange => "#FF8C00",
            Color::Yellow => "#FFD700",
            Color::Green => "#32CD32",
            Color::Blue => "#4169E1",
            Color::Purple => "#9370DB",
            Color::Pink => "#FF69B4",
            Color::Red => "#FF0000",
        }
    }

    /// Colour name used by the external document system for select options
    pub fn notion_color(&self) -> &'static str {
        match self {
            Color::Basic => "default",
            Color::Grey => "gray",
            Color::Brown => "brown",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Red => "red",
        }
    }

    /// Parses an external colour name; unknown names map to [`Color::Basic`].
    pub fn from_notion_color(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.notion_color() == name)
            .unwrap_or_default()
    }

    /// RGB value as a single integer, the form the chat platform expects.
    pub fn rgb(&self) -> u32 {
        u32::from_str_radix(self.hex_code().trim_start_matches('#'), 16).unwrap_or(0xFFFFFF)
    }
}

/// Display colour for a status.
pub fn status_color(status: SyncStatus) -> Color {
    match status {
        SyncStatus::Writing => Color::Grey,
        SyncStatus::Update => Color::Yellow,
        SyncStatus::Updating => Color::Blue,
        SyncStatus::Synced => Color::Green,
        SyncStatus::Delete => Color::Orange,
        SyncStatus::Deleted => Color::Brown,
        SyncStatus::Error => Color::Red,
        SyncStatus::Invited => Color::Purple,
    }
}
