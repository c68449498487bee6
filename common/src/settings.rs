use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SNAKE_COUNT;

/// Tick interval presets offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn tick_ms(&self) -> u64 {
        match self {
            Speed::Slow => 150,
            Speed::Normal => 100,
            Speed::Fast => 50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }

    pub fn from_millis(ms: u64) -> Result<Speed> {
        Speed::ALL
            .into_iter()
            .find(|speed| speed.tick_ms() == ms)
            .ok_or_else(|| anyhow!("Unsupported tick interval {}ms (expected 150, 100 or 50)", ms))
    }

    /// Next preset, wrapping around; used by option menus.
    pub fn cycle(&self, forward: bool) -> Speed {
        let index = Speed::ALL.iter().position(|s| s == self).unwrap_or(0);
        let len = Speed::ALL.len();
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Speed::ALL[next]
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}ms)", self.label(), self.tick_ms())
    }
}

impl FromStr for Speed {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(ms) = trimmed.parse::<u64>() {
            return Speed::from_millis(ms);
        }
        Speed::ALL
            .into_iter()
            .find(|speed| speed.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| anyhow!("Unknown speed '{}' (expected slow, normal, fast or 150/100/50)", s))
    }
}

/// Named colours offered in the options panel.
pub const COLOR_PALETTE: [(&str, &str); 6] = [
    ("Green", "#4ade80"),
    ("Blue", "#60a5fa"),
    ("Purple", "#a78bfa"),
    ("Pink", "#f472b6"),
    ("Orange", "#fb923c"),
    ("Yellow", "#facc15"),
];

/// A `#rrggbb` display colour. Purely cosmetic; the simulation never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnakeColor(String);

impl SnakeColor {
    pub fn parse(value: &str) -> Result<SnakeColor> {
        let value = value.trim();
        let Some(hex) = value.strip_prefix('#') else {
            bail!("Colour '{}' must start with '#'", value);
        };
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("Colour '{}' must be '#' followed by six hex digits", value);
        }
        Ok(SnakeColor(format!("#{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or(0)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }

    /// Palette name for this colour, if it is one of the presets.
    pub fn palette_name(&self) -> Option<&'static str> {
        COLOR_PALETTE
            .iter()
            .find(|(_, hex)| *hex == self.0)
            .map(|(name, _)| *name)
    }

    pub fn palette() -> Vec<SnakeColor> {
        COLOR_PALETTE
            .iter()
            .map(|(_, hex)| SnakeColor((*hex).to_string()))
            .collect()
    }

    /// Next palette entry, wrapping around. Custom colours restart at the first entry.
    pub fn cycle(&self, forward: bool) -> SnakeColor {
        let palette = SnakeColor::palette();
        let len = palette.len();
        let next = match palette.iter().position(|c| c == self) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        palette[next].clone()
    }
}

impl FromStr for SnakeColor {
    type Err = anyhow::Error;

    /// Accepts a palette name (case-insensitive) or a hex colour.
    fn from_str(s: &str) -> Result<Self> {
        if let Some((_, hex)) = COLOR_PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
        {
            return SnakeColor::parse(hex);
        }
        SnakeColor::parse(s)
    }
}

impl TryFrom<String> for SnakeColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        SnakeColor::parse(&value)
    }
}

impl From<SnakeColor> for String {
    fn from(color: SnakeColor) -> Self {
        color.0
    }
}

impl fmt::Display for SnakeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.palette_name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

pub fn default_snake_colors() -> [SnakeColor; SNAKE_COUNT] {
    [
        SnakeColor(COLOR_PALETTE[0].1.to_string()),
        SnakeColor(COLOR_PALETTE[1].1.to_string()),
    ]
}

/// Partial settings change; `None` leaves the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub speed: Option<Speed>,
    pub snake_colors: [Option<SnakeColor>; SNAKE_COUNT],
}

impl SettingsUpdate {
    pub fn speed(speed: Speed) -> Self {
        SettingsUpdate {
            speed: Some(speed),
            ..Default::default()
        }
    }

    pub fn snake_color(snake_id: usize, color: SnakeColor) -> Result<Self> {
        let mut update = SettingsUpdate::default();
        let slot = update
            .snake_colors
            .get_mut(snake_id)
            .ok_or_else(|| anyhow!("Snake {} does not exist", snake_id))?;
        *slot = Some(color);
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_none() && self.snake_colors.iter().all(Option::is_none)
    }
}
