//! Game configuration supplied by the external copy generator
//!
//! The generator hands over a JSON object describing the chosen game type,
//! brand identity, headline copy, and difficulty knobs. The core never calls
//! the generator itself; everything here is about tolerating whatever the
//! generator (or a hand-edited config) sends: missing optional fields take
//! built-in defaults and an unrecognized game type falls back to the space
//! defender variant.

use serde::{Deserialize, Deserializer, Serialize};

/// The six config-selectable game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameKind {
    #[default]
    SpaceDefender,
    CoinCollector,
    BubblePopper,
    TargetShooter,
    RunnerDash,
    MemoryMatch,
}

impl GameKind {
    /// Parse the generator's camelCase tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "spaceDefender" => Some(Self::SpaceDefender),
            "coinCollector" => Some(Self::CoinCollector),
            "bubblePopper" => Some(Self::BubblePopper),
            "targetShooter" => Some(Self::TargetShooter),
            "runnerDash" => Some(Self::RunnerDash),
            "memoryMatch" => Some(Self::MemoryMatch),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::SpaceDefender => "spaceDefender",
            Self::CoinCollector => "coinCollector",
            Self::BubblePopper => "bubblePopper",
            Self::TargetShooter => "targetShooter",
            Self::RunnerDash => "runnerDash",
            Self::MemoryMatch => "memoryMatch",
        }
    }
}

impl Serialize for GameKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for GameKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(GameKind::from_tag(&tag).unwrap_or_else(|| {
            log::warn!("unknown gameType {tag:?}, defaulting to spaceDefender");
            GameKind::default()
        }))
    }
}

/// Brand identity block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brand {
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
    pub products: Option<Vec<String>>,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "Your Company".into(),
            primary_color: "#6366f1".into(),
            secondary_color: "#818cf8".into(),
            accent_color: "#4f46e5".into(),
            logo_url: None,
            products: None,
        }
    }
}

/// On-brand copy strings, `{companyName}` is the only recognized placeholder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyBlock {
    pub start_headline: String,
    pub end_win_headline: String,
    pub game_elements: Option<Vec<String>>,
}

impl Default for CopyBlock {
    fn default() -> Self {
        Self {
            start_headline: "Play the {companyName} arcade!".into(),
            end_win_headline: "You mastered {companyName}!".into(),
            game_elements: None,
        }
    }
}

/// Difficulty knobs chosen by the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Enemy/obstacle spawn interval in milliseconds
    pub enemy_spawn_rate: f64,
    /// Player movement speed in logical pixels per frame at 60 Hz
    pub player_speed: f32,
    pub max_lives: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            enemy_spawn_rate: 1500.0,
            player_speed: 6.0,
            max_lives: 3,
        }
    }
}

/// Complete game configuration, immutable for the lifetime of a mount
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub game_type: GameKind,
    pub brand: Brand,
    pub copy: CopyBlock,
    pub settings: GameSettings,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Start headline with the company name substituted in
    pub fn start_headline(&self) -> String {
        interpolate(&self.copy.start_headline, &self.brand.name)
    }

    /// Terminal headline with the company name substituted in
    pub fn end_headline(&self) -> String {
        interpolate(&self.copy.end_win_headline, &self.brand.name)
    }
}

/// Replace every occurrence of `{companyName}`; no other tokens exist.
pub fn interpolate(text: &str, company: &str) -> String {
    text.replace("{companyName}", company)
}
