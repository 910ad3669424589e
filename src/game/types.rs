use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque identifier issued by the service when a game is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accept either a JSON string or a JSON number
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Canonical wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Direction {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction '{0}': expected up, down, left or right")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Game payload as returned by the service, kept verbatim.
///
/// The accessors only read well-known fields; nothing is rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState(Value);

impl GameState {
    pub const STATUS_RUNNING: &'static str = "running";
    pub const STATUS_ENDED: &'static str = "ended";

    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn id(&self) -> Option<GameId> {
        self.0.get("id").and_then(GameId::from_value)
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn score(&self) -> Option<i64> {
        self.0.get("score").and_then(Value::as_i64)
    }

    pub fn is_running(&self) -> bool {
        self.status() == Some(Self::STATUS_RUNNING)
    }

    pub fn is_ended(&self) -> bool {
        self.status() == Some(Self::STATUS_ENDED)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Score submission body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "playerName")]
    pub player_name: String,
    pub score: i64,
}

impl ScoreRecord {
    pub fn new(player_name: impl Into<String>, score: i64) -> Self {
        Self {
            player_name: player_name.into(),
            score,
        }
    }
}

/// One leaderboard row, kept as the service sent it.
///
/// Rows are not schema-checked: a row with a fractional or missing score still
/// decodes, and the typed accessors return `None` for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardEntry(Value);

impl LeaderboardEntry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn player_name(&self) -> Option<&str> {
        self.get("playerName")
            .or_else(|| self.get("player_name"))
            .and_then(Value::as_str)
    }

    /// Integer score, if the row carries one
    pub fn score(&self) -> Option<i64> {
        self.get("score").and_then(Value::as_i64)
    }

    pub fn time_played(&self) -> Option<i64> {
        self.get("time_played").and_then(Value::as_i64)
    }

    pub fn food_count(&self) -> Option<i64> {
        self.get("food_count").and_then(Value::as_i64)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.get("created_at").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Leaderboard in exactly the order the service sent it.
///
/// A `null` body decodes as an empty board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Option<Vec<LeaderboardEntry>>",
    into = "Vec<LeaderboardEntry>"
)]
pub struct Leaderboard(Vec<LeaderboardEntry>);

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeaderboardEntry> {
        self.0.iter()
    }
}

impl From<Option<Vec<LeaderboardEntry>>> for Leaderboard {
    fn from(entries: Option<Vec<LeaderboardEntry>>) -> Self {
        Self(entries.unwrap_or_default())
    }
}

impl From<Leaderboard> for Vec<LeaderboardEntry> {
    fn from(board: Leaderboard) -> Self {
        board.0
    }
}

impl IntoIterator for Leaderboard {
    type Item = LeaderboardEntry;
    type IntoIter = std::vec::IntoIter<LeaderboardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a LeaderboardEntry;
    type IntoIter = std::slice::Iter<'a, LeaderboardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
