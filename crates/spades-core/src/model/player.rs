use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    South = 0,
    West = 1,
    North = 2,
    East = 3,
}

impl PlayerPosition {
    /// Seats in play rotation.
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::South,
        PlayerPosition::West,
        PlayerPosition::North,
        PlayerPosition::East,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::South),
            1 => Some(PlayerPosition::West),
            2 => Some(PlayerPosition::North),
            3 => Some(PlayerPosition::East),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
        }
    }

    pub const fn previous(self) -> PlayerPosition {
        match self {
            PlayerPosition::South => PlayerPosition::East,
            PlayerPosition::West => PlayerPosition::South,
            PlayerPosition::North => PlayerPosition::West,
            PlayerPosition::East => PlayerPosition::North,
        }
    }

    /// The partner sits across the table.
    pub const fn partner(self) -> PlayerPosition {
        match self {
            PlayerPosition::South => PlayerPosition::North,
            PlayerPosition::West => PlayerPosition::East,
            PlayerPosition::North => PlayerPosition::South,
            PlayerPosition::East => PlayerPosition::West,
        }
    }

    pub const fn team(self) -> Team {
        match self {
            PlayerPosition::South | PlayerPosition::North => Team::NorthSouth,
            PlayerPosition::West | PlayerPosition::East => Team::EastWest,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn members(self) -> [PlayerPosition; 2] {
        match self {
            Team::NorthSouth => [PlayerPosition::North, PlayerPosition::South],
            Team::EastWest => [PlayerPosition::East, PlayerPosition::West],
        }
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::NorthSouth => f.write_str("N & S"),
            Team::EastWest => f.write_str("E & W"),
        }
    }
}

/// Who supplies the cards for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    #[default]
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Bot)
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    /// Four bots named after their seats.
    pub fn default_table() -> [Player; 4] {
        PlayerPosition::LOOP.map(|seat| Player::bot(seat.to_string()))
    }
}
