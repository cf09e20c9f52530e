use std::fmt;

use crate::error::SetupError;

/// A player's piece identity: a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(char);

impl Marker {
    /// Symbol drawn for empty cells. Never a valid player marker.
    pub const EMPTY_SYMBOL: char = '\u{b7}';

    pub const fn new(symbol: char) -> Self {
        Marker(symbol)
    }

    pub fn symbol(self) -> char {
        self.0
    }

    /// Whether this is the reserved empty sentinel.
    pub fn is_reserved(self) -> bool {
        self.0 == Self::EMPTY_SYMBOL
    }
}

impl From<char> for Marker {
    fn from(symbol: char) -> Self {
        Marker(symbol)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a player in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    marker: Marker,
    name: String,
    has_won: bool,
}

impl Player {
    fn new(marker: Marker, name: String) -> Self {
        Player {
            marker,
            name,
            has_won: false,
        }
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Get player name for display
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Name used when none is given at registration.
    pub fn default_name(marker: Marker) -> String {
        format!("Player {}", marker)
    }
}

/// Players in fixed turn order (registration order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Roster {
            players: Vec::new(),
        }
    }

    /// Register a player; the returned id is its position in turn order.
    pub fn register(
        &mut self,
        marker: Marker,
        name: impl Into<String>,
    ) -> Result<PlayerId, SetupError> {
        if marker.is_reserved() {
            return Err(SetupError::ReservedMarker(marker));
        }
        if self.by_marker(marker).is_some() {
            return Err(SetupError::DuplicateMarker(marker));
        }

        let mut name = name.into();
        if name.trim().is_empty() {
            name = Player::default_name(marker);
        }

        self.players.push(Player::new(marker, name));
        Ok(PlayerId(self.players.len() - 1))
    }

    pub fn turn_order(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len()).map(PlayerId)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn by_marker(&self, marker: Marker) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.marker == marker)
            .map(PlayerId)
    }

    /// Players in turn order
    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Flag the player owning `marker` as the winner.
    ///
    /// Returns `None` when no player holds the marker; callers decide how loud
    /// that should be.
    pub fn mark_winner(&mut self, marker: Marker) -> Option<PlayerId> {
        let id = self.by_marker(marker)?;
        self.players[id.0].has_won = true;
        Some(id)
    }

    pub fn clear_wins(&mut self) {
        for player in &mut self.players {
            player.has_won = false;
        }
    }
}
