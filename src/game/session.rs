use tracing::{debug, info};

use super::grid::{Coord, Grid, GridSnapshot, MoveError};
use super::player::{Marker, Player, PlayerId, Roster};
use super::win::{completes_run, find_win, WinningRun};
use crate::config::GameConfig;
use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Marker),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fresh grid, no move attempted yet
    Setup,
    InProgress,
    Finished(GameOutcome),
}

/// Why a turn was refused. A refused turn changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("the game is over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    /// Same player must try again
    Rejected(Rejection),
    Placed { coord: Coord, board_full: bool },
    Won { marker: Marker, run: Vec<Coord> },
    Draw,
}

/// One game: grid, players in turn order, and the win target.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    roster: Roster,
    run_length: usize,
    current_turn: usize,
    state: SessionState,
    board_full: bool,
    winner: Option<Marker>,
    winning_run: Option<WinningRun>,
    last_move: Option<Coord>,
    moves_played: usize,
}

/// Convenience wrapper around [`GameSession::new`].
pub fn new_session<S: AsRef<str>>(
    width: usize,
    height: usize,
    run_length: usize,
    players: &[(Marker, S)],
) -> Result<GameSession, SetupError> {
    GameSession::new(width, height, run_length, players)
}

impl GameSession {
    /// Create a session. Players take turns in the order given.
    pub fn new<S: AsRef<str>>(
        width: usize,
        height: usize,
        run_length: usize,
        players: &[(Marker, S)],
    ) -> Result<Self, SetupError> {
        let grid = Grid::new(width, height)?;
        if run_length == 0 {
            return Err(SetupError::InvalidRunLength(run_length));
        }
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }

        let mut roster = Roster::new();
        for (marker, name) in players {
            roster.register(*marker, name.as_ref())?;
        }

        debug!(width, height, run_length, players = roster.len(), "session created");

        Ok(GameSession {
            grid,
            roster,
            run_length,
            current_turn: 0,
            state: SessionState::Setup,
            board_full: false,
            winner: None,
            winning_run: None,
            last_move: None,
            moves_played: 0,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, SetupError> {
        let players: Vec<(Marker, String)> = config
            .players
            .iter()
            .map(|p| (Marker::new(p.marker), p.name.clone().unwrap_or_default()))
            .collect();
        Self::new(config.width, config.height, config.run_length, &players)
    }

    /// Drop the current player's marker into `column`.
    pub fn apply_turn(&mut self, column: usize) -> TurnResult {
        match self.state {
            SessionState::Finished(_) => return TurnResult::Rejected(Rejection::GameOver),
            SessionState::Setup => self.state = SessionState::InProgress,
            SessionState::InProgress => {}
        }

        let marker = self.current_player().marker();
        let row = match self.grid.try_place(column, marker) {
            Ok(row) => row,
            Err(e) => {
                debug!(%marker, column, error = %e, "move rejected");
                return TurnResult::Rejected(e.into());
            }
        };
        let coord = Coord::new(column, row);
        self.moves_played += 1;
        self.last_move = Some(coord);
        self.board_full = self.grid.is_full();
        debug!(%marker, %coord, "piece placed");

        if completes_run(&self.grid, self.run_length, coord) {
            if let Some(run) = find_win(&self.grid, self.run_length) {
                return self.finish_with_win(run);
            }
        }

        if self.board_full {
            info!(moves = self.moves_played, "board full, game drawn");
            self.state = SessionState::Finished(GameOutcome::Draw);
            return TurnResult::Draw;
        }

        self.current_turn = (self.current_turn + 1) % self.roster.len();
        TurnResult::Placed {
            coord,
            board_full: self.board_full,
        }
    }

    fn finish_with_win(&mut self, run: WinningRun) -> TurnResult {
        let marker = run.marker;
        if self.roster.mark_winner(marker).is_none() {
            unreachable!("winning marker '{marker}' does not belong to any player");
        }

        info!(%marker, moves = self.moves_played, direction = ?run.direction, "game won");
        self.winner = Some(marker);
        self.state = SessionState::Finished(GameOutcome::Winner(marker));
        let cells = run.cells.clone();
        self.winning_run = Some(run);
        TurnResult::Won { marker, run: cells }
    }

    /// Start over with the same grid size, run length and players.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.roster.clear_wins();
        self.current_turn = 0;
        self.state = SessionState::Setup;
        self.board_full = false;
        self.winner = None;
        self.winning_run = None;
        self.last_move = None;
        self.moves_played = 0;
        info!("session reset");
    }

    pub fn current_player(&self) -> &Player {
        &self.roster.as_slice()[self.current_turn]
    }

    pub fn current_player_id(&self) -> PlayerId {
        PlayerId(self.current_turn)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    pub fn players(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.state {
            SessionState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn winner(&self) -> Option<Marker> {
        self.winner
    }

    pub fn winning_run(&self) -> Option<&WinningRun> {
        self.winning_run.as_ref()
    }

    /// Cell filled by the most recent accepted move.
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn board_full(&self) -> bool {
        self.board_full
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }
}
