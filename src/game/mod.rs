//! Core game logic: gravity grid, players, win detection, and the session
//! state machine that ties them together.

mod grid;
mod player;
mod session;
pub mod win;

pub use grid::{Cell, Coord, Grid, GridSnapshot, MoveError, OutOfBounds};
pub use player::{Marker, Player, PlayerId, Roster};
pub use session::{new_session, GameOutcome, GameSession, Rejection, SessionState, TurnResult};
pub use win::{find_win, Direction, WinningRun};
