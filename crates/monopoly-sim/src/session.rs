//! Game session management.

use monopoly_core::{Board, Game, GameConfig, GameError, GameEvent, GameSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Game already finished")]
    GameFinished,

    #[error("Not {0}'s turn")]
    NotYourTurn(String),

    #[error("Session lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    InGame,
    /// A player went bankrupt
    Finished,
    /// Stopped at the turn cap with everyone still solvent
    TurnLimit,
}

/// Final report printed by the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session: Uuid,
    pub status: SessionStatus,
    pub turns: u32,
    pub loser: Option<String>,
    /// Solvent player with the highest net worth
    pub leader: Option<String>,
    pub snapshot: GameSnapshot,
}

struct SessionState {
    game: Game,
    /// Whose turn it is
    current: String,
    status: SessionStatus,
}

/// A single game, with turns serialized behind one lock.
pub struct GameSession {
    pub id: Uuid,
    state: Mutex<SessionState>,
}

impl GameSession {
    /// Seat the players and roll for who starts
    pub fn new<S: AsRef<str>>(
        names: &[S],
        board: Board,
        config: GameConfig,
    ) -> Result<Self, SessionError> {
        let mut game = Game::with_board(names, board, config)?;
        let current = game.pick_starter();
        let id = Uuid::new_v4();
        info!("Session {} created, {} starts", id, current);

        Ok(Self {
            id,
            state: Mutex::new(SessionState {
                game,
                current,
                status: SessionStatus::InGame,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        self.state.lock().map_err(|_| SessionError::Poisoned)
    }

    pub fn status(&self) -> Result<SessionStatus, SessionError> {
        Ok(self.lock()?.status)
    }

    pub fn current_player(&self) -> Result<String, SessionError> {
        Ok(self.lock()?.current.clone())
    }

    /// Play a turn for the named player, who must be the current one
    pub fn play_turn(&self, name: &str) -> Result<Vec<GameEvent>, SessionError> {
        let mut state = self.lock()?;
        if state.current != name {
            return Err(SessionError::NotYourTurn(name.to_string()));
        }
        Self::advance(&mut state)
    }

    /// Play a turn for whoever is current
    pub fn play_next(&self) -> Result<Vec<GameEvent>, SessionError> {
        let mut state = self.lock()?;
        Self::advance(&mut state)
    }

    fn advance(state: &mut SessionState) -> Result<Vec<GameEvent>, SessionError> {
        if state.status != SessionStatus::InGame {
            return Err(SessionError::GameFinished);
        }

        let name = state.current.clone();
        let first_event = state.game.events().len();
        match state.game.play_turn(&name) {
            Ok(events) => {
                state.current = state.game.pick_next_player(&name)?;
                Ok(events)
            }
            Err(GameError::GameOver { loser }) => {
                info!("{} is bankrupt, game over", loser);
                state.status = SessionStatus::Finished;
                Ok(state.game.events()[first_event..].to_vec())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Play until the game ends or `max_turns` have been played
    pub fn run(&self, max_turns: u32) -> Result<SessionSummary, SessionError> {
        for _ in 0..max_turns {
            if self.status()? != SessionStatus::InGame {
                break;
            }
            self.play_next()?;
        }

        {
            let mut state = self.lock()?;
            if state.status == SessionStatus::InGame {
                info!("Turn limit of {} reached", max_turns);
                state.status = SessionStatus::TurnLimit;
            }
        }
        self.summary()
    }

    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let state = self.lock()?;
        let snapshot = state.game.snapshot();
        let leader = snapshot
            .players
            .iter()
            .filter(|p| !p.eliminated)
            .max_by_key(|p| p.net_worth)
            .map(|p| p.name.clone());

        Ok(SessionSummary {
            session: self.id,
            status: state.status,
            turns: state.game.turn,
            loser: state.game.loser().map(String::from),
            leader,
            snapshot,
        })
    }
}
