//! JSON-lines messages between a [`Session`] and an out-of-process frontend.

use minefield_core::{CellView, Command, Coord, Phase, Session, Snapshot, TerminalEvent};
use minefield_core::{CellCount, MinePlacer};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    NewGame,
    Reveal { row: Coord, col: Coord },
    Flag { row: Coord, col: Coord },
    Tick,
}

impl ClientMessage {
    pub fn into_command(self) -> Command {
        match self {
            Self::NewGame => Command::NewGame,
            Self::Reveal { row, col } => Command::Reveal((row, col)),
            Self::Flag { row, col } => Command::ToggleFlag((row, col)),
            Self::Tick => Command::Tick,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WireCell {
    Hidden,
    Flagged,
    Revealed { adjacent: u8 },
    Mine,
}

impl From<CellView> for WireCell {
    fn from(view: CellView) -> Self {
        match view {
            CellView::Hidden => Self::Hidden,
            CellView::Flagged => Self::Flagged,
            CellView::Empty => Self::Revealed { adjacent: 0 },
            CellView::Number(adjacent) => Self::Revealed { adjacent },
            CellView::Mine => Self::Mine,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WirePhase {
    Active,
    Won,
    Lost,
}

impl From<Phase> for WirePhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Active => Self::Active,
            Phase::Won => Self::Won,
            Phase::Lost => Self::Lost,
        }
    }
}

impl From<TerminalEvent> for WirePhase {
    fn from(event: TerminalEvent) -> Self {
        match event {
            TerminalEvent::Won => Self::Won,
            TerminalEvent::Lost => Self::Lost,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Snapshot {
        size: Coord,
        mines: CellCount,
        flags: CellCount,
        elapsed_seconds: u32,
        phase: WirePhase,
        field: Vec<Vec<WireCell>>,
    },
    Terminal {
        event: WirePhase,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::Snapshot {
            size: snapshot.size,
            mines: snapshot.mine_count,
            flags: snapshot.state.flagged_count,
            elapsed_seconds: snapshot.state.elapsed_seconds,
            phase: snapshot.state.phase.into(),
            field: snapshot
                .rows()
                .map(|row| row.map(WireCell::from).collect())
                .collect(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

pub fn decode_line(line: &str) -> serde_json::Result<ClientMessage> {
    serde_json::from_str(line.trim())
}

pub fn encode_line(message: &ServerMessage) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

/// Applies one client message and returns the replies to send back.
///
/// A snapshot always follows; a terminal message precedes it on the command
/// that ended the game.
pub fn handle<P: MinePlacer>(session: &mut Session<P>, message: ClientMessage) -> Vec<ServerMessage> {
    let before = session.last_terminal_event();
    session.dispatch(message.into_command());

    let mut replies = Vec::with_capacity(2);
    if let (None, Some(event)) = (before, session.last_terminal_event()) {
        replies.push(ServerMessage::Terminal {
            event: event.into(),
        });
    }
    replies.push(ServerMessage::from_snapshot(&session.snapshot()));
    replies
}
