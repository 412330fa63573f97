use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fired once per game when the phase leaves [`Phase::Active`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalEvent {
    Won,
    Lost,
}

impl TerminalEvent {
    pub const fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Active => None,
            Phase::Won => Some(Self::Won),
            Phase::Lost => Some(Self::Lost),
        }
    }
}

/// Input accepted from a presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    NewGame,
    Reveal(Coord2),
    ToggleFlag(Coord2),
    Tick,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    NewGame,
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
    Tick { elapsed_seconds: u32 },
    /// The game already ended, only [`Command::NewGame`] is accepted.
    Ignored,
}

/// Start/stop signal for the externally scheduled one-second tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Timer {
    Running,
    Stopped,
}

type TerminalListener = Box<dyn FnMut(TerminalEvent)>;

/// Owns one game at a time plus its timer and terminal notifications.
///
/// Commands run to completion one after another; a presentation layer must
/// serialize its input events before handing them over.
pub struct Session<P: MinePlacer = RandomPlacer> {
    config: GameConfig,
    placer: P,
    engine: PlayEngine,
    elapsed_seconds: u32,
    timer: Timer,
    terminal_event: Option<TerminalEvent>,
    listeners: Vec<TerminalListener>,
}

impl Session<RandomPlacer> {
    /// Classic board seeded from OS entropy.
    pub fn classic() -> Self {
        Self::new(GameConfig::CLASSIC, RandomPlacer::from_entropy())
    }
}

impl<P: MinePlacer> Session<P> {
    /// Starts the first game right away.
    pub fn new(config: GameConfig, mut placer: P) -> Self {
        let engine = PlayEngine::generate(config, &mut placer);
        log::debug!(
            "New {}x{} game with {} mines",
            config.size(),
            config.size(),
            config.mines()
        );
        Self {
            config,
            placer,
            engine,
            elapsed_seconds: 0,
            timer: Timer::Running,
            terminal_event: None,
            listeners: Vec::new(),
        }
    }

    /// Registers a callback for the win/loss notification.
    pub fn on_terminal(&mut self, listener: impl FnMut(TerminalEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Discards the current game and starts a fresh one with the timer running.
    pub fn new_game(&mut self) {
        self.engine = PlayEngine::generate(self.config, &mut self.placer);
        self.elapsed_seconds = 0;
        self.timer = Timer::Running;
        self.terminal_event = None;
        log::debug!(
            "New {}x{} game with {} mines",
            self.config.size(),
            self.config.size(),
            self.config.mines()
        );
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.is_finished() {
            log::debug!("Game over, ignoring reveal at {:?}", coords);
            return RevealOutcome::Continue;
        }

        let outcome = self.engine.reveal(coords);
        self.check_terminal();
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.is_finished() {
            log::debug!("Game over, ignoring flag at {:?}", coords);
            return FlagOutcome::NoChange;
        }

        self.engine.toggle_flag(coords)
    }

    /// Advances the clock by one second, returns whether the timer was running.
    pub fn tick(&mut self) -> bool {
        match self.timer {
            Timer::Running => {
                self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
                true
            }
            Timer::Stopped => false,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::NewGame => {
                self.new_game();
                CommandOutcome::NewGame
            }
            Command::Reveal(_) | Command::ToggleFlag(_) if self.is_finished() => {
                log::debug!("Game over, ignoring {:?}", command);
                CommandOutcome::Ignored
            }
            Command::Reveal(coords) => CommandOutcome::Reveal(self.reveal(coords)),
            Command::ToggleFlag(coords) => CommandOutcome::Flag(self.toggle_flag(coords)),
            Command::Tick => {
                self.tick();
                CommandOutcome::Tick {
                    elapsed_seconds: self.elapsed_seconds,
                }
            }
        }
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn flagged_count(&self) -> CellCount {
        self.engine.flagged_count()
    }

    /// Whether the external scheduler should keep delivering ticks.
    pub fn timer_running(&self) -> bool {
        matches!(self.timer, Timer::Running)
    }

    pub fn last_terminal_event(&self) -> Option<TerminalEvent> {
        self.terminal_event
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            revealed_safe_count: self.engine.revealed_safe_count(),
            flagged_count: self.engine.flagged_count(),
            elapsed_seconds: self.elapsed_seconds,
            phase: self.engine.phase(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(&self.engine, self.elapsed_seconds)
    }

    /// Stops the timer and notifies listeners the first time the game ends.
    fn check_terminal(&mut self) {
        if self.terminal_event.is_some() {
            return;
        }

        let Some(event) = TerminalEvent::from_phase(self.engine.phase()) else {
            return;
        };

        self.timer = Timer::Stopped;
        self.terminal_event = Some(event);
        log::debug!("Game ended: {:?} after {}s", event, self.elapsed_seconds);
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl<P: MinePlacer> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("timer", &self.timer)
            .field("terminal_event", &self.terminal_event)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    fn session(size: Coord, mines: &[Coord2]) -> Session<FixedPlacer> {
        let config = GameConfig::new(size, mines.len() as CellCount).unwrap();
        Session::new(config, FixedPlacer::new(mines.iter().copied()))
    }

    fn record_events(session: &mut Session<FixedPlacer>) -> Rc<RefCell<Vec<TerminalEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.on_terminal(move |event| sink.borrow_mut().push(event));
        events
    }

    #[test]
    fn new_session_starts_active_with_timer() {
        let session = session(3, &[(0, 0)]);

        assert_eq!(session.phase(), Phase::Active);
        assert!(session.timer_running());
        assert_eq!(session.state(), SessionState::default());
        assert_eq!(session.grid().count_where(Cell::is_mine), 1);
    }

    #[test]
    fn tick_advances_only_while_running() {
        let mut session = session(2, &[(0, 0)]);

        assert!(session.tick());
        assert!(session.tick());
        assert_eq!(session.elapsed_seconds(), 2);

        session.reveal((0, 0));

        assert!(!session.timer_running());
        assert!(!session.tick());
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn terminal_event_fires_once() {
        let mut session = session(2, &[(0, 0)]);
        let events = record_events(&mut session);

        assert_eq!(session.reveal((0, 0)), RevealOutcome::MineHit);
        assert_eq!(session.reveal((1, 1)), RevealOutcome::Continue);
        session.toggle_flag((0, 1));

        assert_eq!(*events.borrow(), [TerminalEvent::Lost]);
        assert_eq!(session.last_terminal_event(), Some(TerminalEvent::Lost));
        assert_eq!(session.flagged_count(), 0);
    }

    #[test]
    fn win_notifies_listeners() {
        let mut session = session(2, &[(0, 0)]);
        let events = record_events(&mut session);

        session.reveal((0, 1));
        session.reveal((1, 0));
        session.reveal((1, 1));

        assert_eq!(session.phase(), Phase::Won);
        assert_eq!(*events.borrow(), [TerminalEvent::Won]);
    }

    #[test]
    fn new_game_resets_everything() {
        let mut session = session(2, &[(0, 0)]);
        let events = record_events(&mut session);
        session.tick();
        session.toggle_flag((1, 1));
        session.reveal((0, 0));

        session.new_game();

        assert_eq!(session.state(), SessionState::default());
        assert!(session.timer_running());
        assert_eq!(session.last_terminal_event(), None);
        assert_eq!(session.grid().count_where(Cell::is_revealed), 0);

        session.reveal((0, 0));
        assert_eq!(*events.borrow(), [TerminalEvent::Lost, TerminalEvent::Lost]);
    }

    #[test]
    fn dispatch_routes_commands() {
        let mut session = session(3, &[(0, 0)]);

        assert_eq!(
            session.dispatch(Command::ToggleFlag((2, 2))),
            CommandOutcome::Flag(FlagOutcome::Changed)
        );
        assert_eq!(
            session.dispatch(Command::Reveal((1, 1))),
            CommandOutcome::Reveal(RevealOutcome::Continue)
        );
        assert_eq!(
            session.dispatch(Command::Tick),
            CommandOutcome::Tick { elapsed_seconds: 1 }
        );
        assert_eq!(
            session.dispatch(Command::Reveal((0, 0))),
            CommandOutcome::Reveal(RevealOutcome::MineHit)
        );
        assert_eq!(session.dispatch(Command::Reveal((2, 1))), CommandOutcome::Ignored);
        assert_eq!(session.dispatch(Command::NewGame), CommandOutcome::NewGame);
        assert_eq!(session.phase(), Phase::Active);
    }

    #[test]
    fn random_sessions_honor_mine_count() {
        let mut session = Session::new(GameConfig::CLASSIC, RandomPlacer::seeded(9));

        for _ in 0..5 {
            assert_eq!(session.grid().count_where(Cell::is_mine), 25);
            assert_eq!(session.engine().mine_locations().len(), 25);
            session.new_game();
        }
    }

    #[test]
    fn classic_session_uses_the_default_board() {
        let session = Session::classic();

        assert_eq!(session.grid().size(), GameConfig::CLASSIC.size());
        assert_eq!(session.grid().count_where(Cell::is_mine), GameConfig::CLASSIC.mines());
        assert_eq!(session.engine().safe_cells(), 200);
        assert!(session.timer_running());
    }
}
