//! Session: the clock around a [`GameState`].
//!
//! The core has no notion of time. A `Session` owns the game, turns elapsed
//! wall-clock milliseconds into gravity ticks at the level's cadence, and
//! keeps soft drop "held" for a short grace period after each
//! `SoftDropHold`, since terminals report key repeats but not releases.

use log::debug;

use crate::core::{GameState, LockEvent, StepOutcome};
use crate::types::Command;

/// Frame period of the driver loop.
pub const TICK_MS: u32 = 16;

/// How long soft drop stays held after the last hold command.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    /// Time banked towards the next gravity tick
    gravity_ms: u32,
    /// Remaining soft-drop hold; zero when released
    soft_drop_ms: u32,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            gravity_ms: 0,
            soft_drop_ms: 0,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_drop_ms > 0
    }

    /// Current gravity interval, accounting for a held soft drop
    pub fn interval_ms(&self) -> u32 {
        self.game.gravity_interval_ms(self.soft_dropping())
    }

    /// Milliseconds until gravity next fires
    pub fn until_next_tick_ms(&self) -> u32 {
        self.interval_ms().saturating_sub(self.gravity_ms)
    }

    /// Feed one command to the game.
    pub fn handle(&mut self, command: Command) -> bool {
        let applied = self.game.apply(command);
        match command {
            Command::SoftDropHold if applied => {
                if !self.soft_dropping() {
                    // Apply the faster cadence from now, not from the last tick.
                    self.gravity_ms = 0;
                }
                self.soft_drop_ms = SOFT_DROP_GRACE_MS;
            }
            Command::Restart if applied => {
                self.gravity_ms = 0;
                self.soft_drop_ms = 0;
            }
            Command::HardDrop | Command::SoftDropStep if applied => {
                // A new piece starts with a full interval.
                self.gravity_ms = 0;
            }
            _ => {}
        }
        applied
    }

    /// Advance the clock by `elapsed_ms`, running any gravity ticks that
    /// came due. Returns the number of ticks run.
    ///
    /// Time does not accumulate while paused, before the start or after the
    /// session has ended. A lock resets the accumulator so the next piece
    /// gets a full interval.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.game.is_playing() {
            return 0;
        }

        if self.soft_drop_ms > 0 {
            self.soft_drop_ms = self.soft_drop_ms.saturating_sub(elapsed_ms);
            if self.soft_drop_ms == 0 {
                debug!("soft drop released");
            }
        }

        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);
        let mut ticks = 0;
        loop {
            let interval = self.interval_ms();
            if self.gravity_ms < interval {
                break;
            }
            self.gravity_ms -= interval;
            ticks += 1;
            match self.game.gravity_tick() {
                StepOutcome::Moved => {}
                StepOutcome::Locked => {
                    self.gravity_ms = 0;
                    break;
                }
                StepOutcome::ToppedOut | StepOutcome::Ignored => {
                    self.gravity_ms = 0;
                    self.soft_drop_ms = 0;
                    break;
                }
            }
        }
        ticks
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.game.take_last_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn session(seed: u64) -> Session {
        let mut game = GameState::new(GameConfig::default(), seed);
        game.start();
        Session::new(game)
    }

    #[test]
    fn gravity_fires_on_level_cadence() {
        let mut s = session(1);
        let y0 = s.game().active().unwrap().y;

        assert_eq!(s.advance(499), 0);
        assert_eq!(s.game().active().unwrap().y, y0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.game().active().unwrap().y, y0 + 1);
        assert_eq!(s.until_next_tick_ms(), 500);
    }

    #[test]
    fn long_frames_run_several_ticks() {
        let mut s = session(1);
        let y0 = s.game().active().unwrap().y;
        assert_eq!(s.advance(1_250), 2);
        assert_eq!(s.game().active().unwrap().y, y0 + 2);
        assert_eq!(s.until_next_tick_ms(), 250);
    }

    #[test]
    fn soft_drop_hold_speeds_up_then_expires() {
        let mut s = session(1);
        assert!(s.handle(Command::SoftDropHold));
        assert!(s.soft_dropping());
        assert_eq!(s.interval_ms(), 100);

        let y0 = s.game().active().unwrap().y;
        assert_eq!(s.advance(100), 1);
        assert_eq!(s.game().active().unwrap().y, y0 + 1);

        // Grace runs out without another hold.
        s.advance(50);
        assert!(!s.soft_dropping());
        assert_eq!(s.interval_ms(), 500);
    }

    #[test]
    fn repeated_holds_keep_soft_drop_alive() {
        let mut s = session(1);
        for _ in 0..10 {
            s.handle(Command::SoftDropHold);
            s.advance(100);
            assert!(s.soft_dropping());
        }
    }

    #[test]
    fn paused_session_does_not_fall() {
        let mut s = session(1);
        assert!(s.handle(Command::TogglePause));
        let before = s.game().active();
        assert_eq!(s.advance(10_000), 0);
        assert_eq!(s.game().active(), before);
        assert!(!s.handle(Command::SoftDropHold));
        assert!(!s.soft_dropping());
    }

    #[test]
    fn gravity_eventually_locks_and_reports() {
        let mut s = session(5);
        let mut ticks = 0;
        while s.game().pieces_spawned() < 2 {
            ticks += s.advance(TICK_MS);
            assert!(ticks < 100);
        }
        let event = s.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(s.game().board().filled_count(), 4);
    }

    #[test]
    fn restart_clears_timers() {
        let mut s = session(8);
        s.handle(Command::SoftDropHold);
        s.advance(60);
        assert!(s.handle(Command::Restart));
        assert!(!s.soft_dropping());
        assert_eq!(s.until_next_tick_ms(), 500);
    }
}
