//! Race - Countdown and race timing
//!
//! A small state machine: NotStarted -> Countdown -> Racing ->
//! Finished. The countdown is tick-driven rather than timer-driven so
//! the whole simulation stays deterministic under an external loop.

use serde::{Deserialize, Serialize};

use crate::events::Signal;

/// Race configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Countdown length before the race starts (seconds).
    pub countdown_seconds: f32,
    /// Longitudinal position of the finish line.
    pub finish_line_z: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self { countdown_seconds: 5.0, finish_line_z: 2000.0 }
    }
}

/// Race status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    NotStarted,
    Countdown,
    Racing,
    Finished,
}

/// Race state machine and timing.
pub struct Race {
    config: RaceConfig,
    status: RaceStatus,
    countdown: f32,
    race_time: f32,
    /// Fired once when the countdown reaches zero.
    pub on_race_start: Signal<()>,
    /// Fired once when the race ends.
    pub on_race_end: Signal<()>,
    /// Fired with the elapsed race time every tick while racing.
    pub on_race_time: Signal<f32>,
}

impl Race {
    pub fn new(config: RaceConfig) -> Self {
        let countdown = config.countdown_seconds;
        Self {
            config,
            status: RaceStatus::NotStarted,
            countdown,
            race_time: 0.0,
            on_race_start: Signal::new(),
            on_race_end: Signal::new(),
            on_race_time: Signal::new(),
        }
    }

    /// Begins the pre-race countdown.
    pub fn start_countdown(&mut self) {
        if self.status == RaceStatus::NotStarted {
            self.status = RaceStatus::Countdown;
            self.countdown = self.config.countdown_seconds;
            log::info!("race countdown started ({}s)", self.countdown);
        }
    }

    /// Advances the countdown or race clock by one tick.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        match self.status {
            RaceStatus::NotStarted | RaceStatus::Finished => {}

            RaceStatus::Countdown => {
                self.countdown -= dt;
                if self.countdown <= 0.0 {
                    self.countdown = 0.0;
                    self.status = RaceStatus::Racing;
                    log::info!("race started");
                    self.on_race_start.emit(());
                }
            }

            RaceStatus::Racing => {
                self.race_time += dt;
                self.on_race_time.emit(self.race_time);
            }
        }
    }

    /// Ends the race. Idempotent; does nothing unless racing.
    pub fn end_race(&mut self) {
        if self.status != RaceStatus::Racing {
            return;
        }
        self.status = RaceStatus::Finished;
        log::info!("race finished in {:.2}s", self.race_time);
        self.on_race_end.emit(());
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn race_time(&self) -> f32 {
        self.race_time
    }

    /// Whole seconds left on the countdown, for the countdown display.
    /// `None` once the race is underway.
    pub fn countdown_display(&self) -> Option<u32> {
        if self.status == RaceStatus::Countdown {
            Some(self.countdown.ceil() as u32)
        } else {
            None
        }
    }

    pub fn finish_line_z(&self) -> f32 {
        self.config.finish_line_z
    }
}

impl std::fmt::Debug for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Race")
            .field("status", &self.status)
            .field("countdown", &self.countdown)
            .field("race_time", &self.race_time)
            .finish()
    }
}
