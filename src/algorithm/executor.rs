//! Generation loop with restart on contradiction and per-cycle callbacks
//!
//! The loop yields to an observer after every cycle. Returning
//! [`ControlFlow::Break`] stops the run between cycles; the wave stays valid
//! and a later call to [`Generator::run`] picks up where it left off.

use crate::algorithm::propagation::Contradiction;
use crate::algorithm::wave::{StepOutcome, Wave};
use crate::io::configuration::DEFAULT_SEED;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use rand::{SeedableRng, rngs::StdRng};
use std::ops::ControlFlow;

/// Seed and retry policy of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Seed for every random choice of the run
    pub seed: u64,
    /// Attempts allowed before giving up; `None` retries forever
    pub max_attempts: Option<usize>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_attempts: None,
        }
    }
}

impl GenerationConfig {
    /// Check the retry ceiling allows at least one attempt
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is `Some(0)`
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == Some(0) {
            return Err(invalid_parameter(
                "max_attempts",
                &0,
                &"at least one attempt is required",
            ));
        }
        Ok(())
    }
}

/// What happened in the cycle just finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Attempt number, starting at 1 and bumped by every reset
    pub attempt: usize,
    /// Cycles completed across all attempts
    pub cycle: usize,
    /// Cell collapsed in this cycle, if it succeeded
    pub collapsed: Option<usize>,
    /// Cells collapsed in the current attempt
    pub collapsed_count: usize,
    /// Contradiction that ended the previous attempt, if any
    pub contradiction: Option<Contradiction>,
}

/// Receives control once per cycle
pub trait CycleObserver {
    /// Inspect the wave after a cycle and decide whether to go on
    fn on_cycle(&mut self, wave: &Wave, report: &CycleReport) -> ControlFlow<()>;
}

impl<F> CycleObserver for F
where
    F: FnMut(&Wave, &CycleReport) -> ControlFlow<()>,
{
    fn on_cycle(&mut self, wave: &Wave, report: &CycleReport) -> ControlFlow<()> {
        self(wave, report)
    }
}

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every legal cell is collapsed
    Completed {
        /// Attempts used, including the successful one
        attempts: usize,
        /// Cycles executed across all attempts
        cycles: usize,
    },
    /// The observer asked to stop
    Cancelled {
        /// Attempts started so far
        attempts: usize,
        /// Cycles executed so far
        cycles: usize,
    },
}

impl RunOutcome {
    /// Whether the wave was fully solved
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Owns a wave and its random source and drives it to completion
#[derive(Debug)]
pub struct Generator {
    wave: Wave,
    rng: StdRng,
    config: GenerationConfig,
    attempt: usize,
    cycle: usize,
}

impl Generator {
    /// Prepare a run over `wave`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(wave: Wave, config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wave,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            attempt: 1,
            cycle: 0,
        })
    }

    /// Wave in its current state
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Give up ownership of the wave
    pub fn into_wave(self) -> Wave {
        self.wave
    }

    /// Current attempt number
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    /// Run until complete, cancelled, or out of attempts
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Unsatisfiable`] once the number of attempts
    /// ending in a contradiction reaches the configured ceiling
    pub fn run(&mut self, observer: &mut impl CycleObserver) -> Result<RunOutcome> {
        log::info!(
            "Solving {}x{} grid with {} tiles ({} heuristic, seed {})",
            self.wave.grid().width(),
            self.wave.grid().height(),
            self.wave.catalog().len(),
            self.wave.heuristic(),
            self.config.seed
        );

        loop {
            let report = match self.wave.step(&mut self.rng) {
                Ok(StepOutcome::Complete) => {
                    log::info!(
                        "Completed after {} attempt(s) and {} cycles",
                        self.attempt,
                        self.cycle
                    );
                    return Ok(RunOutcome::Completed {
                        attempts: self.attempt,
                        cycles: self.cycle,
                    });
                }
                Ok(StepOutcome::Collapsed { cell, tile }) => {
                    self.cycle += 1;
                    log::debug!(
                        "Cycle {}: cell {cell} -> tile {tile} ({} collapsed)",
                        self.cycle,
                        self.wave.collapsed_count()
                    );
                    CycleReport {
                        attempt: self.attempt,
                        cycle: self.cycle,
                        collapsed: Some(cell),
                        collapsed_count: self.wave.collapsed_count(),
                        contradiction: None,
                    }
                }
                Err(contradiction) => {
                    self.cycle += 1;
                    log::warn!(
                        "Contradiction on attempt {}: {contradiction}; resetting",
                        self.attempt
                    );
                    if self
                        .config
                        .max_attempts
                        .is_some_and(|ceiling| self.attempt >= ceiling)
                    {
                        return Err(AlgorithmError::Unsatisfiable {
                            attempts: self.attempt,
                        });
                    }
                    self.wave.reset();
                    self.attempt += 1;
                    CycleReport {
                        attempt: self.attempt,
                        cycle: self.cycle,
                        collapsed: None,
                        collapsed_count: 0,
                        contradiction: Some(contradiction),
                    }
                }
            };

            if observer.on_cycle(&self.wave, &report).is_break() {
                log::info!("Run cancelled at cycle {}", self.cycle);
                return Ok(RunOutcome::Cancelled {
                    attempts: self.attempt,
                    cycles: self.cycle,
                });
            }
        }
    }

    /// Run without observing intermediate cycles
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Unsatisfiable`] as [`Self::run`] does
    pub fn run_to_completion(&mut self) -> Result<RunOutcome> {
        self.run(&mut |_: &Wave, _: &CycleReport| ControlFlow::Continue(()))
    }
}
