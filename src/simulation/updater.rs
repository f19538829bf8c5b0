//! Step scheduler.
//!
//! The updater turns real elapsed time into simulated time and advances a set
//! of solids one step at a time:
//!
//! 1. measure the real time since the previous step,
//! 2. skip the step if it comes sooner than `1 / max_steps_per_second`,
//! 3. scale the elapsed time by `time_scale`,
//! 4. translate every solid by `velocity × simulated time`,
//! 5. run the collision engine on every unordered pair (O(n²)),
//! 6. record `{duration, interval}` in a bounded history.
//!
//! The updater never loops by itself: [`crate::World::run`] drives it and
//! checks `is_commanded` between steps, so `stop()` takes effect after the
//! step in flight.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::error::{Result, SimError};
use crate::simulation::collision::check_for_collision;
use crate::simulation::solid::Solid;

pub const DEFAULT_TIME_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_STEPS_PER_SECOND: f64 = 1000.0;
pub const DEFAULT_HISTORY_LENGTH: usize = 100;

/// Timing of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    /// Time spent computing the step.
    pub duration: Duration,
    /// Time between the end of the previous step and the end of this one.
    pub interval: Duration,
}

/// Ring buffer of the most recent step records.
#[derive(Debug, Clone)]
pub struct StepHistory {
    capacity: usize,
    records: VecDeque<StepRecord>,
}

impl StepHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn push(&mut self, record: StepRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter()
    }

    /// Steps per second over the recorded intervals.
    pub fn steps_per_second(&self) -> Option<f64> {
        let total: Duration = self.records.iter().map(|r| r.interval).sum();
        if self.records.is_empty() || total.is_zero() {
            return None;
        }
        Some(self.records.len() as f64 / total.as_secs_f64())
    }

    /// Mean computing time of the recorded steps.
    pub fn average_duration(&self) -> Option<Duration> {
        if self.records.is_empty() {
            return None;
        }
        let total: Duration = self.records.iter().map(|r| r.duration).sum();
        Some(total / self.records.len() as u32)
    }
}

/// What a call to [`Updater::step_at`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The updater is not commanded to run.
    Idle,
    /// Too little time since the previous step; nothing was touched.
    Throttled,
    /// Solids were advanced by `simulated_secs` and `collisions` pairs collided.
    Stepped { collisions: usize, simulated_secs: f64 },
}

#[derive(Debug)]
pub struct Updater {
    running: bool,
    commanded: bool,
    last_step: Option<Instant>,
    time_scale: f64,
    max_steps_per_second: f64,
    history: StepHistory,
    total_collisions: u64,
    simulated_time: f64,
}

impl Default for Updater {
    fn default() -> Self {
        Self::stopped(DEFAULT_HISTORY_LENGTH)
    }
}

impl Updater {
    /// Create a stopped updater.
    ///
    /// `max_steps_per_second` may be `+inf` to disable throttling.
    /// `history_length` must be at least 1, the step metrics are computed from
    /// the history.
    pub fn new(time_scale: f64, max_steps_per_second: f64, history_length: usize) -> Result<Self> {
        if history_length == 0 {
            return Err(SimError::InvalidUpdaterSetting {
                name: "history_length",
                value: 0.0,
            });
        }
        let mut updater = Self::stopped(history_length);
        updater.set_time_scale(time_scale)?;
        updater.set_max_steps_per_second(max_steps_per_second)?;
        Ok(updater)
    }

    fn stopped(history_length: usize) -> Self {
        Self {
            running: false,
            commanded: false,
            last_step: None,
            time_scale: DEFAULT_TIME_SCALE,
            max_steps_per_second: DEFAULT_MAX_STEPS_PER_SECOND,
            history: StepHistory::new(history_length),
            total_collisions: 0,
            simulated_time: 0.0,
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Simulated seconds per real second; must be finite and non-negative.
    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<()> {
        if !time_scale.is_finite() || time_scale < 0.0 {
            return Err(SimError::InvalidUpdaterSetting {
                name: "time_scale",
                value: time_scale,
            });
        }
        self.time_scale = time_scale;
        Ok(())
    }

    pub fn max_steps_per_second(&self) -> f64 {
        self.max_steps_per_second
    }

    /// Upper bound on the step rate; must be positive.
    pub fn set_max_steps_per_second(&mut self, max_steps_per_second: f64) -> Result<()> {
        if max_steps_per_second.is_nan() || max_steps_per_second <= 0.0 {
            return Err(SimError::InvalidUpdaterSetting {
                name: "max_steps_per_second",
                value: max_steps_per_second,
            });
        }
        self.max_steps_per_second = max_steps_per_second;
        Ok(())
    }

    /// Shortest real interval between two steps.
    pub fn min_step_interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.max_steps_per_second).unwrap_or(Duration::MAX)
    }

    /// Whether a step is executing right now.
    ///
    /// `step_at` holds `&mut self` for the whole step, so outside callers
    /// always read `false`; the flag is only observable from inside a step.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the updater has been started and not stopped.
    pub fn is_commanded(&self) -> bool {
        self.commanded
    }

    /// Collisions resolved since the last `start()`.
    pub fn total_collisions(&self) -> u64 {
        self.total_collisions
    }

    /// Simulated seconds elapsed since the last `start()`.
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn steps_per_second(&self) -> Option<f64> {
        self.history.steps_per_second()
    }

    pub fn average_step_duration(&self) -> Option<Duration> {
        self.history.average_duration()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start counting time from `now`. Does nothing if already started.
    pub fn start_at(&mut self, now: Instant) {
        if self.commanded {
            return;
        }
        self.commanded = true;
        self.last_step = Some(now);
        self.total_collisions = 0;
        self.simulated_time = 0.0;
        info!("updater started");
    }

    /// Stop after the step in flight and forget the history.
    pub fn stop(&mut self) {
        if !self.commanded {
            return;
        }
        self.commanded = false;
        self.history.clear();
        info!(
            "updater stopped after {} collision(s), {:.3} s simulated",
            self.total_collisions, self.simulated_time
        );
    }

    /// Run one step as if the clock read `now`.
    pub fn step_at<'a, I>(&mut self, solids: I, now: Instant) -> StepOutcome
    where
        I: IntoIterator<Item = &'a mut Solid>,
    {
        if !self.commanded {
            return StepOutcome::Idle;
        }

        let last = *self.last_step.get_or_insert(now);
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_step_interval() {
            trace!("step throttled after {:?}", elapsed);
            return StepOutcome::Throttled;
        }

        self.running = true;
        let started = Instant::now();
        let simulated_secs = elapsed.as_secs_f64() * self.time_scale;

        let mut bodies: Vec<&mut Solid> = solids.into_iter().collect();
        for solid in bodies.iter_mut() {
            let delta = solid.velocity * simulated_secs;
            solid.translate(&delta);
        }

        let mut collisions = 0;
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let s1 = &mut *head[i];
            for s2 in tail.iter_mut() {
                if check_for_collision(s1, s2) {
                    collisions += 1;
                }
            }
        }

        if collisions > 0 {
            debug!("{} collision(s)", collisions);
        }

        let duration = started.elapsed();
        let finished = now + duration;
        self.history.push(StepRecord {
            duration,
            interval: finished.saturating_duration_since(last),
        });
        self.last_step = Some(finished);
        self.total_collisions += collisions as u64;
        self.simulated_time += simulated_secs;
        self.running = false;

        StepOutcome::Stepped {
            collisions,
            simulated_secs,
        }
    }
}
