use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    record_id::{MAX_COUNTER, MAX_TIMESTAMP_MS},
    RecordId,
};
use rand::Rng;
use std::sync::Mutex;

/// Upper bound for the random counter seed drawn at each new millisecond.
///
/// Keeping the top counter bit clear leaves at least 2048 ids per
/// millisecond before the generator runs ahead of the clock.
const MAX_COUNTER_SEED: u16 = MAX_COUNTER >> 1;

#[derive(Debug, Default)]
struct GeneratorState {
    last_millis: Option<i64>,
    counter: u16,
}

/// Record id generator with monotonic counter semantics.
///
/// One generator is shared by every task of a process; each call holds the
/// state lock only for the arithmetic and never sleeps, so it is safe to
/// call from async tasks.
pub struct Flake<C: Clock = SystemClock> {
    clock: C,
    state: Mutex<GeneratorState>,
}

impl Flake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Flake<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Flake<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Generates the next record id.
    ///
    /// - a clock ahead of the last id starts a new millisecond with a fresh seed
    /// - otherwise the last millisecond is kept and the counter increments,
    ///   which also covers a clock that moved backward
    /// - if the counter is exhausted, the embedded millisecond advances by one
    ///   ahead of the clock
    pub fn next_id(&self) -> Result<RecordId, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let now = self.clock.now();
        let now_millis = now.as_millisecond();
        if now_millis < 0 {
            return Err(Error::ClockBeforeEpoch { now });
        }

        let millis = match state.last_millis {
            Some(last) if now_millis <= last => {
                if state.counter < MAX_COUNTER {
                    state.counter += 1;
                    last
                } else {
                    state.counter = counter_seed();
                    last + 1
                }
            }
            _ => {
                state.counter = counter_seed();
                now_millis
            }
        };

        if millis as u64 > MAX_TIMESTAMP_MS {
            return Err(Error::OverTimeLimit);
        }

        let id = RecordId::from_parts(millis as u64, state.counter, rand::thread_rng().gen());

        state.last_millis = Some(millis);

        Ok(id)
    }
}

fn counter_seed() -> u16 {
    rand::thread_rng().gen_range(0..=MAX_COUNTER_SEED)
}
