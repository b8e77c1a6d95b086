//! Periodic tick sources.
//!
//! The player never owns a clock directly. It starts and stops a `TickSource`,
//! and whoever hosts the player calls `StepSequencePlayer::tick` when the source
//! fires. Tests use `ManualTicks` (time moves only when told to); threaded hosts
//! use `ThreadTicker` together with `PlayerHandle`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{trace, warn};

/// Shortest interval any source fires at; shorter requests (including zero) are raised to it.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Something that can fire at a fixed interval until stopped.
pub trait TickSource {
    /// Begin firing every `interval`. Restarting an active source resets its phase.
    fn start(&mut self, interval: Duration);
    /// Stop firing. Idempotent.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Manually advanced fake clock.
#[derive(Clone, Debug, Default)]
pub struct ManualTicks {
    interval: Option<Duration>,
    carry: Duration,
    starts: usize,
    stops: usize,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval of the active run, `None` while stopped.
    #[inline]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
    #[inline]
    pub fn starts(&self) -> usize {
        self.starts
    }
    #[inline]
    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Let `elapsed` pass and return how many ticks fired.
    ///
    /// Partial intervals carry over to the next call. A stopped source never fires.
    pub fn elapse(&mut self, elapsed: Duration) -> usize {
        let Some(interval) = self.interval else {
            return 0;
        };
        let period = interval.as_nanos();
        let total = (self.carry + elapsed).as_nanos();
        self.carry = Duration::from_nanos((total % period) as u64);
        (total / period) as usize
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self, interval: Duration) {
        self.interval = Some(interval.max(MIN_TICK_INTERVAL));
        self.carry = Duration::ZERO;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.interval.take().is_some() {
            self.stops += 1;
        }
        self.carry = Duration::ZERO;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}

type TickSink = Arc<dyn Fn(u64) + Send + Sync>;

/// Background-thread tick source.
///
/// Each run gets a generation number; the worker passes it to the sink with
/// every tick and exits once `stop` has bumped the shared counter. A tick that
/// was already in flight when `stop` ran still carries the old generation, so
/// the receiving side compares against `generation()` and drops it.
///
/// `stop` does not wait for the worker; retired workers are joined on drop.
pub struct ThreadTicker {
    generation: Arc<AtomicU64>,
    sink: TickSink,
    worker: Option<JoinHandle<()>>,
    retired: Vec<JoinHandle<()>>,
}

impl ThreadTicker {
    pub fn new(sink: impl Fn(u64) + Send + Sync + 'static) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            sink: Arc::new(sink),
            worker: None,
            retired: Vec::new(),
        }
    }

    /// Generation of the current (or most recent) run.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl TickSource for ThreadTicker {
    fn start(&mut self, interval: Duration) {
        self.stop();
        let interval = interval.max(MIN_TICK_INTERVAL);
        let gen = self.generation();
        let shared = Arc::clone(&self.generation);
        let sink = Arc::clone(&self.sink);
        let spawned = thread::Builder::new()
            .name("hullstep-ticker".into())
            .spawn(move || loop {
                thread::sleep(interval);
                if shared.load(Ordering::SeqCst) != gen {
                    trace!(gen, "ticker retired");
                    break;
                }
                sink(gen);
            });
        match spawned {
            Ok(handle) => self.worker = Some(handle),
            Err(err) => warn!(%err, "could not spawn ticker thread"),
        }
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            // the worker notices on its next wake-up
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.retired.retain(|h| !h.is_finished());
            self.retired.push(worker);
        }
    }

    fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        self.stop();
        for worker in self.retired.drain(..) {
            if worker.join().is_err() {
                warn!("ticker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn manual_ticks_carry_partial_intervals() {
        let mut t = ManualTicks::new();
        assert_eq!(t.elapse(Duration::from_secs(5)), 0);
        t.start(Duration::from_millis(600));
        assert_eq!(t.elapse(Duration::from_millis(500)), 0);
        assert_eq!(t.elapse(Duration::from_millis(700)), 2);
        assert_eq!(t.elapse(Duration::from_millis(599)), 0);
        assert_eq!(t.elapse(Duration::from_millis(1)), 1);
        t.stop();
        t.stop();
        assert_eq!(t.stops(), 1);
        assert!(!t.is_running());
        assert_eq!(t.elapse(Duration::from_secs(10)), 0);
    }

    #[test]
    fn restart_resets_phase() {
        let mut t = ManualTicks::new();
        t.start(Duration::from_millis(100));
        assert_eq!(t.elapse(Duration::from_millis(90)), 0);
        t.start(Duration::from_millis(100));
        assert_eq!(t.elapse(Duration::from_millis(90)), 0);
        assert_eq!(t.starts(), 2);
    }

    #[test]
    fn thread_ticker_fires_and_retires() {
        let (tx, rx) = mpsc::channel();
        let mut t = ThreadTicker::new(move |gen| {
            let _ = tx.send(gen);
        });
        t.start(Duration::from_millis(2));
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first, t.generation());
        t.stop();
        assert!(!t.is_running());
        assert_ne!(first, t.generation());
    }

    #[test]
    fn zero_interval_is_raised_to_minimum() {
        let mut t = ManualTicks::new();
        t.start(Duration::ZERO);
        assert_eq!(t.interval(), Some(MIN_TICK_INTERVAL));
        assert_eq!(t.elapse(MIN_TICK_INTERVAL * 3), 3);
    }

    #[test]
    fn drop_joins_retired_workers() {
        let marker = Arc::new(());
        let held = Arc::clone(&marker);
        let (tx, rx) = mpsc::channel();
        let mut t = ThreadTicker::new(move |gen| {
            let _keep = &held;
            let _ = tx.send(gen);
        });
        t.start(Duration::ZERO);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        t.stop();
        t.start(Duration::from_millis(20));
        drop(t);
        // every worker has exited, so only the local handle is left
        assert_eq!(Arc::strong_count(&marker), 1);
    }
}
