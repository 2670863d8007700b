use {
    chrono::{DateTime, Local, TimeDelta},
    std::{
        sync::Mutex,
        time::{Duration, Instant},
    },
};

/// Source of time for everything that paces, times out or timestamps.
pub trait Clock: Send + Sync {
    /// Monotonic time, used for intervals.
    fn now(&self) -> Instant;

    /// Wall clock time, used for file names and burned-in timestamps.
    fn local_time(&self) -> DateTime<Local>;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_time(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock that only moves when told to. `sleep` advances it instead of
/// blocking, so paced code runs instantly.
pub struct ManualClock {
    origin: Instant,
    origin_local: DateTime<Local>,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    pub fn starting_at(local: DateTime<Local>) -> Self {
        Self {
            origin: Instant::now(),
            origin_local: local,
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += duration;
    }

    /// Total virtual time elapsed since construction.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn local_time(&self) -> DateTime<Local> {
        self.origin_local + TimeDelta::from_std(self.elapsed()).unwrap_or(TimeDelta::zero())
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
