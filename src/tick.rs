//! Cached timestamps and the background thread refreshing them.
use crate::types::TimeZone;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// The formatted timestamp shared between a logger and its ticker.
///
/// While disabled, `current` formats the time on every call.
#[derive(Debug)]
pub(crate) struct TimestampCache {
    timezone: TimeZone,
    cached: RwLock<Option<String>>,
}
impl TimestampCache {
    pub fn new(timezone: TimeZone) -> Self {
        TimestampCache {
            timezone,
            cached: RwLock::new(None),
        }
    }

    pub fn current(&self) -> String {
        let cached = self.cached.read().unwrap_or_else(PoisonError::into_inner);
        match *cached {
            Some(ref timestamp) => timestamp.clone(),
            None => self.timezone.timestamp(),
        }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Stores a freshly formatted timestamp, enabling the cache.
    pub fn refresh(&self) {
        let timestamp = self.timezone.timestamp();
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(timestamp);
    }

    pub fn disable(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// An owned handle on a thread that refreshes a [`TimestampCache`] once per
/// interval.
///
/// Stopping is synchronous: [`Ticker::stop`] (and `Drop`) signal the thread
/// and join it, so no refresh happens after they return.
#[derive(Debug)]
pub(crate) struct Ticker {
    interval: Duration,
    stop: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}
impl Ticker {
    /// Primes `cache` and starts refreshing it every `interval`.
    ///
    /// `running` is incremented for as long as the thread is alive.
    pub fn start(
        interval: Duration,
        cache: Arc<TimestampCache>,
        running: Arc<AtomicUsize>,
    ) -> io::Result<Self> {
        cache.refresh();

        let stop = Arc::new((Mutex::new(false), Condvar::new()));
        let thread_stop = Arc::clone(&stop);
        running.fetch_add(1, Ordering::SeqCst);
        let thread_running = Arc::clone(&running);
        let spawned = thread::Builder::new()
            .name("flog-ticker".to_owned())
            .spawn(move || {
                let _alive = RunningGuard(thread_running);
                run(interval, &cache, &thread_stop);
            });
        match spawned {
            Ok(handle) => Ok(Ticker {
                interval,
                stop,
                handle: Some(handle),
            }),
            Err(e) => {
                running.fetch_sub(1, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the thread and waits for it to exit.
    ///
    /// Fails if the thread panicked.
    pub fn stop(mut self) -> io::Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        if let Some(handle) = self.handle.take() {
            let (ref lock, ref cvar) = *self.stop;
            *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
            cvar.notify_all();
            if handle.join().is_err() {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "timestamp refresher thread panicked",
                ));
            }
        }
        Ok(())
    }
}
impl Drop for Ticker {
    fn drop(&mut self) {
        // Nobody is left to report a panic to.
        let _ = self.shutdown();
    }
}

fn run(interval: Duration, cache: &TimestampCache, stop: &(Mutex<bool>, Condvar)) {
    let (ref lock, ref cvar) = *stop;
    let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
    // `None` once the deadline is past what an `Instant` can hold.
    let mut next = Instant::now().checked_add(interval);
    while !*stopped {
        let now = Instant::now();
        match next {
            None => {
                stopped = cvar.wait(stopped).unwrap_or_else(PoisonError::into_inner);
            }
            Some(deadline) if now >= deadline => {
                cache.refresh();
                next = match deadline.checked_add(interval) {
                    Some(n) if n > now => Some(n),
                    // Fell behind (e.g. the process was suspended); skip ahead.
                    _ => now.checked_add(interval),
                };
            }
            Some(deadline) => {
                stopped = cvar
                    .wait_timeout(stopped, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner)
                    .0;
            }
        }
    }
}

struct RunningGuard(Arc<AtomicUsize>);
impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
