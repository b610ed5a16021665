//! A recording [`Sink`] for tests.
use crate::sink::{Entry, Sink};
use std::io;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Emitted {
    pub priority: u8,
    pub timestamp: String,
    pub tag: String,
    pub pid: u32,
    pub message: String,
    pub line: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Emit(Emitted),
    Close,
}

#[derive(Clone, Debug, Default)]
pub struct MockSink {
    events: Arc<(Mutex<Vec<Event>>, Condvar)>,
    fail: Arc<AtomicBool>,
}
impl MockSink {
    pub fn new() -> Self {
        MockSink::default()
    }

    /// Makes every subsequent `emit` fail with `BrokenPipe`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn take_events(&self) -> Vec<Event> {
        mem::take(&mut *self.lock())
    }

    pub fn emitted(&self) -> Vec<Emitted> {
        self.lock()
            .iter()
            .filter_map(|e| match *e {
                Event::Emit(ref emitted) => Some(emitted.clone()),
                Event::Close => None,
            })
            .collect()
    }

    /// Blocks until an event matching `matching` is recorded, or `timeout`
    /// elapses. Returns whether one was found.
    pub fn wait_for_event_matching(
        &self,
        matching: impl Fn(&Event) -> bool,
        timeout: Duration,
    ) -> bool {
        let (ref lock, ref cvar) = *self.events;
        let events = lock.lock().unwrap();
        let (events, _) = cvar
            .wait_timeout_while(events, timeout, |events| !events.iter().any(&matching))
            .unwrap();
        events.iter().any(&matching)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.0.lock().unwrap()
    }

    fn push(&self, event: Event) {
        self.lock().push(event);
        self.events.1.notify_all();
    }
}
impl Sink for MockSink {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock failure"));
        }
        self.push(Event::Emit(Emitted {
            priority: entry.priority.bits(),
            timestamp: entry.timestamp.to_owned(),
            tag: entry.tag.to_owned(),
            pid: entry.pid,
            message: entry.message.to_owned(),
            line: entry.to_string(),
        }));
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.push(Event::Close);
        Ok(())
    }
}
