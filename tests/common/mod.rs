//! Test utilities for router tests
//!
//! Provides recording handlers that log every call into a shared journal, plus
//! handlers that complete late or never.

#![allow(dead_code)]

use route_reconciler::*;
use std::sync::{Arc, Mutex, Once};
use std::thread;
use std::time::Duration;

/// Generous bound for `wait_idle` in tests.
pub const IDLE: Duration = Duration::from_secs(10);

static INIT: Once = Once::new();

/// Route test logs through env_logger (`RUST_LOG=route_reconciler=trace`).
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Shared, ordered record of handler calls.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// How a [`RecordingHandler`] signals completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Complete inside the call.
    Immediately,
    /// Complete from another thread after a delay.
    After(Duration),
    /// Hold on to the token and never complete.
    Never,
}

/// Handler that records `"<level>:<op> <ids> animated=<bool>"` for every call.
///
/// Children inherit the journal and finishing behaviour and are named after
/// the segment they present.
pub struct RecordingHandler {
    level: String,
    journal: Journal,
    finish: Finish,
    held: Arc<Mutex<Vec<Completion>>>,
}

impl RecordingHandler {
    pub fn root(journal: &Journal) -> Self {
        Self::with_finish(journal, Finish::Immediately)
    }

    pub fn with_finish(journal: &Journal, finish: Finish) -> Self {
        Self {
            level: "root".to_string(),
            journal: journal.clone(),
            finish,
            held: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn child(&self, segment: &RouteSegment) -> BoxedHandler {
        Box::new(Self {
            level: segment.id.clone(),
            journal: self.journal.clone(),
            finish: self.finish,
            held: self.held.clone(),
        })
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(format!("{}:{}", self.level, entry));
    }

    fn finish(&self, completion: Completion) {
        match self.finish {
            Finish::Immediately => completion.complete(),
            Finish::After(delay) => {
                thread::spawn(move || {
                    thread::sleep(delay);
                    completion.complete();
                });
            }
            Finish::Never => self.held.lock().unwrap().push(completion),
        }
    }
}

impl NavigationHandler for RecordingHandler {
    fn push(
        &mut self,
        segment: &RouteSegment,
        animated: bool,
        completion: Completion,
    ) -> BoxedHandler {
        self.record(format!("push {} animated={}", segment.id, animated));
        self.finish(completion);
        self.child(segment)
    }

    fn pop(&mut self, segment: &RouteSegment, animated: bool, completion: Completion) {
        self.record(format!("pop {} animated={}", segment.id, animated));
        self.finish(completion);
    }

    fn replace(
        &mut self,
        from: &RouteSegment,
        to: &RouteSegment,
        animated: bool,
        completion: Completion,
    ) -> BoxedHandler {
        self.record(format!("replace {}->{} animated={}", from.id, to.id, animated));
        self.finish(completion);
        self.child(to)
    }

    fn name(&self) -> &'static str {
        "RecordingHandler"
    }
}

/// Records when each call starts and ends; completes after `delay`.
///
/// Used to observe that operations never overlap.
pub struct SlowHandler {
    pub delay: Duration,
    pub events: Journal,
}

impl SlowHandler {
    fn run(&self, label: String, completion: Completion) {
        self.events.lock().unwrap().push(format!("start {}", label));
        let events = self.events.clone();
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            events.lock().unwrap().push(format!("end {}", label));
            completion.complete();
        });
    }

    fn child(&self) -> BoxedHandler {
        Box::new(SlowHandler {
            delay: self.delay,
            events: self.events.clone(),
        })
    }
}

impl NavigationHandler for SlowHandler {
    fn push(
        &mut self,
        segment: &RouteSegment,
        _animated: bool,
        completion: Completion,
    ) -> BoxedHandler {
        self.run(format!("push {}", segment.id), completion);
        self.child()
    }

    fn pop(&mut self, segment: &RouteSegment, _animated: bool, completion: Completion) {
        self.run(format!("pop {}", segment.id), completion);
    }

    fn replace(
        &mut self,
        from: &RouteSegment,
        to: &RouteSegment,
        _animated: bool,
        completion: Completion,
    ) -> BoxedHandler {
        self.run(format!("replace {}->{}", from.id, to.id), completion);
        self.child()
    }

    fn name(&self) -> &'static str {
        "SlowHandler"
    }
}

/// Build a route from segment ids.
pub fn route(ids: &[&str]) -> Route {
    Route::from_ids(ids.iter().copied())
}
