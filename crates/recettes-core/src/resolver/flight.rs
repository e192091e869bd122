//! In-flight fetch coalescing keyed by cache path.
//!
//! The first caller for a path owns the flight and does the work; callers
//! arriving while it runs block on the flight and get the owner's outcome.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};

use super::ImageOutcome;

struct Flight {
    result: Mutex<Option<ImageOutcome>>,
    cv: Condvar,
}

impl Flight {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            cv: Condvar::new(),
        }
    }

    fn set(&self, outcome: ImageOutcome) {
        let mut slot = self.result.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(outcome);
        self.cv.notify_all();
    }

    fn wait(&self) -> ImageOutcome {
        let mut guard = self.result.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(outcome) = guard.as_ref() {
                return outcome.clone();
            }
            guard = self.cv.wait(guard).unwrap_or_else(|e| e.into_inner());
        }
    }
}

type FlightMap = Mutex<HashMap<PathBuf, Arc<Flight>>>;

/// Registry of flights in progress.
#[derive(Default)]
pub(super) struct Flights {
    map: Arc<FlightMap>,
}

/// Result of joining a flight.
pub(super) enum Joined {
    /// Caller owns the fetch and must complete the guard.
    Owner(FlightGuard),
    /// Someone else fetched; this is their outcome.
    Waited(ImageOutcome),
}

impl Flights {
    pub(super) fn join(&self, path: &Path) -> Joined {
        let flight = {
            let mut map = self.map.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(existing) = map.get(path) {
                Some(Arc::clone(existing))
            } else {
                map.insert(path.to_path_buf(), Arc::new(Flight::new()));
                None
            }
        };
        match flight {
            Some(existing) => Joined::Waited(existing.wait()),
            None => Joined::Owner(FlightGuard {
                map: Arc::clone(&self.map),
                path: path.to_path_buf(),
                done: false,
            }),
        }
    }

    /// Number of paths currently being fetched.
    pub(super) fn len(&self) -> usize {
        self.map.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Held by the owner of a flight. Completing publishes the outcome to waiters
/// and removes the flight; dropping uncompleted (e.g. on panic) releases
/// waiters with an unavailable outcome.
pub(super) struct FlightGuard {
    map: Arc<FlightMap>,
    path: PathBuf,
    done: bool,
}

impl FlightGuard {
    pub(super) fn complete(mut self, outcome: ImageOutcome) {
        self.publish(outcome);
    }

    fn publish(&mut self, outcome: ImageOutcome) {
        self.done = true;
        let flight = self
            .map
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.path);
        if let Some(flight) = flight {
            flight.set(outcome);
        }
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if !self.done {
            self.publish(ImageOutcome::Unavailable { remote_url: None });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn second_caller_gets_owner_outcome() {
        let flights = Arc::new(Flights::default());
        let path = PathBuf::from("/cache/mafe.jpg");

        let guard = match flights.join(&path) {
            Joined::Owner(g) => g,
            Joined::Waited(_) => panic!("first caller must own the flight"),
        };
        assert_eq!(flights.len(), 1);

        let f2 = Arc::clone(&flights);
        let p2 = path.clone();
        let waiter = thread::spawn(move || match f2.join(&p2) {
            Joined::Waited(o) => o,
            Joined::Owner(_) => panic!("second caller must wait"),
        });

        thread::sleep(Duration::from_millis(200));
        guard.complete(ImageOutcome::Downloaded(path.clone()));
        assert_eq!(waiter.join().unwrap(), ImageOutcome::Downloaded(path));
        assert_eq!(flights.len(), 0);
    }

    #[test]
    fn dropped_guard_releases_waiters() {
        let flights = Arc::new(Flights::default());
        let path = PathBuf::from("/cache/egusi.jpg");
        let guard = match flights.join(&path) {
            Joined::Owner(g) => g,
            Joined::Waited(_) => unreachable!(),
        };
        let f2 = Arc::clone(&flights);
        let p2 = path.clone();
        let waiter = thread::spawn(move || match f2.join(&p2) {
            Joined::Waited(o) => o,
            Joined::Owner(g) => {
                g.complete(ImageOutcome::Cached(p2));
                panic!("should have waited")
            }
        });
        thread::sleep(Duration::from_millis(200));
        drop(guard);
        assert_eq!(
            waiter.join().unwrap(),
            ImageOutcome::Unavailable { remote_url: None }
        );
    }

    #[test]
    fn distinct_paths_do_not_wait() {
        let flights = Flights::default();
        let a = flights.join(Path::new("/cache/a.jpg"));
        let b = flights.join(Path::new("/cache/b.jpg"));
        assert!(matches!(a, Joined::Owner(_)));
        assert!(matches!(b, Joined::Owner(_)));
        assert_eq!(flights.len(), 2);
    }
}
