use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::constants::TIMER_INTERVAL;

/// # Timer
///
/// An 8-bit countdown counter shared between the instruction engine and the
/// ticker thread. Every read and write goes through the mutex; the two
/// actors never touch the value directly.
#[derive(Clone, Default)]
pub struct Timer {
    value: Arc<Mutex<u8>>,
}

impl Timer {
    pub fn get(&self) -> u8 {
        *self.value.lock().unwrap()
    }

    pub fn set(&self, value: u8) {
        *self.value.lock().unwrap() = value;
    }

    /// Counts down by one, saturating at zero.
    pub fn decrement(&self) {
        let mut value = self.value.lock().unwrap();
        *value = value.saturating_sub(1);
    }
}

/// # Ticker
///
/// Decrements both timers at approximately 60Hz, independent of instruction
/// throughput, until the shared shutdown flag is raised. It touches nothing
/// but the two timers.
///
/// The thread is joined when the ticker stops or is dropped, so it never
/// outlives the machine that spawned it.
pub struct Ticker {
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(delay: Timer, sound: Timer, shutdown: Arc<AtomicBool>) -> Self {
        let flag = Arc::clone(&shutdown);
        let thread = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(TIMER_INTERVAL);
                delay.decrement();
                sound.decrement();
            }
        });

        Ticker {
            shutdown,
            thread: Some(thread),
        }
    }

    /// Raises the shutdown flag and waits for the thread to exit.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod test_timer {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_set_get() {
        let timer = Timer::default();
        timer.set(0xF);
        assert_eq!(timer.get(), 0xF);
    }

    #[test]
    fn test_decrement_saturates_at_zero() {
        let timer = Timer::default();
        timer.set(1);
        timer.decrement();
        assert_eq!(timer.get(), 0);
        timer.decrement();
        assert_eq!(timer.get(), 0);
    }

    #[test]
    fn test_ticker_decays_timers_to_zero() {
        let delay = Timer::default();
        let sound = Timer::default();
        delay.set(10);
        sound.set(3);

        let mut ticker = Ticker::spawn(
            delay.clone(),
            sound.clone(),
            Arc::new(AtomicBool::new(false)),
        );
        // 10 ticks at 16ms is ~160ms; leave some slack for scheduling
        thread::sleep(Duration::from_millis(250));
        ticker.stop();

        assert_eq!(delay.get(), 0);
        assert_eq!(sound.get(), 0);
    }

    #[test]
    fn test_ticker_stops_when_flag_is_raised() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut ticker = Ticker::spawn(Timer::default(), Timer::default(), Arc::clone(&shutdown));
        shutdown.store(true, Ordering::Relaxed);
        // join returns promptly once the flag is visible; stop is idempotent
        ticker.stop();
        ticker.stop();
        assert!(ticker.thread.is_none());
    }
}
