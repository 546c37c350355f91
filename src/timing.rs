//! Debounce/throttle state kept apart from real timers so it can be driven by
//! any [`Clock`]. [`Debounced`] wires a [`Debounce`] to `gloo_timers`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::Utc;
use gloo_timers::callback::Timeout;

pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock; backed by `Date.now()` on wasm through chrono's `wasmbind`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        Utc::now().timestamp_millis() as f64
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    /// Nothing scheduled.
    Idle,
    /// Scheduled but not due yet.
    Pending { remaining_ms: f64 },
    /// Deadline passed; the trailing call should run now.
    Ready,
}

#[derive(Debug)]
pub struct Debounce<C: Clock> {
    clock: C,
    wait_ms: f64,
    leading: bool,
    deadline: Option<f64>,
}

impl<C: Clock> Debounce<C> {
    pub fn new(clock: C, wait_ms: f64) -> Self {
        Self {
            clock,
            wait_ms,
            leading: false,
            deadline: None,
        }
    }

    /// Fire on the first call of a burst instead of after it settles.
    pub fn leading(mut self) -> Self {
        self.leading = true;
        self
    }

    pub fn wait_ms(&self) -> f64 {
        self.wait_ms
    }

    /// Registers a call. Any pending deadline is pushed back by `wait_ms`.
    /// Returns true when the call should run immediately (leading edge).
    pub fn schedule(&mut self) -> bool {
        let fire_now = self.leading && self.deadline.is_none();
        self.deadline = Some(self.clock.now_ms() + self.wait_ms);
        fire_now
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn poll(&mut self) -> Poll {
        let Some(deadline) = self.deadline else {
            return Poll::Idle;
        };
        let now = self.clock.now_ms();
        if now < deadline {
            return Poll::Pending {
                remaining_ms: deadline - now,
            };
        }
        self.deadline = None;
        if self.leading {
            Poll::Idle
        } else {
            Poll::Ready
        }
    }
}

/// Admits at most one call per `limit_ms` window.
#[derive(Debug)]
pub struct Throttle<C: Clock> {
    clock: C,
    limit_ms: f64,
    open_at: Option<f64>,
}

impl<C: Clock> Throttle<C> {
    pub fn new(clock: C, limit_ms: f64) -> Self {
        Self {
            clock,
            limit_ms,
            open_at: None,
        }
    }

    pub fn try_acquire(&mut self) -> bool {
        let now = self.clock.now_ms();
        match self.open_at {
            Some(open_at) if now < open_at => false,
            _ => {
                self.open_at = Some(now + self.limit_ms);
                true
            }
        }
    }
}

/// Browser side of [`Debounce`]: every `trigger` supersedes the pending timer,
/// the action runs once the burst has been quiet for the wait period.
///
/// A pending timer keeps a clone of this value alive; owners call [`Debounced::cancel`]
/// when they are torn down.
#[derive(Clone)]
pub struct Debounced {
    state: Rc<RefCell<Debounce<SystemClock>>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    action: Rc<dyn Fn()>,
}

impl Debounced {
    pub fn new(wait_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(Debounce::new(SystemClock, wait_ms as f64))),
            timer: Rc::new(RefCell::new(None)),
            action: Rc::new(action),
        }
    }

    pub fn trigger(&self) {
        let (fire_now, wait) = {
            let mut state = self.state.borrow_mut();
            (state.schedule(), state.wait_ms())
        };
        if fire_now {
            (self.action)();
        }
        self.arm(wait);
    }

    pub fn cancel(&self) {
        self.state.borrow_mut().cancel();
        self.timer.borrow_mut().take();
    }

    fn arm(&self, delay_ms: f64) {
        let this = self.clone();
        let timeout = Timeout::new(delay_ms.ceil().max(0.0) as u32, move || this.settle());
        // replacing the old handle clears its timeout
        *self.timer.borrow_mut() = Some(timeout);
    }

    fn settle(&self) {
        let poll = self.state.borrow_mut().poll();
        match poll {
            Poll::Ready => {
                self.timer.borrow_mut().take();
                (self.action)();
            }
            // browsers may fire a timer slightly early
            Poll::Pending { remaining_ms } => self.arm(remaining_ms),
            Poll::Idle => {
                self.timer.borrow_mut().take();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_debounce_fires_once_after_quiet_period() {
        let clock = ManualClock::new(0.0);
        let mut debounce = Debounce::new(clock.clone(), 250.0);

        assert!(!debounce.schedule());
        clock.advance(100.0);
        assert!(!debounce.schedule());
        clock.advance(200.0);
        assert_eq!(debounce.poll(), Poll::Pending { remaining_ms: 50.0 });
        clock.advance(50.0);
        assert_eq!(debounce.poll(), Poll::Ready);
        assert_eq!(debounce.poll(), Poll::Idle);
    }

    #[test]
    fn cancel_drops_pending_call() {
        let clock = ManualClock::new(0.0);
        let mut debounce = Debounce::new(clock.clone(), 250.0);
        debounce.schedule();
        debounce.cancel();
        clock.advance(1000.0);
        assert_eq!(debounce.poll(), Poll::Idle);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn leading_debounce_fires_first_call_only() {
        let clock = ManualClock::new(0.0);
        let mut debounce = Debounce::new(clock.clone(), 100.0).leading();

        assert!(debounce.schedule());
        clock.advance(50.0);
        assert!(!debounce.schedule());
        clock.advance(100.0);
        assert_eq!(debounce.poll(), Poll::Idle);
        assert!(!debounce.is_pending());
        // a new burst fires again
        assert!(debounce.schedule());
    }

    #[test]
    fn throttle_admits_one_call_per_window() {
        let clock = ManualClock::new(0.0);
        let mut throttle = Throttle::new(clock.clone(), 1000.0);
        assert!(throttle.try_acquire());
        clock.advance(999.0);
        assert!(!throttle.try_acquire());
        clock.advance(1.0);
        assert!(throttle.try_acquire());
    }
}
