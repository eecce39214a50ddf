//! Frame-driven task loop with explicit cancellation.
//!
//! The host calls [`FrameLoop::run_frame`] once per display frame. Each task
//! is a repeating callback owned by the loop and paired with a
//! [`CancelToken`]; cancelling the token removes the task before its next
//! run, which makes teardown deterministic instead of relying on a callback
//! chain to stop rearming itself.
//!
//! Everything here is single-threaded (`Rc`), matching the browser main
//! thread the loop runs on.

use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct Task {
    token: CancelToken,
    callback: Box<dyn FnMut(f64)>,
}

/// Owns repeating per-frame tasks and runs them in spawn order.
#[derive(Default)]
pub struct FrameLoop {
    tasks: Vec<Task>,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to run on every frame until the returned token is
    /// cancelled. The callback receives the frame timestamp in milliseconds.
    pub fn spawn(&mut self, callback: impl FnMut(f64) + 'static) -> CancelToken {
        let token = CancelToken::new();
        self.tasks.push(Task {
            token: token.clone(),
            callback: Box::new(callback),
        });
        token
    }

    /// Drops cancelled tasks, then runs the rest. Returns how many ran.
    pub fn run_frame(&mut self, timestamp_ms: f64) -> usize {
        self.tasks.retain(|task| !task.token.is_cancelled());
        self.frames += 1;
        let mut ran = 0;
        for task in &mut self.tasks {
            // A task may cancel a later one from inside its callback.
            if task.token.is_cancelled() {
                continue;
            }
            (task.callback)(timestamp_ms);
            ran += 1;
        }
        ran
    }

    /// Cancels and drops every task.
    pub fn cancel_all(&mut self) {
        for task in &self.tasks {
            task.token.cancel();
        }
        self.tasks.clear();
    }

    /// Number of live (not yet cancelled) tasks.
    pub fn live_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| !task.token.is_cancelled())
            .count()
    }

    /// True when no live task remains; the host can stop requesting frames.
    pub fn is_idle(&self) -> bool {
        self.live_tasks() == 0
    }

    /// Frames run since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn token_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn tasks_run_every_frame_in_spawn_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut frames = FrameLoop::new();
        for name in ["a", "b"] {
            let log = Rc::clone(&log);
            frames.spawn(move |ts| log.borrow_mut().push((name, ts)));
        }
        assert_eq!(frames.run_frame(16.0), 2);
        assert_eq!(frames.run_frame(32.0), 2);
        assert_eq!(
            *log.borrow(),
            vec![("a", 16.0), ("b", 16.0), ("a", 32.0), ("b", 32.0)]
        );
        assert_eq!(frames.frames(), 2);
    }

    #[test]
    fn cancelled_task_stops_running() {
        let count = Rc::new(Cell::new(0));
        let mut frames = FrameLoop::new();
        let token = {
            let count = Rc::clone(&count);
            frames.spawn(move |_| count.set(count.get() + 1))
        };
        frames.run_frame(0.0);
        token.cancel();
        assert!(frames.is_idle());
        assert_eq!(frames.run_frame(16.0), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn task_can_cancel_a_later_task_mid_frame() {
        let later_ran = Rc::new(Cell::new(false));
        let mut frames = FrameLoop::new();
        let later_token = Rc::new(RefCell::new(None::<CancelToken>));
        {
            let later_token = Rc::clone(&later_token);
            frames.spawn(move |_| {
                if let Some(token) = later_token.borrow().as_ref() {
                    token.cancel();
                }
            });
        }
        let token = {
            let later_ran = Rc::clone(&later_ran);
            frames.spawn(move |_| later_ran.set(true))
        };
        *later_token.borrow_mut() = Some(token);
        assert_eq!(frames.run_frame(0.0), 1);
        assert!(!later_ran.get());
    }

    #[test]
    fn cancel_all_empties_loop_and_flags_tokens() {
        let mut frames = FrameLoop::new();
        let a = frames.spawn(|_| {});
        let b = frames.spawn(|_| {});
        assert_eq!(frames.live_tasks(), 2);
        frames.cancel_all();
        assert!(frames.is_idle());
        assert!(a.is_cancelled() && b.is_cancelled());
    }

    #[test]
    fn dropping_loop_releases_captured_state() {
        let shared = Rc::new(());
        let mut frames = FrameLoop::new();
        {
            let shared = Rc::clone(&shared);
            frames.spawn(move |_| {
                assert!(Rc::strong_count(&shared) > 0);
            });
        }
        assert_eq!(Rc::strong_count(&shared), 2);
        drop(frames);
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
