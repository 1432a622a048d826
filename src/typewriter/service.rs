//! Timer task that drives an [`Animator`].
//!
//! Exactly one deadline is pending at any instant: the task sleeps until it,
//! runs one transition, publishes the resulting [`Frame`] and arms the next
//! deadline. The task is owned by a [`MountedTypewriter`] guard; cancelling
//! or dropping the guard stops it, and no frame is published once the
//! cancellation has been observed.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::{Animator, Frame, Settings};

// ── Service ──────────────────────────────────────────────────────────────────

struct TypewriterService {
    animator: Animator,
    frames: watch::Sender<Frame>,
    shutdown: CancellationToken,
}

impl TypewriterService {
    fn new(animator: Animator, frames: watch::Sender<Frame>, shutdown: CancellationToken) -> Self {
        Self { animator, frames, shutdown }
    }

    async fn run(mut self) {
        let mut deadline = Instant::now() + self.animator.initial_delay();

        debug!(phrases = self.animator.settings().phrases().len(), "typewriter running");

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    debug!(
                        phrase_index = self.animator.phrase_index(),
                        "typewriter stopped"
                    );
                    break;
                }

                _ = tokio::time::sleep_until(deadline) => {
                    let delay = self.animator.step();
                    let frame = self.animator.frame();
                    trace!(text = %frame.text, mode = ?frame.mode, ?delay, "typewriter step");

                    // Checked under the channel's write lock so a cancel that
                    // returns before this point can never be followed by a frame.
                    let shutdown = &self.shutdown;
                    self.frames.send_if_modified(|current| {
                        if shutdown.is_cancelled() {
                            return false;
                        }
                        *current = frame;
                        true
                    });

                    deadline = Instant::now() + delay;
                }
            }
        }
    }
}

// ── Mount guard ──────────────────────────────────────────────────────────────

/// An animator bound to a running timer task.
///
/// Acquired with [`mount`]. Call [`MountedTypewriter::unmount`] to stop the
/// task and wait for it; dropping the guard cancels and aborts it instead.
pub struct MountedTypewriter {
    frames: watch::Receiver<Frame>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MountedTypewriter {
    /// A new subscriber to the frame stream. The current frame is marked seen.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        let mut rx = self.frames.clone();
        rx.mark_unchanged();
        rx
    }

    /// The most recently published frame.
    pub fn current(&self) -> Frame {
        self.frames.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the timer and wait for the task to exit.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!("typewriter task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for MountedTypewriter {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn the timer task for a fresh [`Animator`].
///
/// The task stops when the returned guard is unmounted or dropped, or when
/// `parent` is cancelled. Must be called from within a Tokio runtime.
pub fn mount(settings: Settings, parent: &CancellationToken) -> MountedTypewriter {
    let cancel = parent.child_token();
    let animator = Animator::new(settings);
    let (tx, rx) = watch::channel(animator.frame());
    let svc = TypewriterService::new(animator, tx, cancel.clone());
    let task = tokio::spawn(svc.run());
    MountedTypewriter { frames: rx, cancel, task: Some(task) }
}

/// Mount an animator for the duration of `f`.
///
/// The animator is unmounted when `f` completes. If the returned future is
/// dropped early the guard's `Drop` cancels the timer.
pub async fn with_mounted<F, Fut, T>(settings: Settings, parent: &CancellationToken, f: F) -> T
where
    F: FnOnce(watch::Receiver<Frame>) -> Fut,
    Fut: Future<Output = T>,
{
    let mounted = mount(settings, parent);
    let out = f(mounted.frames()).await;
    mounted.unmount().await;
    out
}
