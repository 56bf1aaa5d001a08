use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::view::View;

pub mod sort;
pub mod steps;

pub const MIN_STEP_DELAY: Duration = Duration::from_millis(1000);
pub const MAX_STEP_DELAY: Duration = Duration::from_millis(1500);

pub fn clamp_delay(requested: Duration) -> Duration {
    requested.clamp(MIN_STEP_DELAY, MAX_STEP_DELAY)
}

/// The run was cancelled; nothing else may touch the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Everything one animation run needs: the shared view, the run's
/// cancellation token and its per-phase delay.
pub struct RunContext<V> {
    view: Arc<Mutex<V>>,
    token: CancellationToken,
    delay: Duration,
}

impl<V> Clone for RunContext<V> {
    fn clone(&self) -> Self {
        RunContext {
            view: self.view.clone(),
            token: self.token.clone(),
            delay: self.delay,
        }
    }
}

impl<V: View> RunContext<V> {
    pub fn new(view: Arc<Mutex<V>>, token: CancellationToken, delay: Duration) -> RunContext<V> {
        RunContext {
            view,
            token,
            delay: clamp_delay(delay),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn checkpoint(&self) -> Result<(), Aborted> {
        if self.token.is_cancelled() {
            Err(Aborted)
        } else {
            Ok(())
        }
    }

    /// Applies `f` to the view unless the run has been cancelled. The token is
    /// checked while holding the lock.
    pub async fn mutate<F, R>(&self, f: F) -> Result<R, Aborted>
    where
        F: FnOnce(&mut V) -> R,
    {
        let mut view = self.view.lock().await;
        self.checkpoint()?;
        Ok(f(&mut view))
    }

    /// Waits one phase delay. Returns early with `Aborted` when the token
    /// fires before or during the wait.
    pub async fn pause(&self) -> Result<(), Aborted> {
        self.checkpoint()?;
        tokio::select! {
            _ = self.token.cancelled() => return Err(Aborted),
            _ = tokio::time::sleep(self.delay) => {}
        }
        self.checkpoint()
    }
}

#[test]
fn test_clamp_delay() {
    assert_eq!(clamp_delay(Duration::from_millis(0)), MIN_STEP_DELAY);
    assert_eq!(clamp_delay(Duration::from_millis(900)), MIN_STEP_DELAY);
    assert_eq!(
        clamp_delay(Duration::from_millis(1200)),
        Duration::from_millis(1200)
    );
    assert_eq!(clamp_delay(Duration::from_secs(10)), MAX_STEP_DELAY);
}
