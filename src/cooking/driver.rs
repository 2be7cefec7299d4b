use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

use crate::notify::{Notification, Notifier};

use super::stepper::CookingSession;
use super::timer::TimerTick;

/// Point-in-time view of a running session.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub title: String,
    pub step_number: usize,
    pub total_steps: usize,
    pub progress: f32,
    pub instruction: String,
    pub timer_seconds: u32,
    pub remaining: u32,
    pub running: bool,
}

/// A `CookingSession` whose timer runs in the background, one tick per
/// second. The ticker is aborted whenever the step changes, the timer is
/// paused or reset, or the mode is dropped.
pub struct CookingMode {
    session: Arc<Mutex<CookingSession>>,
    notifier: Arc<dyn Notifier>,
    ticker: Option<JoinHandle<()>>,
}

impl CookingMode {
    pub fn new(session: CookingSession, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            notifier,
            ticker: None,
        }
    }

    pub fn view(&self) -> StepView {
        let session = self.lock();
        StepView {
            title: session.title().to_string(),
            step_number: session.step_number(),
            total_steps: session.total_steps(),
            progress: session.progress(),
            instruction: session.instruction_text(),
            timer_seconds: session.timer().duration(),
            remaining: session.timer().remaining(),
            running: session.timer().is_running(),
        }
    }

    pub fn next(&mut self) -> bool {
        self.stop_ticker();
        self.lock().next()
    }

    pub fn previous(&mut self) -> bool {
        self.stop_ticker();
        self.lock().previous()
    }

    pub fn go_to(&mut self, index: usize) {
        self.stop_ticker();
        self.lock().go_to(index);
    }

    /// Starts (or resumes) the countdown. Must be called within a tokio runtime.
    pub fn start_timer(&mut self) -> bool {
        if !self.lock().start_timer() {
            return false;
        }
        if self.ticker.as_ref().map_or(true, |t| t.is_finished()) {
            self.ticker = Some(self.spawn_ticker());
        }
        true
    }

    pub fn pause_timer(&mut self) {
        self.stop_ticker();
        self.lock().pause_timer();
    }

    pub fn reset_timer(&mut self) {
        self.stop_ticker();
        self.lock().reset_timer();
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let notifier = Arc::clone(&self.notifier);

        let period = Duration::from_secs(1);
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

        tokio::spawn(async move {
            loop {
                interval.tick().await;
                let (tick, step, text) = {
                    let mut guard = match session.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    let tick = guard.tick();
                    (tick, guard.step_number(), guard.instruction_text())
                };
                match tick {
                    TimerTick::Running(_) => continue,
                    TimerTick::Finished => {
                        notifier.notify(Notification::info(
                            format!("Step {} timer finished", step),
                            text,
                        ));
                        break;
                    }
                    TimerTick::Idle => break,
                }
            }
        })
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("stopping step timer");
            ticker.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, CookingSession> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for CookingMode {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
