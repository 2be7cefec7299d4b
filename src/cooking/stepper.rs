use thiserror::Error;

use super::timer::{strip_timer_markers, StepTimer, TimerTick};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CookingError {
    #[error("This recipe has no instructions to follow")]
    NoInstructions,
}

/// Walks through a recipe's instructions one step at a time. Moving past
/// either end is a no-op.
#[derive(Debug, Clone)]
pub struct CookingSession {
    title: String,
    instructions: Vec<String>,
    index: usize,
    timer: StepTimer,
}

impl CookingSession {
    pub fn new(title: impl Into<String>, instructions: Vec<String>) -> Result<Self, CookingError> {
        let first = instructions.first().ok_or(CookingError::NoInstructions)?;
        let timer = StepTimer::for_instruction(first);
        Ok(Self {
            title: title.into(),
            instructions,
            index: 0,
            timer,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based.
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    pub fn total_steps(&self) -> usize {
        self.instructions.len()
    }

    pub fn current_step(&self) -> &str {
        &self.instructions[self.index]
    }

    pub fn instruction_text(&self) -> String {
        strip_timer_markers(self.current_step())
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.instructions.len()
    }

    /// Fraction of steps reached, in `(0, 1]`.
    pub fn progress(&self) -> f32 {
        self.step_number() as f32 / self.total_steps() as f32
    }

    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.enter(self.index + 1);
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.enter(self.index - 1);
        true
    }

    /// Clamped to the last step.
    pub fn go_to(&mut self, index: usize) {
        let target = index.min(self.instructions.len() - 1);
        if target != self.index {
            self.enter(target);
        }
    }

    pub fn timer(&self) -> &StepTimer {
        &self.timer
    }

    pub fn start_timer(&mut self) -> bool {
        self.timer.start()
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self) -> TimerTick {
        self.timer.tick()
    }

    fn enter(&mut self, index: usize) {
        self.index = index;
        self.timer = StepTimer::for_instruction(&self.instructions[index]);
    }
}
