use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref TIMER_MARKER: Regex = Regex::new(r"\[([0-9]+)m\]").expect("valid timer pattern");
}

/// Minutes from the first `[Nm]` marker in an instruction. Values past
/// `u32::MAX` saturate.
pub fn timer_minutes(instruction: &str) -> Option<u32> {
    let digits = TIMER_MARKER.captures(instruction)?.get(1)?.as_str();
    Some(digits.parse().unwrap_or_else(|_| {
        debug!("timer marker [{}m] out of range, clamping", digits);
        u32::MAX
    }))
}

/// The instruction with its timer markers removed.
pub fn strip_timer_markers(instruction: &str) -> String {
    let stripped = TIMER_MARKER.replace_all(instruction, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Not running, nothing changed.
    Idle,
    Running(u32),
    /// Reached zero on this tick.
    Finished,
}

/// Countdown for a single step, advanced one second per `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl StepTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            duration: seconds,
            remaining: seconds,
            running: false,
        }
    }

    pub fn for_instruction(instruction: &str) -> Self {
        let seconds = timer_minutes(instruction)
            .map(|m| m.saturating_mul(60))
            .unwrap_or(0);
        Self::new(seconds)
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_timer(&self) -> bool {
        self.duration > 0
    }

    pub fn is_finished(&self) -> bool {
        self.has_timer() && self.remaining == 0
    }

    /// Returns false when there is nothing left to count down.
    pub fn start(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Finished
        } else {
            TimerTick::Running(self.remaining)
        }
    }
}

/// `mm:ss`
pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_parsing() {
        assert_eq!(timer_minutes("Simmer for a while [10m]."), Some(10));
        assert_eq!(timer_minutes("Bake [25m] then rest [5m]"), Some(25));
        assert_eq!(timer_minutes("Stir well"), None);
        assert_eq!(timer_minutes("Rest [m]"), None);
        assert_eq!(timer_minutes("Cure [99999999999m]"), Some(u32::MAX));
        assert_eq!(strip_timer_markers("Bake  [25m] until golden"), "Bake until golden");
    }

    #[test]
    fn test_timer_counts_down_to_zero_in_n_times_sixty_ticks() {
        let mut timer = StepTimer::for_instruction("Boil pasta [3m]");
        assert_eq!(timer.remaining(), 180);
        assert!(timer.start());

        let mut ticks = 0;
        loop {
            ticks += 1;
            match timer.tick() {
                TimerTick::Running(_) => continue,
                TimerTick::Finished => break,
                TimerTick::Idle => panic!("timer stopped early"),
            }
        }

        assert_eq!(ticks, 180);
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_running());
        assert!(timer.is_finished());
        assert_eq!(timer.tick(), TimerTick::Idle);
    }

    #[test]
    fn test_step_without_marker_cannot_start() {
        let mut timer = StepTimer::for_instruction("Serve");
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.start());
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert!(!timer.is_finished());
    }

    #[test]
    fn test_oversized_marker_still_gives_a_timer() {
        let timer = StepTimer::for_instruction("Age the cheese [99999999999m]");
        assert_eq!(timer.duration(), u32::MAX);
    }

    #[test]
    fn test_pause_and_reset() {
        let mut timer = StepTimer::new(5);
        timer.start();
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining(), 4);
        timer.reset();
        assert_eq!(timer.remaining(), 5);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(600), "10:00");
        assert_eq!(format_remaining(65), "01:05");
    }
}
