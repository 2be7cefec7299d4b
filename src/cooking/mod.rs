pub mod driver;
pub mod stepper;
pub mod timer;

pub use driver::{CookingMode, StepView};
pub use stepper::{CookingError, CookingSession};
pub use timer::{format_remaining, StepTimer, TimerTick};
