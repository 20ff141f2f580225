mod multiple_choice;
mod progress;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use multiple_choice::MultipleChoiceSession;
pub use progress::SessionProgress;
pub use workflow::SessionLauncher;
