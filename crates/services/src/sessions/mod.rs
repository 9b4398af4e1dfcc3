mod controller;
mod progress;

// Public API of the session subsystem.
pub use controller::{SessionController, SessionState};
pub use progress::{AnswerFeedback, SessionProgress};
