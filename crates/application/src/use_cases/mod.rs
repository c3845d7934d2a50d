pub mod guess;
pub mod query;

pub use guess::{GuessPipeline, RequestContext};
pub use query::{AttemptOutcome, QueryEngine, DEFAULT_ATTEMPTS};
