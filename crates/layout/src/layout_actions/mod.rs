pub mod actions;
pub mod events;
pub mod executor;
pub mod queue;
pub mod result_log;
pub mod results;

pub use actions::*;
pub use events::*;
pub use executor::execute_queued_actions;
pub use queue::*;
pub use result_log::ActionResultLog;
pub use results::*;
