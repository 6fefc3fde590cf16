mod executor;
mod scheduler;

pub use executor::execute_task;
pub use scheduler::{TaskScheduler, NOTIFICATION_TITLE};
