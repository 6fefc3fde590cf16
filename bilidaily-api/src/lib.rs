mod client;
mod endpoints;
mod error;
mod passport;
mod platform;
mod session;

pub use client::BiliClient;
pub use endpoints::Endpoints;
pub use error::{ApiError, ResponseExt, Result};
pub use passport::QrPoll;
pub use platform::{ClickReport, Heartbeat};
pub use session::Session;
