mod dispatch;
mod export;
mod fetch;

pub use dispatch::spawn_worker;
pub(crate) use dispatch::{send, send_error};
