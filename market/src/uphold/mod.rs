pub mod client;
pub mod types;

pub use client::UpholdClient;
pub use types::TickerPayload;
