pub mod db;
pub mod errors;
pub mod model;
pub mod sink;
pub mod sqlx_sink;
pub mod writer;

pub use errors::PersistenceError;
pub use model::{Alert, Direction};
pub use sink::{AlertSink, NoopSink};
pub use sqlx_sink::SqlxAlertSink;
pub use writer::{AlertWriter, WriterStats};
