pub mod logger;
pub mod writer;

pub use logger::RequestLogger;
pub use writer::{Destination, append_line};
