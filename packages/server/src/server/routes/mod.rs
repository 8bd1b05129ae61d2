pub mod generate;
pub mod health;
pub mod progress;

pub use generate::{generate_handler, GenerateBody};
pub use health::health_handler;
pub use progress::{progress_handler, ProgressQuery};
