//! Concrete provider adapters, one per external research service.

pub mod brave;
pub mod serper;
pub mod tavily;

pub use brave::BraveProvider;
pub use serper::SerperProvider;
pub use tavily::TavilyProvider;
