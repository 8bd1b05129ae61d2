//! Tiered Web Research Library
//!
//! Normalizes heterogeneous search providers behind one canonical result
//! shape and composes them into a strict-priority fallback ladder.
//!
//! # Design
//!
//! - Providers are tried in order; the first success wins and lower tiers
//!   are never called (cost control, not load balancing).
//! - Provider-specific schemas end at the adapter boundary: everything
//!   above it sees only [`types::SearchResult`].
//! - The orchestrator never errors. Total failure is a degraded
//!   [`types::SearchResponse`] the caller can act on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use research::{SearchOrchestrator, SearchOptions, SpacedProvider, TavilyProvider};
//!
//! let tavily = SpacedProvider::new(TavilyProvider::new(key)?);
//! let orchestrator = SearchOrchestrator::new(vec![Arc::new(tavily)]);
//! let response = orchestrator.search("ai tools news 2025", &SearchOptions::new()).await;
//! ```

pub mod credentials;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod spacing;
pub mod types;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderResult, ResearchError};
pub use orchestrator::SearchOrchestrator;
pub use provider::{MockProvider, ResearchProvider};
pub use providers::{BraveProvider, SerperProvider, TavilyProvider};
pub use spacing::SpacedProvider;
pub use types::{ProviderHit, ProviderTier, SearchOptions, SearchResponse, SearchResult};
