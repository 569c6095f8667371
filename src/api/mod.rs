//! API Module
//!
//! Everything that talks to the recipe provider: the transport seam, the
//! single-flight request dispatcher, and the caller-facing client built on
//! top of both.

pub mod client;
pub mod dispatcher;
pub mod transport;

pub use client::RecipeClient;
pub use dispatcher::Dispatcher;
pub use transport::{HttpTransport, ProviderResponse, RequestTarget, Transport};
