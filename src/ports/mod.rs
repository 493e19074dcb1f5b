//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: called by the insight service into the generative backend

pub mod outbound;

pub use outbound::{GenerativePort, PromptContext};
