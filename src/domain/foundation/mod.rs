//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the event contract and the error
//! vocabulary shared by the analysis engine and the decision methods.

mod errors;
mod events;
mod ids;
mod timestamp;

pub use crate::domain_event;
pub use errors::{AnalysisError, ErrorCode};
pub use events::DomainEvent;
pub use ids::{EventId, SessionId};
pub use timestamp::Timestamp;
