//! Types of the governance update model, and the chain parameters and
//! identity data carried by updates.
mod basic;
pub mod capabilities;
pub mod chain_parameters;
pub mod identity;
pub mod keys;
pub mod updates;

pub use basic::*;
pub use capabilities::{supports, CapabilityFlag, ChainParameterVersion, ProtocolVersion};
pub use updates::{PayloadSchema, UpdateKind, UpdatePayload, UpdateValue, UpdateValueError};
