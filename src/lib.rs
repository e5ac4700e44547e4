//! The versioned governance update model of the Concordium blockchain. The
//! library is structured around multiple modules.
//!
//! - [`types`] contains the [capability table](types::capabilities) that
//!   determines which governance features exist in which chain parameter
//!   version, and the [update values](types::updates) that are checked against
//!   it. The chain parameters and identity data carried by updates are in
//!   [`types::chain_parameters`], [`types::keys`] and [`types::identity`].
//! - [`versioned`] decodes the versioned envelopes that genesis data is
//!   distributed in.
//! - [`runtime_parameters`] parses and validates the node-local operating
//!   limits.
//!
//! Everything here is pure. Values are validated when they are constructed or
//! decoded and are immutable afterwards.

/// Various constants that apply to the node and the chain.
pub mod constants;
mod internal;
/// Parsing and validation of node-local runtime parameters.
pub mod runtime_parameters;
/// Type definitions of governance updates and their payloads.
pub mod types;
pub mod versioned;
