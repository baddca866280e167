//! Numeric primitives for SCPN VES Core.

pub mod filter;
pub mod interp;
pub mod optim;
