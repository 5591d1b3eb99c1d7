//! Secret-store client implementations.

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "aws")]
pub mod aws;
