//! File access providers.

pub mod local;

#[cfg(any(test, feature = "unguarded-demo"))]
pub mod unguarded;
