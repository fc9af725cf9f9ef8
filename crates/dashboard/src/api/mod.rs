//! Client API adapter for the remote user store.

mod client;
mod error;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockUserApi;
pub use client::{HttpUserApi, UserApi};
pub use error::{ClientError, ClientResult};
