#![warn(clippy::unwrap_used, clippy::expect_used)]

pub mod contract;
pub mod error;
pub mod helpers;
pub mod msg;
pub mod state;
