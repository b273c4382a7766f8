#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod capture;
mod clips;
mod session;
mod store;
