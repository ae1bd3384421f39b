#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::todo,
    clippy::dbg_macro
)]
#![allow(
    clippy::uninlined_format_args,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)
)]

pub mod api;
pub mod args;
pub mod auth;
pub mod config;
pub mod environment;
pub mod errors;
pub mod logs;
pub mod utils;
pub mod validation;

pub use environment::{Auth0Settings, BuildTarget, Environment};
pub use errors::{EnvError, EnvResult};
pub use log;
