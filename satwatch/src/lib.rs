#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod account;
pub mod balance_source;
pub mod balance_sync;
mod book;
pub mod currency;
pub mod primitives;
pub mod query;

pub use book::*;
pub use primitives::*;
