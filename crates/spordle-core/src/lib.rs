pub mod domain;
pub mod errors;
pub mod matching;
pub mod ports;
pub mod services;

pub use errors::{CoreError, RoundError, TrackError};
