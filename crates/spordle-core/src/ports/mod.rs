pub mod playback;
pub mod round_history;
pub mod track_source;

pub use playback::{PlaybackError, SnippetPlayer};
pub use round_history::{RepoError, RoundHistory, RoundRecord};
pub use track_source::{TrackSource, TrackSourceError};
