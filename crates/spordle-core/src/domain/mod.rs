pub mod ids;
pub mod round;
pub mod rules;
pub mod stats;
pub mod track;

pub use ids::{PlayableRef, RoundId, SessionId, TrackId};
pub use round::{GuessEntry, GuessResult, RoundOutcome, RoundState, SnippetLadder, Verdict};
pub use rules::GameRules;
pub use stats::{SessionStats, StatsSnapshot};
pub use track::Track;
