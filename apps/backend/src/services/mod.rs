pub mod game_flow;
pub mod matchmaking;
pub mod turn_timer;

pub use game_flow::GameFlowService;
pub use matchmaking::MatchmakingService;
pub use turn_timer::TurnTimers;
