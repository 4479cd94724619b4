//! Game state, turn structure and the rules that run on it

pub mod config;
pub mod context;
pub mod controller;
pub mod dice;
pub mod events;
pub mod fixed_script_controller;
pub mod game_loop;
pub mod interactive_controller;
pub mod logger;
pub mod minigames;
pub mod npc_registry;
pub mod phase;
pub mod pipeline;
pub mod random_controller;
pub mod state;

pub use config::GameConfig;
pub use context::{RescueRule, TurnContext};
pub use controller::{GameStateView, PlayerController, TurnAction};
pub use dice::{DieSource, LoadedDice, RngDice, RollKind, RollOutcome};
pub use events::{DiscardReason, GameEvent, RecruitKind, Standing};
pub use fixed_script_controller::FixedScriptController;
pub use game_loop::{GameLoop, GameResult};
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use npc_registry::{NpcHolder, NpcRegistry};
pub use phase::{GameStage, Phase};
pub use random_controller::RandomController;
pub use state::GameState;
