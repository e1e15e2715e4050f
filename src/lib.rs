//! Progression and economy core for an idle stone-breaking clicker.
//!
//! The crate is a pure logic layer: a single mutable [`GameState`] plus
//! free transition functions. The host drives time ([`time::GameTime`]),
//! renders from state, and persists the snapshot ([`save`]) opaquely.

pub mod balance;
pub mod enhance;
pub mod logic;
pub mod missions;
pub mod save;
pub mod state;
pub mod stats;
pub mod target;
pub mod time;

mod simulator;

pub use enhance::{try_enhance, EnhanceOutcome, EnhanceResult};
pub use logic::{
    auto_tick, click, collect_offline_reward, do_prestige, leaderboard_score, AutoTickResult,
    ClickResult, OfflineReward, PrestigeResult,
};
pub use state::{BlessingTier, GameState};
