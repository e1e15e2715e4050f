//! Versioned JSON save/load.
//!
//! Versioning policy:
//! - `SAVE_VERSION`: the current format version. Incremented when fields
//!   are added.
//! - `MIN_COMPATIBLE_VERSION`: the oldest version that can still be
//!   loaded. Additive changes keep it where it is; only a breaking change
//!   to an existing field's meaning moves it.
//!
//! Snapshots at or above `MIN_COMPATIBLE_VERSION` load with missing
//! fields filled from defaults. Anything older, or unparseable, fails
//! closed: the caller keeps its fresh state.

use serde::{Deserialize, Serialize};

use crate::balance::{BossKind, Rank, StoneColor, StoneSize, MAX_ENHANCE_LEVEL, STONES_PER_BOSS};
use crate::state::{GameState, MissionStatus, Stone, StoneVariant};
use crate::{missions, stats, target};

/// Current save format version.
const SAVE_VERSION: u32 = 2;

/// Oldest loadable version.
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Persistence cadence the host should drive, in seconds.
pub const AUTOSAVE_INTERVAL_SECS: u32 = 10;

/// Serialized snapshot. Derived stats and the message log are not
/// persisted; they are recomputed and reseeded on load.
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GameSave {
    gold: f64,
    ruby: f64,

    /// Rank as an index into `Rank::all()`.
    rank: u8,
    level: u32,

    /// Upgrade levels, in `UpgradeKind::all()` order.
    upgrade_levels: Vec<u32>,
    /// Auto-damager counts, in `AutoDamagerKind::all()` order.
    auto_damager_counts: Vec<u32>,

    // Target: 0=normal, 1=boss; kind indexes the size or boss catalog.
    stone_is_boss: bool,
    stone_kind: u8,
    stone_color: u8,
    stone_max_hp: f64,
    stone_current_hp: f64,
    stones_until_boss: u32,

    total_clicks: u64,
    total_gold_earned: f64,
    stones_destroyed: u64,
    bosses_defeated: u64,
    enhance_attempts: u64,
    enhance_successes: u64,
    enhance_destroys: u64,

    protect_scrolls: u32,
    bless_scrolls: u32,
    lucky_scrolls: u32,
    gold_boost_secs: u32,
    auto_boost_secs: u32,

    prestige_count: u32,
    prestige_bonus: f64,

    /// Mission statuses (0=InProgress, 1=Ready, 2=Claimed), in template
    /// order.
    daily_statuses: Vec<u8>,
    /// Tiered slots as (tier, status), in template order.
    tiered_slots: Vec<(u32, u8)>,
    achievement_statuses: Vec<u8>,
    daily_date: String,

    last_online_ms: u64,
    rng_state: u64,
}

fn status_to_byte(status: MissionStatus) -> u8 {
    match status {
        MissionStatus::InProgress => 0,
        MissionStatus::Ready => 1,
        MissionStatus::Claimed => 2,
    }
}

fn status_from_byte(byte: u8) -> MissionStatus {
    match byte {
        1 => MissionStatus::Ready,
        2 => MissionStatus::Claimed,
        _ => MissionStatus::InProgress,
    }
}

fn extract_save(state: &GameState) -> SaveData {
    let (stone_is_boss, stone_kind, stone_color) = match state.stone.variant {
        StoneVariant::Normal { size, color } => (
            false,
            size as u8,
            match color {
                StoneColor::Black => 0,
                StoneColor::White => 1,
            },
        ),
        StoneVariant::Boss(kind) => (true, kind.index() as u8, 0),
    };

    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            gold: state.gold,
            ruby: state.ruby,
            rank: state.rank.index() as u8,
            level: state.level,
            upgrade_levels: state.upgrades.iter().map(|u| u.level).collect(),
            auto_damager_counts: state.auto_damagers.iter().map(|d| d.count).collect(),
            stone_is_boss,
            stone_kind,
            stone_color,
            stone_max_hp: state.stone.max_hp,
            stone_current_hp: state.stone.current_hp,
            stones_until_boss: state.stones_until_boss,
            total_clicks: state.total_clicks,
            total_gold_earned: state.total_gold_earned,
            stones_destroyed: state.stones_destroyed,
            bosses_defeated: state.bosses_defeated,
            enhance_attempts: state.enhance_attempts,
            enhance_successes: state.enhance_successes,
            enhance_destroys: state.enhance_destroys,
            protect_scrolls: state.protect_scrolls,
            bless_scrolls: state.bless_scrolls,
            lucky_scrolls: state.lucky_scrolls,
            gold_boost_secs: state.gold_boost_secs,
            auto_boost_secs: state.auto_boost_secs,
            prestige_count: state.prestige_count,
            prestige_bonus: state.prestige_bonus,
            daily_statuses: state
                .daily_missions
                .iter()
                .map(|m| status_to_byte(m.status))
                .collect(),
            tiered_slots: state
                .tiered_missions
                .iter()
                .map(|m| (m.tier as u32, status_to_byte(m.status)))
                .collect(),
            achievement_statuses: state
                .achievements
                .iter()
                .map(|a| status_to_byte(a.status))
                .collect(),
            daily_date: state.daily_date.clone(),
            last_online_ms: state.last_online_ms,
            rng_state: state.rng_state,
        },
    }
}

/// Rebuild the persisted target. A corrupt or dead target is replaced by
/// a fresh roll instead of being trusted.
fn restore_stone(state: &mut GameState, save: &GameSave) {
    let variant = if save.stone_is_boss {
        match BossKind::all().get(save.stone_kind as usize) {
            Some(kind) => StoneVariant::Boss(*kind),
            None => {
                state.stone = target::create_stone(state);
                return;
            }
        }
    } else {
        let size = match save.stone_kind {
            0 => StoneSize::Small,
            1 => StoneSize::Medium,
            2 => StoneSize::Large,
            _ => {
                state.stone = target::create_stone(state);
                return;
            }
        };
        let color = if save.stone_color == 0 {
            StoneColor::Black
        } else {
            StoneColor::White
        };
        StoneVariant::Normal { size, color }
    };

    if save.stone_max_hp <= 0.0
        || save.stone_current_hp <= 0.0
        || save.stone_current_hp > save.stone_max_hp
    {
        state.stone = target::create_stone(state);
        return;
    }

    state.stone = Stone {
        variant,
        max_hp: save.stone_max_hp,
        current_hp: save.stone_current_hp,
    };
}

/// Restore a snapshot into a fresh state. Derived stats are recomputed
/// from the catalogs, never read from the snapshot.
fn apply_save(state: &mut GameState, save: &GameSave) {
    state.gold = save.gold;
    state.ruby = save.ruby;
    state.rank = Rank::all()
        .get(save.rank as usize)
        .copied()
        .unwrap_or(Rank::Pawn);
    state.level = save.level.min(MAX_ENHANCE_LEVEL as u32);

    for (i, &level) in save.upgrade_levels.iter().enumerate() {
        if let Some(slot) = state.upgrades.get_mut(i) {
            slot.level = level;
        }
    }
    for (i, &count) in save.auto_damager_counts.iter().enumerate() {
        if let Some(slot) = state.auto_damagers.get_mut(i) {
            slot.count = count;
        }
    }

    state.total_clicks = save.total_clicks;
    state.total_gold_earned = save.total_gold_earned;
    state.stones_destroyed = save.stones_destroyed;
    state.bosses_defeated = save.bosses_defeated;
    state.enhance_attempts = save.enhance_attempts;
    state.enhance_successes = save.enhance_successes;
    state.enhance_destroys = save.enhance_destroys;

    state.protect_scrolls = save.protect_scrolls;
    state.bless_scrolls = save.bless_scrolls;
    state.lucky_scrolls = save.lucky_scrolls;
    state.gold_boost_secs = save.gold_boost_secs;
    state.auto_boost_secs = save.auto_boost_secs;

    state.prestige_count = save.prestige_count;
    state.prestige_bonus = save.prestige_bonus;

    for (i, &byte) in save.daily_statuses.iter().enumerate() {
        if let Some(m) = state.daily_missions.get_mut(i) {
            m.status = status_from_byte(byte);
        }
    }
    for (i, &(tier, byte)) in save.tiered_slots.iter().enumerate() {
        if let Some(m) = state.tiered_missions.get_mut(i) {
            m.tier = (tier as usize).min(m.template.tiers.len() - 1);
            m.status = status_from_byte(byte);
        }
    }
    for (i, &byte) in save.achievement_statuses.iter().enumerate() {
        if let Some(a) = state.achievements.get_mut(i) {
            a.status = status_from_byte(byte);
        }
    }
    state.daily_date = save.daily_date.clone();

    state.last_online_ms = save.last_online_ms;
    state.rng_state = save.rng_state;

    stats::recompute(state);
    restore_stone(state, save);
    if save.stones_until_boss >= 1 && save.stones_until_boss <= STONES_PER_BOSS {
        state.stones_until_boss = save.stones_until_boss;
    }
    missions::refresh(state);
}

/// Serialize the state for the host's storage layer.
pub fn to_json(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&extract_save(state))
}

/// Load a snapshot into `state`. On a parse failure or an incompatible
/// version the state is left untouched and `false` is returned.
pub fn load_from_json(state: &mut GameState, json: &str) -> bool {
    let save_data: SaveData = match serde_json::from_str(json) {
        Ok(d) => d,
        Err(_) => return false,
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        return false;
    }

    apply_save(state, &save_data.game);
    true
}
