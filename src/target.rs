//! Stone and boss generation, and the boss cadence counter.

use crate::balance::{
    BossKind, StoneColor, StoneSize, STONES_PER_BOSS, STONE_HP_PER_ATTACK, STONE_MIN_BASE_HP,
};
use crate::state::{GameState, Stone, StoneVariant};

/// Draw a stone size: 50% small, 35% medium, 15% large.
fn roll_size(state: &mut GameState) -> StoneSize {
    let roll = state.rng_range(100);
    if roll < 50 {
        StoneSize::Small
    } else if roll < 85 {
        StoneSize::Medium
    } else {
        StoneSize::Large
    }
}

fn roll_color(state: &mut GameState) -> StoneColor {
    if state.rng_range(2) == 0 {
        StoneColor::Black
    } else {
        StoneColor::White
    }
}

/// Generate a fresh ordinary stone scaled to current attack power.
pub fn create_stone(state: &mut GameState) -> Stone {
    let size = roll_size(state);
    let color = roll_color(state);
    let base_hp = (state.attack_power * STONE_HP_PER_ATTACK).max(STONE_MIN_BASE_HP);
    let max_hp = (base_hp * size.hp_multiplier()).floor();
    Stone {
        variant: StoneVariant::Normal { size, color },
        max_hp,
        current_hp: max_hp,
    }
}

/// The boss that spawns next, cycling through the catalog.
pub fn next_boss_kind(state: &GameState) -> BossKind {
    let idx = (state.bosses_defeated % BossKind::all().len() as u64) as usize;
    BossKind::all()[idx]
}

/// Spawn the next boss. Its HP is a fixed catalog value.
pub fn create_boss(state: &GameState) -> Stone {
    let kind = next_boss_kind(state);
    Stone {
        variant: StoneVariant::Boss(kind),
        max_hp: kind.hp(),
        current_hp: kind.hp(),
    }
}

/// Produce the replacement target after a kill, advancing the boss
/// cadence. Ordinary kills count down to the boss; the countdown resets
/// at spawn and holds until the boss dies.
pub fn next_target(state: &mut GameState) -> Stone {
    if state.stone.is_boss() {
        state.stones_until_boss = STONES_PER_BOSS;
        return create_stone(state);
    }
    state.stones_until_boss = state.stones_until_boss.saturating_sub(1);
    if state.stones_until_boss == 0 {
        state.stones_until_boss = STONES_PER_BOSS;
        create_boss(state)
    } else {
        create_stone(state)
    }
}
