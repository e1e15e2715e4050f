//! Derived-stats recalculation.
//!
//! Stats are pure functions of upgrade levels, piece rank/level, prestige
//! bonus, and auto-damager counts. `recompute` refreshes the cached values
//! on `GameState`; every mutation that touches an input calls it.

use crate::balance::UpgradeKind;
use crate::state::GameState;

/// Combined multiplier from the piece and prestige:
/// `rank_multiplier * (1 + level * 0.1) * (1 + prestige_bonus)`.
pub fn power_multiplier(state: &GameState) -> f64 {
    state.rank.multiplier() * (1.0 + state.level as f64 * 0.1) * (1.0 + state.prestige_bonus)
}

/// Refresh all cached derived stats on the state.
pub fn recompute(state: &mut GameState) {
    let mult = power_multiplier(state);

    let gold_value = state.upgrade(UpgradeKind::GoldPerClick).value();
    let attack_value = state.upgrade(UpgradeKind::AttackPower).value();

    state.gold_per_click = (gold_value * mult).floor().max(1.0);
    state.attack_power = (attack_value * mult).floor().max(1.0);
    state.crit_chance = state.upgrade(UpgradeKind::CritChance).value().clamp(0.0, 100.0);
    state.crit_damage = state.upgrade(UpgradeKind::CritDamage).value();
    state.auto_rate = state.auto_damagers.iter().map(|d| d.attacks_per_sec()).sum();
}
