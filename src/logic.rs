//! Core game transitions: pure functions over `GameState`, fully
//! testable. Covers manual clicks, the automatic damage tick with
//! overkill carry-over, purchases, boosters, offline rewards, prestige,
//! and the leaderboard score projection.

use crate::balance::{
    AutoDamagerKind, ShopItemKind, UpgradeKind, BOOSTER_DURATION_SECS,
    DESTROY_BONUS_RATE, DESTROY_BONUS_TIERS, MAX_AUTO_DAMAGER_COUNT, MAX_UPGRADE_LEVEL,
    OFFLINE_CAP_MS, OFFLINE_MIN_MS, OFFLINE_RATE, PRESTIGE_BONUS_INCREMENT, PRESTIGE_RUBY_RATE,
    STONES_PER_BOSS,
};
use crate::state::{GameState, StoneVariant};
use crate::{missions, stats, target};

/// Result of one manual click.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickResult {
    /// Gold from the hit itself (crit-scaled, boost-scaled).
    pub gold_earned: f64,
    pub is_crit: bool,
    /// Whether the target was destroyed by this hit.
    pub destroyed: bool,
    /// Destruction bonus or boss reward, when destroyed.
    pub bonus_gold: f64,
}

/// Result of one automatic damage window.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoTickResult {
    pub gold_earned: f64,
    pub destroyed_count: u32,
    pub bonus_gold: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct PrestigeResult {
    pub success: bool,
    pub ruby_reward: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineReward {
    pub gold: f64,
    /// Seconds actually credited (after the minimum gate and the cap).
    pub credited_secs: u64,
}

/// Gold income multiplier while the gold booster runs.
fn gold_multiplier(state: &GameState) -> f64 {
    if state.gold_boost_secs > 0 {
        2.0
    } else {
        1.0
    }
}

/// Automatic attack-rate multiplier while the auto booster runs.
fn auto_multiplier(state: &GameState) -> f64 {
    if state.auto_boost_secs > 0 {
        2.0
    } else {
        1.0
    }
}

fn earn_gold(state: &mut GameState, amount: f64) {
    state.gold += amount;
    state.total_gold_earned += amount;
}

/// Destroy the current target: pay its destruction bonus (or the boss
/// catalog reward), advance the kill counters, and atomically replace it
/// with the next target. Returns the bonus paid.
fn destroy_current(state: &mut GameState) -> f64 {
    let bonus = match state.stone.variant {
        StoneVariant::Normal { .. } => {
            let tier = DESTROY_BONUS_TIERS[state.rng_range(3) as usize];
            (state.stone.max_hp * state.gold_per_click * DESTROY_BONUS_RATE * tier).floor()
                * gold_multiplier(state)
        }
        StoneVariant::Boss(kind) => {
            state.add_log(&format!("Boss defeated: {}!", kind.name()), true);
            kind.reward() * gold_multiplier(state)
        }
    };

    match state.stone.variant {
        StoneVariant::Normal { .. } => state.stones_destroyed += 1,
        StoneVariant::Boss(_) => state.bosses_defeated += 1,
    }

    earn_gold(state, bonus);
    state.stone = target::next_target(state);
    bonus
}

/// One manual attack against the current target.
pub fn click(state: &mut GameState) -> ClickResult {
    state.total_clicks += 1;

    let is_crit = state.roll_percent() < state.crit_chance;
    let base = if is_crit {
        (state.gold_per_click * state.crit_damage / 100.0).floor()
    } else {
        state.gold_per_click
    };
    let gold_earned = base * gold_multiplier(state);
    earn_gold(state, gold_earned);

    state.stone.current_hp -= state.attack_power;

    let mut result = ClickResult {
        gold_earned,
        is_crit,
        ..Default::default()
    };
    if state.stone.current_hp <= 0.0 {
        result.destroyed = true;
        result.bonus_gold = destroy_current(state);
    }

    missions::refresh(state);
    result
}

/// Apply one automatic damage window of `elapsed_secs` seconds.
///
/// The whole window's damage lands as one lump sum; overkill carries into
/// freshly generated targets until it is absorbed, paying one destruction
/// bonus per kill in the chain. Booster countdowns advance here.
pub fn auto_tick(state: &mut GameState, elapsed_secs: u32) -> AutoTickResult {
    if elapsed_secs == 0 {
        return AutoTickResult::default();
    }

    let mut result = AutoTickResult::default();

    if state.auto_rate > 0.0 {
        let attacks = state.auto_rate * auto_multiplier(state) * elapsed_secs as f64;
        let gold_earned = (state.gold_per_click * attacks).floor() * gold_multiplier(state);
        earn_gold(state, gold_earned);
        result.gold_earned = gold_earned;

        let mut damage = state.attack_power * attacks;
        // Overkill carry-over: each new target absorbs what it can. Every
        // target has at least 10 HP, so the loop is bounded.
        while damage >= state.stone.current_hp {
            damage -= state.stone.current_hp;
            result.bonus_gold += destroy_current(state);
            result.destroyed_count += 1;
        }
        state.stone.current_hp -= damage;
    }

    state.gold_boost_secs = state.gold_boost_secs.saturating_sub(elapsed_secs);
    state.auto_boost_secs = state.auto_boost_secs.saturating_sub(elapsed_secs);

    missions::refresh(state);
    result
}

/// Buy one level of a stat upgrade. Returns true on success.
pub fn buy_upgrade(state: &mut GameState, kind: UpgradeKind) -> bool {
    let slot = state.upgrade(kind);
    if slot.level >= MAX_UPGRADE_LEVEL {
        return false;
    }
    let cost = slot.cost();
    if state.gold < cost {
        return false;
    }

    state.gold -= cost;
    state.upgrade_mut(kind).level += 1;
    stats::recompute(state);
    missions::refresh(state);
    state.add_log(
        &format!("{} upgraded to Lv.{}", kind.name(), state.upgrade(kind).level),
        false,
    );
    true
}

/// Whether an auto damager kind is unlocked by the current piece.
pub fn auto_damager_unlocked(state: &GameState, kind: AutoDamagerKind) -> bool {
    let (rank, level) = kind.unlock();
    if state.rank.index() != rank.index() {
        return state.rank.index() > rank.index();
    }
    state.level >= level
}

/// Buy one auto-damager unit. Rejected while the unlock is unmet, at the
/// per-kind cap, or on insufficient gold.
pub fn buy_auto_damager(state: &mut GameState, kind: AutoDamagerKind) -> bool {
    if !auto_damager_unlocked(state, kind) {
        return false;
    }
    let slot = state.auto_damager(kind);
    if slot.count >= MAX_AUTO_DAMAGER_COUNT {
        return false;
    }
    let cost = slot.cost();
    if state.gold < cost {
        return false;
    }

    state.gold -= cost;
    state.auto_damager_mut(kind).count += 1;
    stats::recompute(state);
    missions::refresh(state);
    state.add_log(
        &format!("Bought {} (x{})", kind.name(), state.auto_damager(kind).count),
        false,
    );
    true
}

/// Buy a shop item. Scrolls are stocked; boosters start (or restart)
/// their countdown immediately.
pub fn buy_shop_item(state: &mut GameState, kind: ShopItemKind) -> bool {
    let gold_cost = kind.gold_cost();
    let ruby_cost = kind.ruby_cost();
    if state.gold < gold_cost || state.ruby < ruby_cost {
        return false;
    }

    state.gold -= gold_cost;
    state.ruby -= ruby_cost;
    match kind {
        ShopItemKind::ProtectScroll => state.protect_scrolls += 1,
        ShopItemKind::BlessScroll => state.bless_scrolls += 1,
        ShopItemKind::LuckyScroll => state.lucky_scrolls += 1,
        ShopItemKind::GoldBooster => state.gold_boost_secs = BOOSTER_DURATION_SECS,
        ShopItemKind::AutoBooster => state.auto_boost_secs = BOOSTER_DURATION_SECS,
    }
    state.add_log(&format!("Bought {}", kind.name()), false);
    true
}

/// Credit gold for time spent away, gated and capped. Idempotent: the
/// watermark moves on every call, so an immediate second call credits
/// nothing.
pub fn collect_offline_reward(state: &mut GameState, now_ms: u64) -> OfflineReward {
    let elapsed = now_ms.saturating_sub(state.last_online_ms);
    let first_session = state.last_online_ms == 0;
    state.last_online_ms = now_ms;

    if first_session || elapsed < OFFLINE_MIN_MS {
        return OfflineReward::default();
    }

    let credited_secs = elapsed.min(OFFLINE_CAP_MS) / 1000;
    let gold =
        (state.gold_per_click * state.auto_rate * OFFLINE_RATE * credited_secs as f64).floor();
    earn_gold(state, gold);
    missions::refresh(state);
    if gold > 0.0 {
        state.add_log(
            &format!("Welcome back! Earned {} gold while away.", format_number(gold)),
            true,
        );
    }
    OfflineReward {
        gold,
        credited_secs,
    }
}

/// Reset the run for a permanent bonus and a ruby payout.
///
/// Rubies, prestige counters, shop consumables, missions, and
/// achievements survive; everything else returns to the initial
/// templates.
pub fn do_prestige(state: &mut GameState) -> PrestigeResult {
    if state.rank.index() < 1 {
        return PrestigeResult {
            success: false,
            ruby_reward: 0.0,
        };
    }

    let ruby_reward =
        (state.rank.index() as f64 + 1.0) * (state.level as f64 + 1.0) * PRESTIGE_RUBY_RATE;
    state.ruby += ruby_reward;
    state.prestige_count += 1;
    state.prestige_bonus += PRESTIGE_BONUS_INCREMENT;

    state.gold = 0.0;
    state.rank = crate::balance::Rank::Pawn;
    state.level = 0;
    for slot in &mut state.upgrades {
        slot.level = slot.kind.starting_level();
    }
    for slot in &mut state.auto_damagers {
        slot.count = 0;
    }
    state.total_clicks = 0;
    state.enhance_attempts = 0;
    state.enhance_successes = 0;
    state.enhance_destroys = 0;
    state.stones_until_boss = STONES_PER_BOSS;

    stats::recompute(state);
    state.stone = target::create_stone(state);
    missions::refresh(state);
    state.add_log(
        &format!(
            "Prestige #{}: earned {} rubies!",
            state.prestige_count,
            format_number(ruby_reward)
        ),
        true,
    );

    PrestigeResult {
        success: true,
        ruby_reward,
    }
}

/// Monotonic score projection for the leaderboard boundary.
pub fn leaderboard_score(state: &GameState) -> u64 {
    let base = state.gold_per_click + state.attack_power + state.stones_destroyed as f64;
    let mult = state.rank.multiplier() + state.prestige_count as f64 * 20.0;
    (base * mult).floor() as u64
}

/// Human-readable number formatting for logs and UI (1.5K, 2.3M, ...).
pub fn format_number(n: f64) -> String {
    if n < 1_000.0 {
        format!("{:.0}", n)
    } else if n < 1_000_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else if n < 1_000_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n < 1_000_000_000_000.0 {
        format!("{:.1}B", n / 1_000_000_000.0)
    } else {
        format!("{:.1}T", n / 1_000_000_000_000.0)
    }
}
