//! Enhancement state machine.
//!
//! The piece is always `(rank, level)`. `try_enhance` is the only
//! transition: it draws the rolls from the state RNG and hands them to
//! `resolve_enhance`, which is deterministic and carries the whole rule
//! set. Cost and the attempt counter are spent before the roll and never
//! refunded.

use crate::balance::{
    Rank, DESTROY_SAFE_BELOW_LEVEL, ENHANCE_TABLE, MAX_ENHANCE_LEVEL, MIN_SUCCESS_RATE,
};
use crate::state::{BlessingTier, GameState};
use crate::{missions, stats};

/// Outcome of a single enhancement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// Level went up, or the rank was promoted.
    Success { promoted: bool },
    /// Roll failed, piece unchanged.
    Failed,
    /// Destroy triggered but a protect scroll absorbed it.
    Defended,
    /// Destroy triggered; level reset to 0 within the rank.
    Destroyed,
    /// Success at the strongest rank's terminal level; nothing to promote
    /// to. Cost and attempt are still spent.
    AlreadyMax,
    /// Not enough gold; nothing was consumed.
    InsufficientGold,
    /// The selected scroll is not in stock; nothing was consumed.
    MissingScroll,
}

#[derive(Clone, Copy, Debug)]
pub struct EnhanceResult {
    pub outcome: EnhanceOutcome,
    /// Gold actually deducted by this attempt.
    pub cost_paid: f64,
}

/// Gold cost of enhancing at `(rank, level)`.
pub fn enhance_cost(rank: Rank, level: u32) -> f64 {
    let entry = &ENHANCE_TABLE[(level as usize).min(MAX_ENHANCE_LEVEL)];
    (entry.cost * rank.enhance_cost_multiplier()).floor()
}

/// Effective success rate in percent, before the blessing bonus.
pub fn success_rate(rank: Rank, level: u32) -> f64 {
    let entry = &ENHANCE_TABLE[(level as usize).min(MAX_ENHANCE_LEVEL)];
    (entry.success_rate + rank.success_rate_bonus()).max(MIN_SUCCESS_RATE)
}

/// Effective destroy rate in percent. Low levels are safe, and so is the
/// strongest rank's terminal level (there is nothing left to promote to,
/// the level cannot be lost on the way out).
pub fn destroy_rate(rank: Rank, level: u32) -> f64 {
    let level = (level as usize).min(MAX_ENHANCE_LEVEL);
    if level < DESTROY_SAFE_BELOW_LEVEL {
        return 0.0;
    }
    if rank.next().is_none() && level == MAX_ENHANCE_LEVEL {
        return 0.0;
    }
    ENHANCE_TABLE[level].destroy_rate + rank.destroy_rate_bonus()
}

/// Run one attempt with explicit rolls (both uniform in [0,100)).
/// `roll` decides success; `destroy_roll` is only consulted on failure.
fn resolve_enhance(
    state: &mut GameState,
    use_protect: bool,
    blessing: BlessingTier,
    roll: f64,
    destroy_roll: f64,
) -> EnhanceResult {
    let cost = enhance_cost(state.rank, state.level);

    // Preconditions: nothing is consumed if any of these fail.
    if state.gold < cost {
        return EnhanceResult {
            outcome: EnhanceOutcome::InsufficientGold,
            cost_paid: 0.0,
        };
    }
    let missing_scroll = match blessing {
        BlessingTier::Bless => state.bless_scrolls == 0,
        BlessingTier::Lucky => state.lucky_scrolls == 0,
        BlessingTier::None => false,
    };
    if missing_scroll || (use_protect && state.protect_scrolls == 0) {
        return EnhanceResult {
            outcome: EnhanceOutcome::MissingScroll,
            cost_paid: 0.0,
        };
    }

    // Spent regardless of outcome.
    state.gold -= cost;
    state.enhance_attempts += 1;
    match blessing {
        BlessingTier::Bless => state.bless_scrolls -= 1,
        BlessingTier::Lucky => state.lucky_scrolls -= 1,
        BlessingTier::None => {}
    }

    let effective_success = success_rate(state.rank, state.level) + blessing.success_bonus();

    let outcome = if roll < effective_success {
        if state.level as usize >= MAX_ENHANCE_LEVEL {
            match state.rank.next() {
                Some(next) => {
                    state.rank = next;
                    state.level = 0;
                    state.enhance_successes += 1;
                    state.add_log(&format!("Promoted to {}!", next.name()), true);
                    EnhanceOutcome::Success { promoted: true }
                }
                None => EnhanceOutcome::AlreadyMax,
            }
        } else {
            state.level += 1;
            state.enhance_successes += 1;
            state.add_log(
                &format!(
                    "Enhancement success: now {} Lv.{}",
                    ENHANCE_TABLE[state.level as usize].title, state.level
                ),
                false,
            );
            EnhanceOutcome::Success { promoted: false }
        }
    } else if destroy_roll < destroy_rate(state.rank, state.level) {
        if use_protect {
            state.protect_scrolls -= 1;
            state.add_log("The protect scroll absorbed the break!", true);
            EnhanceOutcome::Defended
        } else {
            state.level = 0;
            state.enhance_destroys += 1;
            state.add_log("The piece shattered... back to Lv.0.", true);
            EnhanceOutcome::Destroyed
        }
    } else {
        state.add_log("Enhancement failed.", false);
        EnhanceOutcome::Failed
    };

    stats::recompute(state);
    missions::refresh(state);

    EnhanceResult {
        outcome,
        cost_paid: cost,
    }
}

/// Attempt an enhancement, drawing the rolls from the state RNG.
pub fn try_enhance(
    state: &mut GameState,
    use_protect: bool,
    blessing: BlessingTier,
) -> EnhanceResult {
    let roll = state.roll_percent();
    let destroy_roll = state.roll_percent();
    resolve_enhance(state, use_protect, blessing, roll, destroy_roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new()
    }

    #[test]
    fn level_zero_success_is_certain() {
        // Table entry {success: 100, cost: 100}; 100 gold exactly.
        let mut state = fresh();
        state.gold = 100.0;
        let result = try_enhance(&mut state, false, BlessingTier::None);
        assert_eq!(result.outcome, EnhanceOutcome::Success { promoted: false });
        assert!((result.cost_paid - 100.0).abs() < 0.001);
        assert_eq!(state.level, 1);
        assert!((state.gold - 0.0).abs() < 0.001);
        assert_eq!(state.enhance_attempts, 1);
        assert_eq!(state.enhance_successes, 1);
    }

    #[test]
    fn insufficient_gold_consumes_nothing() {
        let mut state = fresh();
        state.gold = 50.0;
        state.bless_scrolls = 1;
        let result = try_enhance(&mut state, false, BlessingTier::Bless);
        assert_eq!(result.outcome, EnhanceOutcome::InsufficientGold);
        assert!((result.cost_paid - 0.0).abs() < 0.001);
        assert!((state.gold - 50.0).abs() < 0.001);
        assert_eq!(state.enhance_attempts, 0);
        assert_eq!(state.bless_scrolls, 1);
        assert_eq!(state.level, 0);
    }

    #[test]
    fn missing_scroll_aborts_before_deduction() {
        let mut state = fresh();
        state.gold = 1_000.0;
        let result = try_enhance(&mut state, false, BlessingTier::Lucky);
        assert_eq!(result.outcome, EnhanceOutcome::MissingScroll);
        assert!((state.gold - 1_000.0).abs() < 0.001);
        assert_eq!(state.enhance_attempts, 0);

        let result = try_enhance(&mut state, true, BlessingTier::None);
        assert_eq!(result.outcome, EnhanceOutcome::MissingScroll);
        assert!((state.gold - 1_000.0).abs() < 0.001);
    }

    #[test]
    fn blessing_consumed_even_on_failure() {
        let mut state = fresh();
        state.rank = Rank::King; // heavy success penalty
        state.level = 16;
        state.gold = 1e12;
        state.bless_scrolls = 1;
        // success = max(10, 50-45) + 10 = 20; roll 99 fails, destroy is 0
        // at King 16? No: King is not strongest; destroy = 10.5+20 = 30.5.
        // destroy_roll 99 avoids it.
        let result = resolve_enhance(&mut state, false, BlessingTier::Bless, 99.0, 99.0);
        assert_eq!(result.outcome, EnhanceOutcome::Failed);
        assert_eq!(state.bless_scrolls, 0);
        assert_eq!(state.level, 16);
    }

    #[test]
    fn failure_without_destroy_keeps_level() {
        let mut state = fresh();
        state.level = 10;
        state.gold = 1e9;
        // success at Pawn 10 is 82; roll 90 fails; destroy 7, roll 50 safe
        let result = resolve_enhance(&mut state, false, BlessingTier::None, 90.0, 50.0);
        assert_eq!(result.outcome, EnhanceOutcome::Failed);
        assert_eq!(state.level, 10);
        assert_eq!(state.enhance_destroys, 0);
    }

    #[test]
    fn destroy_resets_level_within_rank() {
        let mut state = fresh();
        state.rank = Rank::Knight;
        state.level = 10;
        state.gold = 1e9;
        // Knight 10: success 82-12=70, destroy 7+2=9. roll 80 fails,
        // destroy_roll 5 triggers.
        let result = resolve_enhance(&mut state, false, BlessingTier::None, 80.0, 5.0);
        assert_eq!(result.outcome, EnhanceOutcome::Destroyed);
        assert_eq!(state.rank, Rank::Knight);
        assert_eq!(state.level, 0);
        assert_eq!(state.enhance_destroys, 1);
    }

    #[test]
    fn protect_consumed_only_on_trigger() {
        let mut state = fresh();
        state.level = 10;
        state.gold = 1e9;
        state.protect_scrolls = 2;

        // Destroy triggers: scroll consumed, level kept.
        let result = resolve_enhance(&mut state, true, BlessingTier::None, 90.0, 0.5);
        assert_eq!(result.outcome, EnhanceOutcome::Defended);
        assert_eq!(state.protect_scrolls, 1);
        assert_eq!(state.level, 10);

        // Plain failure: scroll untouched.
        let result = resolve_enhance(&mut state, true, BlessingTier::None, 90.0, 50.0);
        assert_eq!(result.outcome, EnhanceOutcome::Failed);
        assert_eq!(state.protect_scrolls, 1);
    }

    #[test]
    fn promotion_at_terminal_level() {
        let mut state = fresh();
        state.level = 16;
        state.gold = 1e12;
        let before_attack = state.attack_power;
        let result = resolve_enhance(&mut state, false, BlessingTier::None, 10.0, 99.0);
        assert_eq!(result.outcome, EnhanceOutcome::Success { promoted: true });
        assert_eq!(state.rank, Rank::Knight);
        assert_eq!(state.level, 0);
        // Stats recomputed under the new rank multiplier.
        assert!(state.attack_power > before_attack);
    }

    #[test]
    fn strongest_rank_terminal_level_reports_already_max() {
        let mut state = fresh();
        state.rank = Rank::Imperial;
        state.level = 16;
        state.gold = 1e12;
        let gold_before = state.gold;
        let cost = enhance_cost(Rank::Imperial, 16);
        let result = resolve_enhance(&mut state, false, BlessingTier::None, 10.0, 99.0);
        assert_eq!(result.outcome, EnhanceOutcome::AlreadyMax);
        assert_eq!(state.rank, Rank::Imperial);
        assert_eq!(state.level, 16);
        // Cost and attempt are still spent.
        assert!((state.gold - (gold_before - cost)).abs() < 0.001);
        assert_eq!(state.enhance_attempts, 1);
        assert_eq!(state.enhance_successes, 0);
    }

    #[test]
    fn cost_deducted_exactly_regardless_of_outcome() {
        for (roll, destroy_roll) in [(10.0, 99.0), (99.0, 99.0), (99.0, 0.5)] {
            let mut state = fresh();
            state.level = 10;
            state.gold = 1e9;
            let cost = enhance_cost(state.rank, state.level);
            let result = resolve_enhance(&mut state, false, BlessingTier::None, roll, destroy_roll);
            assert!((result.cost_paid - cost).abs() < 0.001);
            assert!((state.gold - (1e9 - cost)).abs() < 0.001);
        }
    }

    #[test]
    fn success_rate_floor_applies() {
        // King at level 16: 50 - 45 = 5 → floored to 10.
        assert!((success_rate(Rank::King, 16) - 10.0).abs() < 0.001);
        // Pawn level 0 unaffected.
        assert!((success_rate(Rank::Pawn, 0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn destroy_rate_safe_zones() {
        assert_eq!(destroy_rate(Rank::Queen, 3), 0.0);
        assert!(destroy_rate(Rank::Queen, 4) > 0.0);
        // Strongest rank's terminal level is safe.
        assert_eq!(destroy_rate(Rank::Imperial, 16), 0.0);
        assert!(destroy_rate(Rank::King, 16) > 0.0);
    }

    #[test]
    fn cost_multiplies_by_rank() {
        let pawn = enhance_cost(Rank::Pawn, 5);
        let knight = enhance_cost(Rank::Knight, 5);
        assert!((pawn - 12_000.0).abs() < 0.001);
        assert!((knight - 240_000.0).abs() < 0.001);
    }

    #[test]
    fn rolled_wrapper_is_deterministic_per_seed() {
        let mut a = fresh();
        let mut b = fresh();
        a.rng_state = 99;
        b.rng_state = 99;
        a.gold = 1e9;
        b.gold = 1e9;
        a.level = 12;
        b.level = 12;
        let ra = try_enhance(&mut a, false, BlessingTier::None);
        let rb = try_enhance(&mut b, false, BlessingTier::None);
        assert_eq!(ra.outcome, rb.outcome);
        assert_eq!(a.level, b.level);
    }
}
