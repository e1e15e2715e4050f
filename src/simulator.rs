//! Balance simulator: plays the game headlessly with a greedy strategy.
//! Run with: cargo test simulate_optimal -- --nocapture

#[cfg(test)]
mod tests {
    use crate::balance::{AutoDamagerKind, UpgradeKind, ENHANCE_TABLE};
    use crate::state::{BlessingTier, GameState};
    use crate::{enhance, logic};

    /// What to purchase next.
    enum Purchase {
        Upgrade(UpgradeKind),
        Damager(AutoDamagerKind),
    }

    /// Gold income per simulated second under the current stats.
    fn income_per_sec(state: &GameState, clicks_per_sec: f64) -> f64 {
        state.gold_per_click * (clicks_per_sec + state.auto_rate)
    }

    /// Find the purchase with the best ROI (lowest payback time).
    fn find_best_purchase(state: &GameState, clicks_per_sec: f64) -> Option<Purchase> {
        let mut best: Option<(f64, Purchase)> = None;
        let actions_per_sec = clicks_per_sec + state.auto_rate;

        // Gold upgrade: income gain is direct.
        let gold_slot = state.upgrade(UpgradeKind::GoldPerClick);
        if state.gold >= gold_slot.cost() {
            let gain = crate::stats::power_multiplier(state) * actions_per_sec;
            if gain > 0.0 {
                best = Some((
                    gold_slot.cost() / gain,
                    Purchase::Upgrade(UpgradeKind::GoldPerClick),
                ));
            }
        }

        // Damagers add attack actions, each worth gold_per_click.
        for slot in &state.auto_damagers {
            if state.gold < slot.cost() || !logic::auto_damager_unlocked(state, slot.kind) {
                continue;
            }
            let gain = slot.kind.attacks_per_sec() * state.gold_per_click;
            if gain <= 0.0 {
                continue;
            }
            let payback = slot.cost() / gain;
            let dominated = best.as_ref().map_or(false, |(bp, _)| *bp <= payback);
            if !dominated {
                best = Some((payback, Purchase::Damager(slot.kind)));
            }
        }

        // Attack and crit upgrades speed up kills and bonus income;
        // rough-estimate them at a fraction of current income.
        for kind in [
            UpgradeKind::AttackPower,
            UpgradeKind::CritChance,
            UpgradeKind::CritDamage,
        ] {
            let slot = state.upgrade(kind);
            if state.gold < slot.cost() {
                continue;
            }
            let income = income_per_sec(state, clicks_per_sec);
            if income <= 0.0 {
                continue;
            }
            let payback = slot.cost() / (income * 0.05);
            let dominated = best.as_ref().map_or(false, |(bp, _)| *bp <= payback);
            if !dominated {
                best = Some((payback, Purchase::Upgrade(kind)));
            }
        }

        best.map(|(_, p)| p)
    }

    fn report_stats(state: &GameState, seconds: u32, purchases_made: u32) {
        let minutes = seconds / 60;
        let secs = seconds % 60;

        eprintln!("┌─── {}m{}s ─────────────────────────", minutes, secs);
        eprintln!(
            "│ Gold: {}  Earned: {}  Ruby: {}",
            logic::format_number(state.gold),
            logic::format_number(state.total_gold_earned),
            logic::format_number(state.ruby),
        );
        eprintln!(
            "│ Piece: {} Lv.{} ({})  Attempts: {}  Destroys: {}",
            state.rank.name(),
            state.level,
            ENHANCE_TABLE[state.level as usize].title,
            state.enhance_attempts,
            state.enhance_destroys,
        );
        eprintln!(
            "│ GPC: {}  ATK: {}  Crit: {:.0}%x{:.0}%  Auto: {:.1}/s",
            logic::format_number(state.gold_per_click),
            logic::format_number(state.attack_power),
            state.crit_chance,
            state.crit_damage,
            state.auto_rate,
        );
        eprintln!(
            "│ Stones: {}  Bosses: {}  Purchases: {}",
            state.stones_destroyed, state.bosses_defeated, purchases_made,
        );

        let counts: Vec<String> = state
            .auto_damagers
            .iter()
            .filter(|d| d.count > 0)
            .map(|d| format!("{}:{}", d.kind.name(), d.count))
            .collect();
        if !counts.is_empty() {
            eprintln!("│ Damagers: {}", counts.join("  "));
        }
        eprintln!("└────────────────────────────────────");
    }

    /// Simulate greedy play for `total_seconds` and return the end state.
    fn simulate(total_seconds: u32) -> GameState {
        let mut state = GameState::new();
        let clicks_per_second = 5u32;

        let mut total_purchases = 0u32;
        let report_times = [30u32, 60, 120, 300, 600, 900, 1200, 1800, 2700, 3600];
        let mut next_report_idx = 0;

        eprintln!("\n========================================");
        eprintln!("  Stone Breaker balance simulator");
        eprintln!("  Play time: {}min, {} clicks/sec", total_seconds / 60, clicks_per_second);
        eprintln!("========================================\n");

        for second in 1..=total_seconds {
            for _ in 0..clicks_per_second {
                logic::click(&mut state);
            }
            logic::auto_tick(&mut state, 1);

            // Enhance whenever gold comfortably covers the attempt.
            let cost = enhance::enhance_cost(state.rank, state.level);
            if state.gold >= cost * 1.5 {
                enhance::try_enhance(&mut state, false, BlessingTier::None);
            }

            // Greedy purchases until nothing pays back.
            for _ in 0..20 {
                match find_best_purchase(&state, clicks_per_second as f64) {
                    Some(Purchase::Upgrade(kind)) => {
                        if logic::buy_upgrade(&mut state, kind) {
                            total_purchases += 1;
                        } else {
                            break;
                        }
                    }
                    Some(Purchase::Damager(kind)) => {
                        if logic::buy_auto_damager(&mut state, kind) {
                            total_purchases += 1;
                        } else {
                            break;
                        }
                    }
                    None => break,
                }
            }

            if next_report_idx < report_times.len() && second >= report_times[next_report_idx] {
                report_stats(&state, second, total_purchases);
                next_report_idx += 1;
            }
        }

        eprintln!("\n======== Final summary ========");
        report_stats(&state, total_seconds, total_purchases);
        eprintln!(
            "Leaderboard score: {}",
            logic::leaderboard_score(&state)
        );
        eprintln!("===============================\n");

        state
    }

    #[test]
    fn simulate_optimal_1hour() {
        let state = simulate(3600);
        // Loose sanity bounds, not balance targets: an hour of greedy
        // play clears the cheap enhancement levels and builds a
        // six-figure cumulative bankroll. Successes are monotonic, so
        // destroy resets cannot flake this.
        assert!(state.enhance_successes >= 4);
        assert!(state.total_gold_earned >= 100_000.0);
    }

    #[test]
    fn simulate_optimal_30min() {
        simulate(1800);
    }
}
