//! Mission and achievement tracking.
//!
//! Progress is a pure projection of cumulative counters; nothing here is
//! incremented independently. `refresh` re-evaluates every unclaimed slot
//! and is called as a post-condition of every transition that moves a
//! counter. Claims are index-based and return whether anything happened.

use crate::balance::{AchievementCondition, MissionReward};
use crate::state::{GameState, MissionStatus};

/// Credit a claim reward. Gold from rewards counts as earned gold.
fn award(state: &mut GameState, reward: MissionReward) {
    state.gold += reward.gold;
    state.total_gold_earned += reward.gold;
    state.ruby += reward.ruby;
}

/// Re-evaluate every unclaimed mission and achievement against the
/// current cumulative counters.
pub fn refresh(state: &mut GameState) {
    for i in 0..state.daily_missions.len() {
        if state.daily_missions[i].status != MissionStatus::InProgress {
            continue;
        }
        let template = state.daily_missions[i].template;
        if state.counter(template.source) >= template.target {
            state.daily_missions[i].status = MissionStatus::Ready;
        }
    }

    for i in 0..state.tiered_missions.len() {
        if state.tiered_missions[i].status != MissionStatus::InProgress {
            continue;
        }
        let mission = &state.tiered_missions[i];
        let tier = &mission.template.tiers[mission.tier];
        if state.counter(mission.template.source) >= tier.target {
            state.tiered_missions[i].status = MissionStatus::Ready;
        }
    }

    for i in 0..state.achievements.len() {
        if state.achievements[i].status != MissionStatus::InProgress {
            continue;
        }
        let met = match state.achievements[i].template.condition {
            AchievementCondition::EnhanceSuccesses(n) => state.enhance_successes >= n,
            AchievementCondition::RankReached(idx) => state.rank.index() >= idx,
        };
        if met {
            state.achievements[i].status = MissionStatus::Ready;
        }
    }
}

/// Current projected progress of a daily mission slot.
pub fn daily_progress(state: &GameState, index: usize) -> f64 {
    state
        .daily_missions
        .get(index)
        .map(|m| state.counter(m.template.source).min(m.template.target))
        .unwrap_or(0.0)
}

/// Claim a ready daily mission. Returns true if the reward was paid.
pub fn claim_daily_mission(state: &mut GameState, index: usize) -> bool {
    if index >= state.daily_missions.len() {
        return false;
    }
    if state.daily_missions[index].status != MissionStatus::Ready {
        return false;
    }

    state.daily_missions[index].status = MissionStatus::Claimed;
    let template = state.daily_missions[index].template;
    award(state, template.reward);
    state.add_log(&format!("Mission complete: {}", template.name), true);
    refresh(state);
    true
}

/// Claim a ready tiered mission. The slot advances to the next tier with
/// the raw counter preserved; the final tier behaves one-shot.
pub fn claim_tiered_mission(state: &mut GameState, index: usize) -> bool {
    if index >= state.tiered_missions.len() {
        return false;
    }
    if state.tiered_missions[index].status != MissionStatus::Ready {
        return false;
    }

    let template = state.tiered_missions[index].template;
    let tier = state.tiered_missions[index].tier;
    let reward = template.tiers[tier].reward;

    if tier + 1 < template.tiers.len() {
        state.tiered_missions[index].tier = tier + 1;
        state.tiered_missions[index].status = MissionStatus::InProgress;
    } else {
        state.tiered_missions[index].status = MissionStatus::Claimed;
    }

    award(state, reward);
    state.add_log(&format!("Mission complete: {}", template.name), true);
    refresh(state);
    true
}

/// Claim a ready achievement. One-shot, never re-issued.
pub fn claim_achievement(state: &mut GameState, index: usize) -> bool {
    if index >= state.achievements.len() {
        return false;
    }
    if state.achievements[index].status != MissionStatus::Ready {
        return false;
    }

    state.achievements[index].status = MissionStatus::Claimed;
    let template = state.achievements[index].template;
    award(state, template.reward);
    state.add_log(&format!("Achievement unlocked: {}", template.name), true);
    refresh(state);
    true
}

/// Re-issue the daily mission slots when the calendar day changes.
/// Tiered missions and achievements are untouched.
pub fn roll_daily(state: &mut GameState, today: &str) {
    if state.daily_date == today {
        return;
    }
    state.daily_date = today.to_string();
    for mission in &mut state.daily_missions {
        mission.status = MissionStatus::InProgress;
    }
    state.add_log("Daily missions refreshed.", false);
    refresh(state);
}
