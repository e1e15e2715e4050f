//! Game state definitions: entities, the full `GameState`, the embedded
//! seedable RNG, and the message log.

use crate::balance::{
    AchievementTemplate, AutoDamagerKind, BossKind, CounterSource, DailyMissionTemplate, Rank,
    ShopItemKind, StoneColor, StoneSize, TieredMissionTemplate, UpgradeKind, ACHIEVEMENTS,
    AUTO_DAMAGER_COST_GROWTH, DAILY_MISSIONS, TIERED_MISSIONS,
};

/// A purchasable stat upgrade at its current level.
#[derive(Clone, Debug)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub level: u32,
}

impl Upgrade {
    pub fn new(kind: UpgradeKind) -> Self {
        let level = kind.starting_level();
        Self { kind, level }
    }

    /// Gold cost of the next level.
    pub fn cost(&self) -> f64 {
        (self.kind.base_cost() * self.kind.cost_multiplier().powi(self.level as i32)).floor()
    }

    /// Stat value contributed at the current level.
    pub fn value(&self) -> f64 {
        let bought = self.level.saturating_sub(self.kind.starting_level());
        self.kind.base_value() + self.kind.increment() * bought as f64
    }
}

/// Owned units of one auto-damager kind.
#[derive(Clone, Debug)]
pub struct AutoDamager {
    pub kind: AutoDamagerKind,
    pub count: u32,
}

impl AutoDamager {
    pub fn new(kind: AutoDamagerKind) -> Self {
        Self { kind, count: 0 }
    }

    /// Gold cost of the next unit.
    pub fn cost(&self) -> f64 {
        (self.kind.base_cost() * AUTO_DAMAGER_COST_GROWTH.powi(self.count as i32)).floor()
    }

    /// Automatic attacks per second from this kind.
    pub fn attacks_per_sec(&self) -> f64 {
        self.count as f64 * self.kind.attacks_per_sec()
    }
}

/// Success-rate boost applied to a single enhancement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlessingTier {
    None,
    /// Bless scroll, +10 percentage points.
    Bless,
    /// Lucky scroll, +20 percentage points.
    Lucky,
}

impl BlessingTier {
    pub fn success_bonus(&self) -> f64 {
        match self {
            BlessingTier::None => 0.0,
            BlessingTier::Bless => 10.0,
            BlessingTier::Lucky => 20.0,
        }
    }
}

/// What the current target actually is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoneVariant {
    Normal { size: StoneSize, color: StoneColor },
    Boss(BossKind),
}

/// The current breakable target.
#[derive(Clone, Debug)]
pub struct Stone {
    pub variant: StoneVariant,
    pub max_hp: f64,
    pub current_hp: f64,
}

impl Stone {
    pub fn is_boss(&self) -> bool {
        matches!(self.variant, StoneVariant::Boss(_))
    }
}

/// Progress state of a mission or achievement slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionStatus {
    InProgress,
    /// Target reached, reward not yet claimed.
    Ready,
    Claimed,
}

/// A live daily mission slot, re-issued each calendar day. Progress is a
/// pure projection of the cumulative counter, never tracked separately.
#[derive(Clone, Debug)]
pub struct DailyMission {
    pub template: &'static DailyMissionTemplate,
    pub status: MissionStatus,
}

/// A live tiered mission slot. Claiming advances `tier` until the table
/// runs out.
#[derive(Clone, Debug)]
pub struct TieredMission {
    pub template: &'static TieredMissionTemplate,
    pub tier: usize,
    pub status: MissionStatus,
}

/// A one-shot achievement slot.
#[derive(Clone, Debug)]
pub struct Achievement {
    pub template: &'static AchievementTemplate,
    pub status: MissionStatus,
}

/// Log entry surfaced to the UI.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a stone-breaker run plus everything that survives
/// prestige.
pub struct GameState {
    // Currencies
    pub gold: f64,
    pub ruby: f64,

    // Piece
    pub rank: Rank,
    pub level: u32,

    // Purchases
    pub upgrades: Vec<Upgrade>,
    pub auto_damagers: Vec<AutoDamager>,

    // Derived stats, refreshed by `stats::recompute` after any mutation
    // that can affect them.
    pub gold_per_click: f64,
    pub attack_power: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    /// Automatic attacks per second (before the auto booster).
    pub auto_rate: f64,

    // Target
    pub stone: Stone,
    /// Ordinary stones left before the next boss spawns.
    pub stones_until_boss: u32,

    // Cumulative counters
    pub total_clicks: u64,
    pub total_gold_earned: f64,
    pub stones_destroyed: u64,
    pub bosses_defeated: u64,
    pub enhance_attempts: u64,
    pub enhance_successes: u64,
    pub enhance_destroys: u64,

    // Consumables
    pub protect_scrolls: u32,
    pub bless_scrolls: u32,
    pub lucky_scrolls: u32,

    // Boosters, counted down by the auto tick.
    pub gold_boost_secs: u32,
    pub auto_boost_secs: u32,

    // Prestige
    pub prestige_count: u32,
    /// Permanent income/attack bonus, +0.1 per prestige.
    pub prestige_bonus: f64,

    // Missions & achievements
    pub daily_missions: Vec<DailyMission>,
    pub tiered_missions: Vec<TieredMission>,
    pub achievements: Vec<Achievement>,
    /// Calendar day the daily slots were issued for.
    pub daily_date: String,

    // Offline accounting
    pub last_online_ms: u64,

    /// Message log.
    pub log: Vec<LogEntry>,

    /// RNG seed; every draw advances it, and it is saved/restored.
    pub rng_state: u64,
}

impl GameState {
    pub fn new() -> Self {
        let upgrades = UpgradeKind::all().iter().map(|k| Upgrade::new(*k)).collect();
        let auto_damagers = AutoDamagerKind::all()
            .iter()
            .map(|k| AutoDamager::new(*k))
            .collect();

        let daily_missions = DAILY_MISSIONS
            .iter()
            .map(|t| DailyMission {
                template: t,
                status: MissionStatus::InProgress,
            })
            .collect();
        let tiered_missions = TIERED_MISSIONS
            .iter()
            .map(|t| TieredMission {
                template: t,
                tier: 0,
                status: MissionStatus::InProgress,
            })
            .collect();
        let achievements = ACHIEVEMENTS
            .iter()
            .map(|t| Achievement {
                template: t,
                status: MissionStatus::InProgress,
            })
            .collect();

        let mut state = Self {
            gold: 0.0,
            ruby: 0.0,
            rank: Rank::Pawn,
            level: 0,
            upgrades,
            auto_damagers,
            gold_per_click: 1.0,
            attack_power: 1.0,
            crit_chance: 0.0,
            crit_damage: 150.0,
            auto_rate: 0.0,
            stone: Stone {
                variant: StoneVariant::Normal {
                    size: StoneSize::Small,
                    color: StoneColor::Black,
                },
                max_hp: 10.0,
                current_hp: 10.0,
            },
            stones_until_boss: crate::balance::STONES_PER_BOSS,
            total_clicks: 0,
            total_gold_earned: 0.0,
            stones_destroyed: 0,
            bosses_defeated: 0,
            enhance_attempts: 0,
            enhance_successes: 0,
            enhance_destroys: 0,
            protect_scrolls: 0,
            bless_scrolls: 0,
            lucky_scrolls: 0,
            gold_boost_secs: 0,
            auto_boost_secs: 0,
            prestige_count: 0,
            prestige_bonus: 0.0,
            daily_missions,
            tiered_missions,
            achievements,
            daily_date: String::new(),
            last_online_ms: 0,
            log: vec![LogEntry {
                text: "Welcome to the quarry!".into(),
                is_important: true,
            }],
            rng_state: 42,
        };
        crate::stats::recompute(&mut state);
        state.stone = crate::target::create_stone(&mut state);
        state
    }

    /// Read a cumulative counter by its mission source.
    pub fn counter(&self, source: CounterSource) -> f64 {
        match source {
            CounterSource::TotalClicks => self.total_clicks as f64,
            CounterSource::StonesDestroyed => self.stones_destroyed as f64,
            CounterSource::EnhanceAttempts => self.enhance_attempts as f64,
            CounterSource::TotalGoldEarned => self.total_gold_earned,
        }
    }

    /// Upgrade slot by kind. Slots exist for every kind, in catalog order.
    pub fn upgrade(&self, kind: UpgradeKind) -> &Upgrade {
        &self.upgrades[kind.index()]
    }

    pub fn upgrade_mut(&mut self, kind: UpgradeKind) -> &mut Upgrade {
        &mut self.upgrades[kind.index()]
    }

    pub fn auto_damager(&self, kind: AutoDamagerKind) -> &AutoDamager {
        &self.auto_damagers[kind.index()]
    }

    pub fn auto_damager_mut(&mut self, kind: AutoDamagerKind) -> &mut AutoDamager {
        &mut self.auto_damagers[kind.index()]
    }

    /// Owned count of a shop consumable (boosters are timed, not stocked).
    pub fn consumable_count(&self, kind: ShopItemKind) -> u32 {
        match kind {
            ShopItemKind::ProtectScroll => self.protect_scrolls,
            ShopItemKind::BlessScroll => self.bless_scrolls,
            ShopItemKind::LuckyScroll => self.lucky_scrolls,
            ShopItemKind::GoldBooster | ShopItemKind::AutoBooster => 0,
        }
    }

    /// Advance the embedded RNG and return the raw draw.
    pub fn next_random(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.rng_state
    }

    /// Uniform draw in `0..max` using the upper bits.
    pub fn rng_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_random() >> 33) % max as u64) as u32
    }

    /// Uniform percentage in [0, 100) with 0.01 granularity, for
    /// fractional rate thresholds.
    pub fn roll_percent(&mut self) -> f64 {
        ((self.next_random() >> 33) % 10_000) as f64 / 100.0
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_initial_cost() {
        let u = Upgrade::new(UpgradeKind::GoldPerClick);
        // Level starts at 1, so the first purchase costs base * 1.15^1.
        assert!((u.cost() - (10.0_f64 * 1.15).floor()).abs() < 0.001);
    }

    #[test]
    fn upgrade_cost_scales() {
        let mut u = Upgrade::new(UpgradeKind::AttackPower);
        u.level = 10;
        let expected = (15.0 * 1.18_f64.powi(10)).floor();
        assert!((u.cost() - expected).abs() < 0.001);
    }

    #[test]
    fn upgrade_value_tracks_level() {
        let mut u = Upgrade::new(UpgradeKind::CritChance);
        assert!((u.value() - 0.0).abs() < 0.001);
        u.level = 3;
        assert!((u.value() - 15.0).abs() < 0.001);

        let mut g = Upgrade::new(UpgradeKind::GoldPerClick);
        assert!((g.value() - 1.0).abs() < 0.001);
        g.level = 5;
        assert!((g.value() - 5.0).abs() < 0.001);
    }

    #[test]
    fn mission_slots_are_debug_printable() {
        let state = GameState::new();
        let dump = format!(
            "{:?} {:?} {:?}",
            state.daily_missions[0], state.tiered_missions[0], state.achievements[0],
        );
        assert!(dump.contains("InProgress"));
    }

    #[test]
    fn auto_damager_cost_growth() {
        let mut d = AutoDamager::new(AutoDamagerKind::Hammer);
        assert!((d.cost() - 300.0).abs() < 0.001);
        d.count = 2;
        assert!((d.cost() - (300.0_f64 * 1.5 * 1.5).floor()).abs() < 0.001);
    }

    #[test]
    fn auto_damager_rate() {
        let mut d = AutoDamager::new(AutoDamagerKind::Pickaxe);
        d.count = 4;
        assert!((d.attacks_per_sec() - 4.0).abs() < 0.001);
    }

    #[test]
    fn fresh_state_has_live_stone() {
        let state = GameState::new();
        assert!(state.stone.current_hp > 0.0);
        assert_eq!(state.stone.current_hp, state.stone.max_hp);
        assert!(!state.stone.is_boss());
        assert_eq!(state.stones_until_boss, crate::balance::STONES_PER_BOSS);
    }

    #[test]
    fn fresh_state_stats() {
        let state = GameState::new();
        assert!((state.gold_per_click - 1.0).abs() < 0.001);
        assert!((state.attack_power - 1.0).abs() < 0.001);
        assert!((state.crit_chance - 0.0).abs() < 0.001);
        assert!((state.crit_damage - 150.0).abs() < 0.001);
        assert!((state.auto_rate - 0.0).abs() < 0.001);
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = GameState::new();
        let mut b = GameState::new();
        a.rng_state = 7;
        b.rng_state = 7;
        for _ in 0..10 {
            assert_eq!(a.next_random(), b.next_random());
        }
    }

    #[test]
    fn rng_range_bounds() {
        let mut state = GameState::new();
        for _ in 0..1000 {
            let v = state.rng_range(100);
            assert!(v < 100);
        }
        assert_eq!(state.rng_range(0), 0);
    }

    #[test]
    fn roll_percent_bounds() {
        let mut state = GameState::new();
        for _ in 0..1000 {
            let p = state.roll_percent();
            assert!((0.0..100.0).contains(&p));
        }
    }

    #[test]
    fn log_truncation() {
        let mut state = GameState::new();
        for i in 0..60 {
            state.add_log(&format!("msg {}", i), false);
        }
        assert!(state.log.len() <= 50);
    }
}
