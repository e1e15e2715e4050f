//! Static balance tables and tuning constants.
//!
//! Everything here is data: catalogs the rest of the core resolves by
//! lookup. Runtime state (levels, counts, HP) lives in `state.rs`.

use serde::{Deserialize, Serialize};

// ── Ranks ─────────────────────────────────────────────────────

/// Coarse progression tier of the player's piece, weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Imperial,
}

impl Rank {
    /// All ranks in promotion order.
    pub fn all() -> &'static [Rank] {
        &[
            Rank::Pawn,
            Rank::Knight,
            Rank::Bishop,
            Rank::Rook,
            Rank::Queen,
            Rank::King,
            Rank::Imperial,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Pawn => "Pawn",
            Rank::Knight => "Knight",
            Rank::Bishop => "Bishop",
            Rank::Rook => "Rook",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Imperial => "Imperial",
        }
    }

    /// Index into promotion order (Pawn = 0).
    pub fn index(&self) -> usize {
        Rank::all().iter().position(|r| r == self).unwrap_or(0)
    }

    /// Power multiplier applied to attack and gold.
    pub fn multiplier(&self) -> f64 {
        match self {
            Rank::Pawn => 1.0,
            Rank::Knight => 2.0,
            Rank::Bishop => 3.0,
            Rank::Rook => 5.0,
            Rank::Queen => 8.0,
            Rank::King => 12.0,
            Rank::Imperial => 20.0,
        }
    }

    /// The next rank up, or None at the strongest rank.
    pub fn next(&self) -> Option<Rank> {
        let idx = self.index();
        Rank::all().get(idx + 1).copied()
    }

    /// Multiplier applied to the base enhancement cost at this rank.
    pub fn enhance_cost_multiplier(&self) -> f64 {
        match self {
            Rank::Pawn => 1.0,
            Rank::Knight => 20.0,
            Rank::Bishop => 110.0,
            Rank::Rook => 550.0,
            Rank::Queen => 2_200.0,
            Rank::King => 5_500.0,
            Rank::Imperial => 1.0,
        }
    }

    /// Flat percentage-point adjustment to the base success rate.
    pub fn success_rate_bonus(&self) -> f64 {
        match self {
            Rank::Pawn => 0.0,
            Rank::Knight => -12.0,
            Rank::Bishop => -25.0,
            Rank::Rook => -32.0,
            Rank::Queen => -38.0,
            Rank::King => -45.0,
            Rank::Imperial => 0.0,
        }
    }

    /// Flat percentage-point adjustment to the base destroy rate.
    pub fn destroy_rate_bonus(&self) -> f64 {
        match self {
            Rank::Pawn => 0.0,
            Rank::Knight => 2.0,
            Rank::Bishop => 4.0,
            Rank::Rook => 7.0,
            Rank::Queen => 12.0,
            Rank::King => 20.0,
            Rank::Imperial => 0.0,
        }
    }
}

// ── Enhancement table ─────────────────────────────────────────

/// One row of the enhancement table, indexed by piece level.
#[derive(Debug)]
pub struct EnhanceEntry {
    /// Military-grade display title for the level.
    pub title: &'static str,
    /// Base success chance in percent.
    pub success_rate: f64,
    /// Base gold cost (before the rank cost multiplier).
    pub cost: f64,
    /// Base destroy chance in percent (0 below level 4).
    pub destroy_rate: f64,
}

/// Levels 0..=16. Succeeding at the terminal level promotes the rank.
pub const ENHANCE_TABLE: [EnhanceEntry; 17] = [
    EnhanceEntry { title: "Private", success_rate: 100.0, cost: 100.0, destroy_rate: 0.0 },
    EnhanceEntry { title: "Private First Class", success_rate: 99.0, cost: 300.0, destroy_rate: 0.0 },
    EnhanceEntry { title: "Corporal", success_rate: 98.0, cost: 800.0, destroy_rate: 0.0 },
    EnhanceEntry { title: "Sergeant", success_rate: 97.0, cost: 2_000.0, destroy_rate: 0.0 },
    EnhanceEntry { title: "Staff Sergeant", success_rate: 96.0, cost: 5_000.0, destroy_rate: 3.0 },
    EnhanceEntry { title: "Sergeant First Class", success_rate: 94.0, cost: 12_000.0, destroy_rate: 3.5 },
    EnhanceEntry { title: "Master Sergeant", success_rate: 92.0, cost: 30_000.0, destroy_rate: 4.0 },
    EnhanceEntry { title: "Second Lieutenant", success_rate: 90.0, cost: 70_000.0, destroy_rate: 4.5 },
    EnhanceEntry { title: "First Lieutenant", success_rate: 88.0, cost: 150_000.0, destroy_rate: 5.0 },
    EnhanceEntry { title: "Captain", success_rate: 85.0, cost: 350_000.0, destroy_rate: 6.0 },
    EnhanceEntry { title: "Major", success_rate: 82.0, cost: 800_000.0, destroy_rate: 7.0 },
    EnhanceEntry { title: "Lieutenant Colonel", success_rate: 78.0, cost: 1_800_000.0, destroy_rate: 8.0 },
    EnhanceEntry { title: "Colonel", success_rate: 74.0, cost: 4_000_000.0, destroy_rate: 8.5 },
    EnhanceEntry { title: "Brigadier General", success_rate: 69.0, cost: 9_000_000.0, destroy_rate: 9.0 },
    EnhanceEntry { title: "Major General", success_rate: 64.0, cost: 20_000_000.0, destroy_rate: 9.5 },
    EnhanceEntry { title: "Lieutenant General", success_rate: 58.0, cost: 45_000_000.0, destroy_rate: 10.0 },
    EnhanceEntry { title: "General", success_rate: 50.0, cost: 100_000_000.0, destroy_rate: 10.5 },
];

/// Terminal level index; success there is a rank promotion.
pub const MAX_ENHANCE_LEVEL: usize = ENHANCE_TABLE.len() - 1;

/// Destroy rolls never trigger below this level.
pub const DESTROY_SAFE_BELOW_LEVEL: usize = 4;

/// Success rate never drops below this, whatever the rank penalty.
pub const MIN_SUCCESS_RATE: f64 = 10.0;

// ── Upgrades ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    GoldPerClick,
    AttackPower,
    CritChance,
    CritDamage,
}

impl UpgradeKind {
    pub fn all() -> &'static [UpgradeKind] {
        &[
            UpgradeKind::GoldPerClick,
            UpgradeKind::AttackPower,
            UpgradeKind::CritChance,
            UpgradeKind::CritDamage,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::GoldPerClick => "Gold per Click",
            UpgradeKind::AttackPower => "Attack Power",
            UpgradeKind::CritChance => "Critical Chance",
            UpgradeKind::CritDamage => "Critical Damage",
        }
    }

    pub fn index(&self) -> usize {
        UpgradeKind::all().iter().position(|k| k == self).unwrap_or(0)
    }

    /// Level a fresh game starts at. Gold/attack are 1-based stats,
    /// crit stats are zero-based.
    pub fn starting_level(&self) -> u32 {
        match self {
            UpgradeKind::GoldPerClick | UpgradeKind::AttackPower => 1,
            UpgradeKind::CritChance | UpgradeKind::CritDamage => 0,
        }
    }

    pub fn base_value(&self) -> f64 {
        match self {
            UpgradeKind::GoldPerClick => 1.0,
            UpgradeKind::AttackPower => 1.0,
            UpgradeKind::CritChance => 0.0,
            UpgradeKind::CritDamage => 150.0,
        }
    }

    /// Value gained per purchased level.
    pub fn increment(&self) -> f64 {
        match self {
            UpgradeKind::GoldPerClick => 1.0,
            UpgradeKind::AttackPower => 1.0,
            UpgradeKind::CritChance => 5.0,
            UpgradeKind::CritDamage => 10.0,
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            UpgradeKind::GoldPerClick => 10.0,
            UpgradeKind::AttackPower => 15.0,
            UpgradeKind::CritChance => 50.0,
            UpgradeKind::CritDamage => 80.0,
        }
    }

    pub fn cost_multiplier(&self) -> f64 {
        match self {
            UpgradeKind::GoldPerClick => 1.15,
            UpgradeKind::AttackPower => 1.18,
            UpgradeKind::CritChance => 1.25,
            UpgradeKind::CritDamage => 1.2,
        }
    }
}

pub const MAX_UPGRADE_LEVEL: u32 = 1_000;

// ── Auto damagers ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoDamagerKind {
    Hammer,
    Pickaxe,
    Mace,
    Drill,
    Dynamite,
    Laser,
    Blackhole,
}

impl AutoDamagerKind {
    pub fn all() -> &'static [AutoDamagerKind] {
        &[
            AutoDamagerKind::Hammer,
            AutoDamagerKind::Pickaxe,
            AutoDamagerKind::Mace,
            AutoDamagerKind::Drill,
            AutoDamagerKind::Dynamite,
            AutoDamagerKind::Laser,
            AutoDamagerKind::Blackhole,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AutoDamagerKind::Hammer => "Hammer",
            AutoDamagerKind::Pickaxe => "Pickaxe",
            AutoDamagerKind::Mace => "Mace",
            AutoDamagerKind::Drill => "Drill",
            AutoDamagerKind::Dynamite => "Dynamite",
            AutoDamagerKind::Laser => "Laser",
            AutoDamagerKind::Blackhole => "Black Hole",
        }
    }

    pub fn index(&self) -> usize {
        AutoDamagerKind::all().iter().position(|k| k == self).unwrap_or(0)
    }

    /// Automatic attacks per second contributed by one unit. Each
    /// automatic attack deals full attack power and earns the per-click
    /// gold.
    pub fn attacks_per_sec(&self) -> f64 {
        match self {
            AutoDamagerKind::Hammer => 0.5,
            AutoDamagerKind::Pickaxe => 1.0,
            AutoDamagerKind::Mace => 3.0,
            AutoDamagerKind::Drill => 8.0,
            AutoDamagerKind::Dynamite => 20.0,
            AutoDamagerKind::Laser => 50.0,
            AutoDamagerKind::Blackhole => 120.0,
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            AutoDamagerKind::Hammer => 300.0,
            AutoDamagerKind::Pickaxe => 1_800.0,
            AutoDamagerKind::Mace => 9_000.0,
            AutoDamagerKind::Drill => 48_000.0,
            AutoDamagerKind::Dynamite => 250_000.0,
            AutoDamagerKind::Laser => 1_200_000.0,
            AutoDamagerKind::Blackhole => 6_000_000.0,
        }
    }

    /// (rank, level) the piece must have reached before this unit can be
    /// purchased.
    pub fn unlock(&self) -> (Rank, u32) {
        match self {
            AutoDamagerKind::Hammer => (Rank::Pawn, 0),
            AutoDamagerKind::Pickaxe => (Rank::Pawn, 4),
            AutoDamagerKind::Mace => (Rank::Knight, 0),
            AutoDamagerKind::Drill => (Rank::Bishop, 0),
            AutoDamagerKind::Dynamite => (Rank::Rook, 0),
            AutoDamagerKind::Laser => (Rank::Queen, 0),
            AutoDamagerKind::Blackhole => (Rank::King, 0),
        }
    }
}

/// Cost growth per owned unit.
pub const AUTO_DAMAGER_COST_GROWTH: f64 = 1.5;

/// Maximum owned units of a single kind.
pub const MAX_AUTO_DAMAGER_COUNT: u32 = 50;

// ── Stones & bosses ───────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoneSize {
    Small,
    Medium,
    Large,
}

impl StoneSize {
    pub fn hp_multiplier(&self) -> f64 {
        match self {
            StoneSize::Small => 1.0,
            StoneSize::Medium => 2.0,
            StoneSize::Large => 4.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoneColor {
    Black,
    White,
}

/// HP floor for a freshly generated stone.
pub const STONE_MIN_BASE_HP: f64 = 10.0;

/// Stone base HP = attack power times this.
pub const STONE_HP_PER_ATTACK: f64 = 5.0;

/// Ordinary stones destroyed between bosses.
pub const STONES_PER_BOSS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    Boulder,
    IronShell,
    Obsidian,
    GraniteWarden,
    BasaltTitan,
    Meteorite,
    AncientCore,
}

impl BossKind {
    pub fn all() -> &'static [BossKind] {
        &[
            BossKind::Boulder,
            BossKind::IronShell,
            BossKind::Obsidian,
            BossKind::GraniteWarden,
            BossKind::BasaltTitan,
            BossKind::Meteorite,
            BossKind::AncientCore,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BossKind::Boulder => "Boulder",
            BossKind::IronShell => "Iron Shell",
            BossKind::Obsidian => "Obsidian",
            BossKind::GraniteWarden => "Granite Warden",
            BossKind::BasaltTitan => "Basalt Titan",
            BossKind::Meteorite => "Meteorite",
            BossKind::AncientCore => "Ancient Core",
        }
    }

    pub fn index(&self) -> usize {
        BossKind::all().iter().position(|k| k == self).unwrap_or(0)
    }

    /// Balance-tuned checkpoint HP; does not scale with player power.
    pub fn hp(&self) -> f64 {
        match self {
            BossKind::Boulder => 2_250.0,
            BossKind::IronShell => 3_750.0,
            BossKind::Obsidian => 6_000.0,
            BossKind::GraniteWarden => 9_000.0,
            BossKind::BasaltTitan => 12_750.0,
            BossKind::Meteorite => 18_000.0,
            BossKind::AncientCore => 45_000.0,
        }
    }

    /// Fixed gold paid on the kill, replacing the HP-derived bonus.
    pub fn reward(&self) -> f64 {
        match self {
            BossKind::Boulder => 4_500.0,
            BossKind::IronShell => 12_500.0,
            BossKind::Obsidian => 35_000.0,
            BossKind::GraniteWarden => 100_000.0,
            BossKind::BasaltTitan => 260_000.0,
            BossKind::Meteorite => 680_000.0,
            BossKind::AncientCore => 2_300_000.0,
        }
    }
}

/// Destruction-bonus tiers for ordinary stones, drawn uniformly.
pub const DESTROY_BONUS_TIERS: [f64; 3] = [0.33, 0.66, 0.99];

/// Destruction bonus = max_hp * gold_per_click * this * tier.
pub const DESTROY_BONUS_RATE: f64 = 0.1;

// ── Shop ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItemKind {
    /// Consumed only when a destroy roll actually triggers.
    ProtectScroll,
    /// +10% success; consumed on every attempt it is selected for.
    BlessScroll,
    /// +20% success; consumed on every attempt it is selected for.
    LuckyScroll,
    /// Doubles gold income for a limited time.
    GoldBooster,
    /// Doubles the automatic attack rate for a limited time.
    AutoBooster,
}

impl ShopItemKind {
    pub fn all() -> &'static [ShopItemKind] {
        &[
            ShopItemKind::ProtectScroll,
            ShopItemKind::BlessScroll,
            ShopItemKind::LuckyScroll,
            ShopItemKind::GoldBooster,
            ShopItemKind::AutoBooster,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShopItemKind::ProtectScroll => "Protect Scroll",
            ShopItemKind::BlessScroll => "Bless Scroll",
            ShopItemKind::LuckyScroll => "Lucky Scroll",
            ShopItemKind::GoldBooster => "Gold Booster",
            ShopItemKind::AutoBooster => "Auto Booster",
        }
    }

    pub fn index(&self) -> usize {
        ShopItemKind::all().iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn gold_cost(&self) -> f64 {
        match self {
            ShopItemKind::GoldBooster => 5_000.0,
            ShopItemKind::AutoBooster => 10_000.0,
            _ => 0.0,
        }
    }

    pub fn ruby_cost(&self) -> f64 {
        match self {
            ShopItemKind::ProtectScroll => 10.0,
            ShopItemKind::BlessScroll => 15.0,
            ShopItemKind::LuckyScroll => 25.0,
            _ => 0.0,
        }
    }
}

/// Booster duration in seconds.
pub const BOOSTER_DURATION_SECS: u32 = 300;

// ── Missions & achievements ───────────────────────────────────

/// Which cumulative statistic a mission counter projects from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterSource {
    TotalClicks,
    StonesDestroyed,
    EnhanceAttempts,
    TotalGoldEarned,
}

#[derive(Clone, Copy, Debug)]
pub struct MissionReward {
    pub gold: f64,
    pub ruby: f64,
}

/// A daily mission template: re-issued each calendar day.
#[derive(Debug)]
pub struct DailyMissionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub source: CounterSource,
    pub target: f64,
    pub reward: MissionReward,
}

pub const DAILY_MISSIONS: [DailyMissionTemplate; 4] = [
    DailyMissionTemplate {
        id: "click100",
        name: "Keep Tapping!",
        source: CounterSource::TotalClicks,
        target: 100.0,
        reward: MissionReward { gold: 500.0, ruby: 5.0 },
    },
    DailyMissionTemplate {
        id: "click500",
        name: "Click Master",
        source: CounterSource::TotalClicks,
        target: 500.0,
        reward: MissionReward { gold: 2_000.0, ruby: 10.0 },
    },
    DailyMissionTemplate {
        id: "enhance5",
        name: "Enhancement Challenge",
        source: CounterSource::EnhanceAttempts,
        target: 5.0,
        reward: MissionReward { gold: 1_000.0, ruby: 5.0 },
    },
    DailyMissionTemplate {
        id: "gold10k",
        name: "Getting Rich",
        source: CounterSource::TotalGoldEarned,
        target: 10_000.0,
        reward: MissionReward { gold: 0.0, ruby: 15.0 },
    },
];

/// One tier of a cumulative mission.
#[derive(Debug)]
pub struct MissionTier {
    pub target: f64,
    pub reward: MissionReward,
}

/// A cumulative mission re-issued at the next tier on claim.
#[derive(Debug)]
pub struct TieredMissionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub source: CounterSource,
    pub tiers: &'static [MissionTier],
}

pub const TIERED_MISSIONS: [TieredMissionTemplate; 3] = [
    TieredMissionTemplate {
        id: "stoneBreaker",
        name: "Stone Breaker",
        source: CounterSource::StonesDestroyed,
        tiers: &[
            MissionTier { target: 100.0, reward: MissionReward { gold: 1_000.0, ruby: 0.0 } },
            MissionTier { target: 1_000.0, reward: MissionReward { gold: 10_000.0, ruby: 0.0 } },
            MissionTier { target: 10_000.0, reward: MissionReward { gold: 100_000.0, ruby: 0.0 } },
            MissionTier { target: 100_000.0, reward: MissionReward { gold: 1_000_000.0, ruby: 0.0 } },
        ],
    },
    TieredMissionTemplate {
        id: "fortune",
        name: "Fortune Seeker",
        source: CounterSource::TotalGoldEarned,
        tiers: &[
            MissionTier { target: 10_000.0, reward: MissionReward { gold: 0.0, ruby: 10.0 } },
            MissionTier { target: 1_000_000.0, reward: MissionReward { gold: 0.0, ruby: 30.0 } },
            MissionTier { target: 100_000_000.0, reward: MissionReward { gold: 0.0, ruby: 100.0 } },
        ],
    },
    TieredMissionTemplate {
        id: "enhanceAddict",
        name: "Forge Devotee",
        source: CounterSource::EnhanceAttempts,
        tiers: &[
            MissionTier { target: 10.0, reward: MissionReward { gold: 2_000.0, ruby: 0.0 } },
            MissionTier { target: 100.0, reward: MissionReward { gold: 50_000.0, ruby: 0.0 } },
            MissionTier { target: 1_000.0, reward: MissionReward { gold: 2_000_000.0, ruby: 0.0 } },
        ],
    },
];

/// What unlocks a one-shot achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AchievementCondition {
    /// At least this many successful enhancements.
    EnhanceSuccesses(u64),
    /// Piece rank index at or above this.
    RankReached(usize),
}

#[derive(Debug)]
pub struct AchievementTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub condition: AchievementCondition,
    pub reward: MissionReward,
}

pub const ACHIEVEMENTS: [AchievementTemplate; 5] = [
    AchievementTemplate {
        id: "firstEnhance",
        name: "First Enhancement",
        condition: AchievementCondition::EnhanceSuccesses(1),
        reward: MissionReward { gold: 1_000.0, ruby: 10.0 },
    },
    AchievementTemplate {
        id: "knight",
        name: "Knight Promotion",
        condition: AchievementCondition::RankReached(1),
        reward: MissionReward { gold: 5_000.0, ruby: 20.0 },
    },
    AchievementTemplate {
        id: "bishop",
        name: "Bishop Promotion",
        condition: AchievementCondition::RankReached(2),
        reward: MissionReward { gold: 10_000.0, ruby: 30.0 },
    },
    AchievementTemplate {
        id: "rook",
        name: "Rook Promotion",
        condition: AchievementCondition::RankReached(3),
        reward: MissionReward { gold: 25_000.0, ruby: 50.0 },
    },
    AchievementTemplate {
        id: "queen",
        name: "Queen Promotion",
        condition: AchievementCondition::RankReached(4),
        reward: MissionReward { gold: 50_000.0, ruby: 100.0 },
    },
];

// ── Prestige & offline ────────────────────────────────────────

/// Ruby reward = (rank_index + 1) * (level + 1) * this.
pub const PRESTIGE_RUBY_RATE: f64 = 10.0;

/// Permanent bonus gained per prestige.
pub const PRESTIGE_BONUS_INCREMENT: f64 = 0.1;

/// Offline stretches shorter than this pay nothing.
pub const OFFLINE_MIN_MS: u64 = 60_000;

/// Offline credit is capped at this much elapsed time.
pub const OFFLINE_CAP_MS: u64 = 28_800_000;

/// Offline income earns at half the online auto rate.
pub const OFFLINE_RATE: f64 = 0.5;
