//! Randomized dashboard content
//!
//! Pure generators for the stat panel, the top lists and the raid table.
//! DOM rendering lives in `page::dom`; keeping generation separate means the
//! shapes and ranges are testable natively with a seeded RNG.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::spawn::rand_int;

const NAMES: &[&str] = &[
    "Kael", "Nyx", "Viper", "Ghost", "Zero", "Revenant", "Frost", "Cipher", "Echo", "Dusk",
];
const CLANS: &[&str] = &["System", "Glitch", "Root", "Admin", "Null", "Void"];
const BOSSES: &[&str] = &[
    "Queen Ant",
    "Core",
    "Orfen",
    "Baium",
    "Antharas",
    "Valakas",
    "Frintezza",
    "Beleth",
];

/// Rows per top list
pub const TOP_LIST_LEN: usize = 8;

fn pick<'a, T>(rng: &mut Pcg32, items: &'a [T]) -> &'a T {
    let idx = (rng.random::<f32>() * items.len() as f32).floor() as usize;
    &items[idx]
}

/// Siege status shown in the stat panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiegeState {
    PeaceMode,
    RegOpen,
    SiegeActive,
}

impl SiegeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiegeState::PeaceMode => "PEACE_MODE",
            SiegeState::RegOpen => "REG_OPEN",
            SiegeState::SiegeActive => "SIEGE_ACTIVE",
        }
    }
}

/// One refresh of the server stat panel
#[derive(Debug, Clone)]
pub struct ServerStats {
    pub online_now: u32,
    pub uptime: String,
    pub siege: SiegeState,
}

pub fn gen_server_stats(rng: &mut Pcg32) -> ServerStats {
    let online_now = rand_int(rng, 150, 800) as u32;
    let uptime = format!("{}d {}h", rand_int(rng, 2, 10), rand_int(rng, 1, 23));
    let siege = *pick(
        rng,
        &[
            SiegeState::PeaceMode,
            SiegeState::RegOpen,
            SiegeState::SiegeActive,
        ],
    );
    ServerStats {
        online_now,
        uptime,
        siege,
    }
}

/// Which leaderboard a top list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopKind {
    Pk,
    Pvp,
}

impl TopKind {
    fn base_score(&self) -> i32 {
        match self {
            TopKind::Pk => 1000,
            TopKind::Pvp => 2000,
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone)]
pub struct RankRow {
    pub pos: u32,
    pub name: &'static str,
    pub clan: &'static str,
    pub score: i32,
}

pub fn gen_top_list(rng: &mut Pcg32, kind: TopKind) -> Vec<RankRow> {
    (0..TOP_LIST_LEN as u32)
        .map(|i| RankRow {
            pos: i + 1,
            name: *pick(rng, NAMES),
            clan: *pick(rng, CLANS),
            score: kind.base_score() - (i as i32 * 100) - rand_int(rng, 0, 50) as i32,
        })
        .collect()
}

/// One raid boss status row
#[derive(Debug, Clone)]
pub struct RaidBoss {
    pub name: &'static str,
    pub alive: bool,
    pub zone: &'static str,
    pub respawn: String,
}

pub fn gen_raids(rng: &mut Pcg32) -> Vec<RaidBoss> {
    BOSSES
        .iter()
        .map(|&name| {
            let alive = rng.random::<f32>() > 0.4;
            let respawn = if alive {
                "ACTIVE".to_string()
            } else {
                format!("T-{}H", rand_int(rng, 1, 12))
            };
            RaidBoss {
                name,
                alive,
                zone: "Chaotic Zone",
                respawn,
            }
        })
        .collect()
}

/// Raid table filter selected by the segmented buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaidFilter {
    #[default]
    All,
    Alive,
    Dead,
}

impl RaidFilter {
    pub fn from_key(key: &str) -> Self {
        match key {
            "alive" => RaidFilter::Alive,
            "dead" => RaidFilter::Dead,
            _ => RaidFilter::All,
        }
    }

    pub fn matches(&self, alive: bool) -> bool {
        match self {
            RaidFilter::All => true,
            RaidFilter::Alive => alive,
            RaidFilter::Dead => !alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn server_stats_in_range() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..100 {
            let stats = gen_server_stats(&mut rng);
            assert!((150..=800).contains(&stats.online_now));
            assert!(stats.uptime.ends_with('h'));
        }
    }

    #[test]
    fn top_list_shape_and_ordering() {
        let mut rng = Pcg32::seed_from_u64(3);
        for kind in [TopKind::Pk, TopKind::Pvp] {
            let rows = gen_top_list(&mut rng, kind);
            assert_eq!(rows.len(), TOP_LIST_LEN);
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.pos, i as u32 + 1);
            }
            // 100-point rank gap dominates the 0-50 jitter
            for pair in rows.windows(2) {
                assert!(pair[0].score > pair[1].score);
            }
        }
    }

    #[test]
    fn raids_cover_the_boss_pool() {
        let mut rng = Pcg32::seed_from_u64(4);
        let raids = gen_raids(&mut rng);
        assert_eq!(raids.len(), 8);
        for raid in &raids {
            if raid.alive {
                assert_eq!(raid.respawn, "ACTIVE");
            } else {
                assert!(raid.respawn.starts_with("T-"));
            }
        }
    }

    #[test]
    fn filter_semantics() {
        assert!(RaidFilter::All.matches(true));
        assert!(RaidFilter::All.matches(false));
        assert!(RaidFilter::Alive.matches(true));
        assert!(!RaidFilter::Alive.matches(false));
        assert!(RaidFilter::Dead.matches(false));
        assert!(!RaidFilter::Dead.matches(true));
        assert_eq!(RaidFilter::from_key("alive"), RaidFilter::Alive);
        assert_eq!(RaidFilter::from_key("anything"), RaidFilter::All);
    }
}
