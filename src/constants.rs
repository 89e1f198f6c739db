// Score scale constants
// Oracle scores are raw 0-10; pass thresholds are configured on a
// normalized 0-100 scale and compared after multiplying raw by 10.
pub const RAW_SCORE_MAX: f64 = 10.0;
pub const NORMALIZED_SCORE_MAX: f64 = 100.0;
pub const SCORE_MULTIPLIER: f64 = 10.0;

// Decision thresholds (raw 0-10 scale)
pub const LOW_AVG_THRESHOLD: f64 = 5.0;
pub const BOSS_GATE_MIN_AVG: f64 = 6.0;
pub const PROMOTION_MIN_AVG: f64 = 6.0;

// Recommendation engine tunables
pub const SEVERE_WEAKNESS_COUNT: u32 = 2;
pub const STREAK_BOSS_PROMPT: u32 = 3;
pub const WARMUP_MAX_STREAK: u32 = 2;
pub const TOP_WEAKNESS_LIMIT: usize = 3;

// Boss cooldown after a failed attempt
pub const BOSS_COOLDOWN_MINUTES: i64 = 30;

// Streak bonus tiers: (streak threshold, bonus percent, label)
pub const STREAK_TIERS: [(u32, u32, &str); 4] = [
    (3, 5, "🔥 Hot Streak!"),
    (5, 10, "🔥🔥 On Fire!"),
    (7, 15, "🔥🔥🔥 Unstoppable!"),
    (10, 20, "💀 Legendary!"),
];

// Query projection limits
pub const LEADERBOARD_SIZE: usize = 10;
pub const DASHBOARD_RECENT_ATTEMPTS: usize = 5;

// Evaluation log compression
pub const COMPRESSED_FEEDBACK_LEN: usize = 120;

// Store file constants
pub const STORE_VERSION_MAGIC: u64 = 0x4755494C44484C31; // "GUILDHL1" in hex
