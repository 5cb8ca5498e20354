/// Search depth used by the computer opponent when nothing else is configured.
pub const DEFAULT_DEPTH: u32 = 3;
/// Initial lower bound of the alpha-beta window.
pub const DEFAULT_ALPHA: i32 = -100_000_000;
/// Initial upper bound of the alpha-beta window.
pub const DEFAULT_BETA: i32 = 100_000_000;

/// Fixed-depth search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root.
    pub depth: u32,
    pub alpha: i32,
    pub beta: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Parameters of a computer-versus-computer game driven by the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub search: SearchConfig,
    /// The game is stopped unfinished after this many plies.
    pub max_plies: usize,
    /// Number of opening plies picked at random instead of searched.
    pub random_plies: usize,
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            max_plies: 200,
            random_plies: 0,
            seed: 42,
        }
    }
}
