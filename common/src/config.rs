use std::time::Duration;

/// Default time to wait for a single echo reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

pub struct Config {
    /// How long a single echo may wait for its reply.
    pub timeout: Duration,
    /// Approves the large-target confirmation without asking.
    pub assume_yes: bool,
    /// `1` hides the banner and headers, `2` also hides per-host lines.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            assume_yes: false,
            quiet: 0,
            no_banner: false,
        }
    }
}
