use std::time::Duration;

/// How long a request may stay un-answered before it is surfaced as a
/// loading indicator.
pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_millis(500);

/// Client construction options.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Delay before a pending request appears in the UI loading list.
    pub grace_window: Duration,
    /// User-agent string merged into every log event's default params.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            grace_window: DEFAULT_GRACE_WINDOW,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a config with the default grace window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grace window.
    #[must_use]
    pub fn with_grace_window(mut self, grace_window: Duration) -> Self {
        self.grace_window = grace_window;
        self
    }

    /// Set the user agent reported on log events.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
