use std::sync::Mutex;

/// Where the session sends the user when it drops credentials.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Terminal clients have no page to load; they just say where they would go.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, location: &str) {
        tracing::info!(%location, "Returning to landing page");
    }
}

/// Remembers every navigation, in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|visits| visits.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(location.to_string());
        }
    }
}
