pub mod dashboard;
pub mod history;
pub mod settings;

pub use dashboard::DashboardScreen;
pub use history::HistoryScreen;
pub use settings::{SettingsField, SettingsScreen};
