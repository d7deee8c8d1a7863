mod analysis;
mod calculator;
mod dashboard;
mod history;
mod regional;
mod settings;

pub use analysis::AnalysisPage;
pub use calculator::CalculatorPage;
pub use dashboard::DashboardPage;
pub use history::HistoryPage;
pub use regional::RegionalPage;
pub use settings::SettingsPage;
