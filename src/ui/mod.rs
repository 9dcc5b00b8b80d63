// Terminal UI using Ratatui

pub mod components;
pub mod dashboard;
pub mod events;
pub mod state;

pub use dashboard::Dashboard;
pub use events::run_ui;
pub use state::UiState;
