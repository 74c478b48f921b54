pub mod survive;
pub mod plugin;

pub use plugin::{ObjectivePlugin, PlayerDied};
pub use survive::SurvivalTimer;
