//! UI components

pub mod burnout_chart;
pub mod header;
pub mod health_hero;
pub mod project_switcher;
pub mod recommendations;
pub mod story_risk_table;
pub mod workload_chart;

pub use burnout_chart::BurnoutChart;
pub use header::Header;
pub use health_hero::HealthHero;
pub use project_switcher::ProjectSwitcher;
pub use recommendations::RecommendationList;
pub use story_risk_table::StoryRiskTable;
pub use workload_chart::WorkloadChart;
