//! Plain-text and JSON sprint summaries

use serde::Serialize;
use sprint_pulse::models::{RiskLevel, SprintSnapshot};
use sprint_pulse::Project;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSummary {
    pub project: String,
    pub team: String,
    pub sprint_name: String,
    pub health_score: u8,
    pub health_band: String,
    pub days_remaining: u32,
    pub end_date: String,
    pub high_risk_stories: Vec<String>,
    pub overloaded_developers: Vec<String>,
    pub recommendations: Vec<String>,
}

impl SprintSummary {
    pub fn new(project: &Project, snapshot: &SprintSnapshot) -> Self {
        Self {
            project: project.name.clone(),
            team: project.team.clone(),
            sprint_name: snapshot.sprint_name.clone(),
            health_score: snapshot.health_score,
            health_band: snapshot.health_band().label().to_string(),
            days_remaining: snapshot.days_remaining,
            end_date: snapshot.end_date.clone(),
            high_risk_stories: snapshot
                .stories
                .iter()
                .filter(|s| s.risk_level == RiskLevel::High)
                .map(|s| format!("{} {}", s.id, s.title))
                .collect(),
            overloaded_developers: snapshot
                .developers
                .iter()
                .filter(|d| d.burnout_risk == RiskLevel::High)
                .map(|d| d.name.clone())
                .collect(),
            recommendations: snapshot.recommendations.iter().map(|r| r.title.clone()).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} ({})\n", self.project, self.team));
        output.push_str(&format!("{}\n", self.sprint_name));
        output.push_str(&format!("{}\n\n", "=".repeat(self.sprint_name.chars().count())));

        output.push_str(&format!("Health Score: {}/100 ({})\n", self.health_score, self.health_band));
        output.push_str(&format!("Ends: {} ({} days remaining)\n\n", self.end_date, self.days_remaining));

        push_list(&mut output, "High risk stories", &self.high_risk_stories);
        push_list(&mut output, "Developers at burnout risk", &self.overloaded_developers);
        push_list(&mut output, "Recommendations", &self.recommendations);

        output
    }
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    output.push_str(&format!("{}:\n", title));
    if items.is_empty() {
        output.push_str("  (none)\n");
    }
    for item in items {
        output.push_str(&format!("  - {}\n", item));
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sprint_pulse::SnapshotCatalog;

    fn catalog() -> SnapshotCatalog {
        SnapshotCatalog::authored(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
    }

    #[test]
    fn test_summary_of_default_project() {
        let catalog = catalog();
        let summary = SprintSummary::new(catalog.default_project(), catalog.default_snapshot());

        assert_eq!(summary.health_score, 72);
        assert_eq!(summary.health_band, "Moderate Risk");
        assert!(summary.high_risk_stories.iter().any(|s| s.starts_with("ABC-123")));

        let text = summary.render_text();
        assert!(text.contains("Health Score: 72/100 (Moderate Risk)"));
        assert!(text.contains("Sprint 25.12 - Core Features"));
    }

    #[test]
    fn test_summary_json_field_names() {
        let catalog = catalog();
        let summary = SprintSummary::new(catalog.default_project(), catalog.default_snapshot());
        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(value["healthScore"], 72);
        assert!(value["highRiskStories"].is_array());
    }

    #[test]
    fn test_empty_lists_render_none() {
        let mut output = String::new();
        push_list(&mut output, "Recommendations", &[]);
        assert_eq!(output, "Recommendations:\n  (none)\n\n");
    }
}
