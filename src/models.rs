//! Data model for sprint snapshots and dashboard UI state

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::ExportError;

// ============================================
// Enumerations
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Badge class used by the tables and cards
    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "badge badge-success",
            RiskLevel::Medium => "badge badge-warning",
            RiskLevel::High => "badge badge-danger",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadStatus {
    Balanced,
    Uneven,
    Critical,
}

impl fmt::Display for WorkloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkloadStatus::Balanced => "Balanced",
            WorkloadStatus::Uneven => "Uneven",
            WorkloadStatus::Critical => "Critical",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoryStatus::ToDo => "To Do",
            StoryStatus::InProgress => "In Progress",
            StoryStatus::Review => "Review",
            StoryStatus::Done => "Done",
        })
    }
}

// ============================================
// Sprint snapshot
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnoutRisk {
    pub level: RiskLevel,
    pub trend: Trend,
    /// Magnitude of the change, e.g. "15%"
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRisk {
    pub level: RiskLevel,
    pub at_risk_stories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadBalance {
    pub status: WorkloadStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub day: String,
    pub risk_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintStory {
    pub id: String,
    pub title: String,
    pub status: StoryStatus,
    pub risk_level: RiskLevel,
    pub ai_reason: String,
    pub assignee: String,
    #[serde(default)]
    pub ai_analysis_detail: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub suggested_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperWorkload {
    pub name: String,
    pub commits: u32,
    pub prs: u32,
    pub stories: u32,
    pub burnout_risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub reasoning: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSnapshot {
    pub health_score: u8,
    pub sprint_name: String,
    pub days_remaining: u32,
    pub end_date: String,
    pub burnout_risk: BurnoutRisk,
    pub delivery_risk: DeliveryRisk,
    pub workload_balance: WorkloadBalance,
    pub burnout_trend: Vec<TrendPoint>,
    pub stories: Vec<SprintStory>,
    pub developers: Vec<DeveloperWorkload>,
    #[serde(rename = "aiRecommendations")]
    pub recommendations: Vec<Recommendation>,
}

impl SprintSnapshot {
    /// Check the fields the exporter depends on and the uniqueness invariants.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.sprint_name.trim().is_empty() {
            return Err(ExportError::InvalidSnapshot("sprint name is empty".to_string()));
        }
        if self.health_score > 100 {
            return Err(ExportError::InvalidSnapshot(format!(
                "health score {} is outside 0-100",
                self.health_score
            )));
        }
        if let Some(id) = first_duplicate(self.stories.iter().map(|s| s.id.as_str())) {
            return Err(ExportError::InvalidSnapshot(format!("duplicate story id {}", id)));
        }
        if let Some(id) = first_duplicate(self.recommendations.iter().map(|r| r.id.as_str())) {
            return Err(ExportError::InvalidSnapshot(format!("duplicate recommendation id {}", id)));
        }
        if let Some(name) = first_duplicate(self.developers.iter().map(|d| d.name.as_str())) {
            return Err(ExportError::InvalidSnapshot(format!("duplicate developer {}", name)));
        }
        Ok(())
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_score(self.health_score)
    }

    pub fn story(&self, id: &str) -> Option<&SprintStory> {
        self.stories.iter().find(|s| s.id == id)
    }

    pub fn recommendation(&self, id: &str) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.id == id)
    }
}

fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

/// Health score bands shown on the hero card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    ModerateRisk,
    CriticalRisk,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => HealthBand::Healthy,
            60..=79 => HealthBand::ModerateRisk,
            _ => HealthBand::CriticalRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "Healthy",
            HealthBand::ModerateRisk => "Moderate Risk",
            HealthBand::CriticalRisk => "Critical Risk",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "text-green",
            HealthBand::ModerateRisk => "text-yellow",
            HealthBand::CriticalRisk => "text-red",
        }
    }
}

// ============================================
// Projects
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub team: String,
    /// Accent color as a CSS hex string
    pub color: String,
}

// ============================================
// UI state
// ============================================

/// Dialog visibility (`closed | open(item)`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState<T> {
    Closed,
    Open(T),
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl<T> ModalState<T> {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            ModalState::Open(item) => Some(item),
            ModalState::Closed => None,
        }
    }
}

/// Dialogs the dashboard can show, one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Export,
    ConnectProject,
    Story(String),
    Recommendation(String),
}

/// "Apply recommendation" progress for the recommendation dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApplyState {
    #[default]
    Idle,
    Applying(String),
    Applied(String),
}

impl ApplyState {
    /// Begin applying; ignored while another recommendation is in flight.
    pub fn begin(&self, id: &str) -> Option<ApplyState> {
        match self {
            ApplyState::Applying(_) => None,
            _ => Some(ApplyState::Applying(id.to_string())),
        }
    }

    pub fn finish(&self) -> ApplyState {
        match self {
            ApplyState::Applying(id) => ApplyState::Applied(id.clone()),
            other => other.clone(),
        }
    }

    pub fn is_applied(&self, id: &str) -> bool {
        matches!(self, ApplyState::Applied(applied) if applied == id)
    }

    pub fn is_applying(&self, id: &str) -> bool {
        matches!(self, ApplyState::Applying(applying) if applying == id)
    }

    /// Apply is offered only when nothing is in flight and `id` is not already applied.
    pub fn can_apply(&self, id: &str) -> bool {
        !matches!(self, ApplyState::Applying(_)) && !self.is_applied(id)
    }
}

/// One-shot timer durations used by the dashboard (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    pub initial_load_ms: u32,
    pub export_start_ms: u32,
    pub completed_display_ms: u32,
    pub apply_recommendation_ms: u32,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            initial_load_ms: 1500,
            export_start_ms: 1500,
            completed_display_ms: 1500,
            apply_recommendation_ms: 1200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SnapshotCatalog;
    use chrono::NaiveDate;

    fn snapshot() -> SprintSnapshot {
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        SnapshotCatalog::authored(today).default_snapshot().clone()
    }

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::from_score(100), HealthBand::Healthy);
        assert_eq!(HealthBand::from_score(80), HealthBand::Healthy);
        assert_eq!(HealthBand::from_score(72), HealthBand::ModerateRisk);
        assert_eq!(HealthBand::from_score(60), HealthBand::ModerateRisk);
        assert_eq!(HealthBand::from_score(59).label(), "Critical Risk");
    }

    #[test]
    fn test_validate_rejects_blank_sprint_name() {
        let mut snap = snapshot();
        snap.sprint_name = "   ".to_string();
        let err = snap.validate().unwrap_err();
        assert!(matches!(err, ExportError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_validate_rejects_duplicate_story_id() {
        let mut snap = snapshot();
        let dup = snap.stories[0].clone();
        snap.stories.push(dup);
        let err = snap.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate story id ABC-123"));
    }

    #[test]
    fn test_validate_rejects_score_over_100() {
        let mut snap = snapshot();
        snap.health_score = 101;
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_story_status_serde_names() {
        let json = serde_json::to_string(&StoryStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: StoryStatus = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(parsed, StoryStatus::ToDo);
    }

    #[test]
    fn test_snapshot_json_uses_original_field_names() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert!(value.get("sprintName").is_some());
        assert!(value.get("aiRecommendations").is_some());
        assert_eq!(value["burnoutRisk"]["trend"], "up");
    }

    #[test]
    fn test_story_optional_fields_default_to_none() {
        let json = r#"{
            "id": "X-1", "title": "T", "status": "Done", "riskLevel": "Low",
            "aiReason": "r", "assignee": "A"
        }"#;
        let story: SprintStory = serde_json::from_str(json).unwrap();
        assert!(story.impact.is_none());
        assert!(story.suggested_action.is_none());
    }

    #[test]
    fn test_modal_state() {
        let closed: ModalState<Dialog> = ModalState::default();
        assert!(!closed.is_open());
        let open = ModalState::Open(Dialog::Story("ABC-123".to_string()));
        assert_eq!(open.item(), Some(&Dialog::Story("ABC-123".to_string())));
    }

    #[test]
    fn test_apply_state_single_flight() {
        let state = ApplyState::Idle.begin("rec-1").unwrap();
        assert!(state.begin("rec-2").is_none());
        let done = state.finish();
        assert!(done.is_applied("rec-1"));
        assert!(!done.is_applied("rec-2"));
        assert_eq!(done.begin("rec-2"), Some(ApplyState::Applying("rec-2".to_string())));
    }

    #[test]
    fn test_apply_offered_only_when_idle_for_that_recommendation() {
        assert!(ApplyState::Idle.can_apply("rec-1"));

        let applying = ApplyState::Applying("rec-1".to_string());
        assert!(applying.is_applying("rec-1"));
        assert!(!applying.is_applying("rec-2"));
        assert!(!applying.can_apply("rec-1"));
        assert!(!applying.can_apply("rec-2"));

        let applied = applying.finish();
        assert!(!applied.can_apply("rec-1"));
        assert!(applied.can_apply("rec-2"));
    }
}
