//! Authored project catalog
//!
//! Every score, analysis and recommendation here is literal data. Dates and
//! trend labels are computed relative to the `today` passed in.

use chrono::{Duration, NaiveDate};

use crate::models::{
    BurnoutRisk, DeliveryRisk, DeveloperWorkload, Project, Recommendation, RiskLevel,
    SprintSnapshot, SprintStory, StoryStatus, Trend, TrendPoint, WorkloadBalance, WorkloadStatus,
};

/// Read-only set of projects and their sprint snapshots (1:1)
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    entries: Vec<(Project, SprintSnapshot)>,
}

impl SnapshotCatalog {
    /// Build the catalog relative to `today`.
    pub fn authored(today: NaiveDate) -> Self {
        let entries = vec![
            (
                project("core-platform", "Core Platform", "Platform Team", "#6366f1"),
                core_platform(today),
            ),
            (
                project("mobile-app", "Mobile App", "Mobile Squad", "#10b981"),
                mobile_app(today),
            ),
            (
                project("data-pipeline", "Data Pipeline", "Data Engineering", "#f59e0b"),
                data_pipeline(today),
            ),
        ];
        Self { entries }
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.entries.iter().map(|(p, _)| p).find(|p| p.id == id)
    }

    pub fn snapshot(&self, project_id: &str) -> Option<&SprintSnapshot> {
        self.entries
            .iter()
            .find(|(p, _)| p.id == project_id)
            .map(|(_, s)| s)
    }

    pub fn default_project(&self) -> &Project {
        &self.entries[0].0
    }

    pub fn default_snapshot(&self) -> &SprintSnapshot {
        &self.entries[0].1
    }
}

fn project(id: &str, name: &str, team: &str, color: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        team: team.to_string(),
        color: color.to_string(),
    }
}

// ============================================
// Date helpers
// ============================================

/// "Sprint YY.MM - {focus}"
pub fn sprint_name(today: NaiveDate, focus: &str) -> String {
    format!("Sprint {} - {}", today.format("%y.%m"), focus)
}

/// US short date, e.g. "Dec 5, 2025"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Seven daily points ending at "Today"
fn trend(today: NaiveDate, scores: [u8; 7]) -> Vec<TrendPoint> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            let days_ago = 6 - i as i64;
            let day = match days_ago {
                0 => "Today".to_string(),
                1 => "Yesterday".to_string(),
                n => (today - Duration::days(n)).format("%a").to_string(),
            };
            TrendPoint { day, risk_score: score }
        })
        .collect()
}

fn story(
    id: &str,
    title: &str,
    status: StoryStatus,
    risk_level: RiskLevel,
    ai_reason: &str,
    assignee: &str,
    detail: [&str; 3],
) -> SprintStory {
    let [analysis, impact, action] = detail;
    SprintStory {
        id: id.to_string(),
        title: title.to_string(),
        status,
        risk_level,
        ai_reason: ai_reason.to_string(),
        assignee: assignee.to_string(),
        ai_analysis_detail: Some(analysis.to_string()),
        impact: Some(impact.to_string()),
        suggested_action: Some(action.to_string()),
    }
}

fn developer(name: &str, commits: u32, prs: u32, stories: u32, burnout_risk: RiskLevel) -> DeveloperWorkload {
    DeveloperWorkload {
        name: name.to_string(),
        commits,
        prs,
        stories,
        burnout_risk,
    }
}

fn recommendation(id: &str, title: &str, text: [&str; 3], steps: &[&str]) -> Recommendation {
    let [description, impact, reasoning] = text;
    Recommendation {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        impact: impact.to_string(),
        reasoning: reasoning.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

// ============================================
// Snapshots
// ============================================

fn core_platform(today: NaiveDate) -> SprintSnapshot {
    SprintSnapshot {
        health_score: 72,
        sprint_name: sprint_name(today, "Core Features"),
        days_remaining: 4,
        end_date: display_date(today + Duration::days(4)),
        burnout_risk: BurnoutRisk {
            level: RiskLevel::Medium,
            trend: Trend::Up,
            value: "15%".to_string(),
        },
        delivery_risk: DeliveryRisk {
            level: RiskLevel::High,
            at_risk_stories: 3,
        },
        workload_balance: WorkloadBalance {
            status: WorkloadStatus::Uneven,
        },
        burnout_trend: trend(today, [20, 25, 30, 45, 55, 68, 75]),
        stories: vec![
            story(
                "ABC-123",
                "User Authentication Flow",
                StoryStatus::InProgress,
                RiskLevel::High,
                "High churn in commits (12 files changed 5 times)",
                "Sarah J.",
                [
                    "The authentication module has seen 12 files changed 5 times in the last 24 hours, indicating potential architectural uncertainty or regression loops. This pattern often precedes integration failures.",
                    "High risk of breaking login functionality for 100% of users.",
                    "Conduct an immediate code review with a senior architect to stabilize the interface.",
                ],
            ),
            story(
                "ABC-129",
                "Payment Gateway Integration",
                StoryStatus::InProgress,
                RiskLevel::High,
                "Blocked for 4 days on external dependency",
                "Mike T.",
                [
                    "Dependency on the \"Stripe API Wrapper\" v2.1 has been pending for 4 days. No alternative path has been identified in the code.",
                    "Delays payment processing feature, a core deliverable for this sprint.",
                    "Escalate to the platform team or mock the dependency to proceed with UI development.",
                ],
            ),
            story(
                "ABC-134",
                "Dashboard Analytics",
                StoryStatus::Review,
                RiskLevel::Medium,
                "PR open for 48h with no reviews",
                "David L.",
                [
                    "Pull Request #402 has been open for 48 hours without any reviewer activity. The code complexity is low, suggesting it might have been overlooked.",
                    "Minor delay in merging, but could stack up with other pending PRs.",
                    "Nudge the team in the daily standup or assign a specific reviewer.",
                ],
            ),
            story(
                "ABC-142",
                "Profile Settings",
                StoryStatus::Done,
                RiskLevel::Low,
                "Completed ahead of schedule",
                "Emily R.",
                [
                    "Task completed 2 days ahead of the estimated timeline with 100% test coverage.",
                    "Positive impact on sprint velocity.",
                    "No action needed. Consider assigning a stretch goal.",
                ],
            ),
            story(
                "ABC-145",
                "Email Notifications",
                StoryStatus::ToDo,
                RiskLevel::Medium,
                "Last-minute scope increase detected",
                "Sarah J.",
                [
                    "3 new sub-tasks were added to this story in the last 6 hours, increasing the estimated effort by 40%.",
                    "Risk of spillover if not re-prioritized.",
                    "Review the new requirements with the Product Owner to confirm necessity for this sprint.",
                ],
            ),
        ],
        developers: vec![
            developer("Sarah J.", 45, 8, 3, RiskLevel::High),
            developer("Mike T.", 32, 5, 2, RiskLevel::Medium),
            developer("David L.", 12, 2, 1, RiskLevel::Low),
            developer("Emily R.", 15, 3, 1, RiskLevel::Low),
        ],
        recommendations: vec![
            recommendation(
                "rec-1",
                "Reassign 'Email Notifications'",
                [
                    "Reassign 'Email Notifications' (ABC-145) from Sarah J. to David L. to balance workload.",
                    "Reduces Sarah J.'s load by 15% and utilizes David L.'s available capacity.",
                    "Sarah J. has 3 active stories and high burnout risk. David L. has completed his sprint goals and has bandwidth.",
                ],
                &[
                    "Update assignee field in Jira for ABC-145",
                    "Notify Sarah J. and David L. via Slack",
                    "Schedule brief context transfer meeting",
                ],
            ),
            recommendation(
                "rec-2",
                "De-scope 'Payment Gateway'",
                [
                    "Consider de-scoping 'Payment Gateway' (ABC-129) or swarming to unblock.",
                    "Increases probability of delivering core sprint goals from 65% to 92%.",
                    "External dependency is blocked with no ETA. Continuing to wait puts the entire sprint release at risk.",
                ],
                &[
                    "Move ABC-129 to Backlog",
                    "Flag for discussion in next Sprint Planning",
                    "Notify stakeholders of scope change",
                ],
            ),
            recommendation(
                "rec-3",
                "Cooldown for Sarah J.",
                [
                    "Encourage cooldown time for Sarah J. due to sustained late-night activity.",
                    "Reduces immediate burnout risk and improves long-term retention.",
                    "Detected commits between 10 PM and 2 AM for 3 consecutive days.",
                ],
                &[
                    "Suggest taking tomorrow morning off",
                    "Review current deadlines to remove immediate pressure",
                    "Check in 1:1 regarding workload sustainability",
                ],
            ),
        ],
    }
}

fn mobile_app(today: NaiveDate) -> SprintSnapshot {
    SprintSnapshot {
        health_score: 86,
        sprint_name: sprint_name(today, "Mobile Polish"),
        days_remaining: 6,
        end_date: display_date(today + Duration::days(6)),
        burnout_risk: BurnoutRisk {
            level: RiskLevel::Low,
            trend: Trend::Down,
            value: "5%".to_string(),
        },
        delivery_risk: DeliveryRisk {
            level: RiskLevel::Low,
            at_risk_stories: 1,
        },
        workload_balance: WorkloadBalance {
            status: WorkloadStatus::Balanced,
        },
        burnout_trend: trend(today, [30, 28, 26, 22, 20, 18, 15]),
        stories: vec![
            story(
                "MOB-311",
                "Offline Sync for Drafts",
                StoryStatus::InProgress,
                RiskLevel::Medium,
                "Conflict-resolution tests flaky on CI",
                "Priya K.",
                [
                    "The draft sync suite failed 4 of the last 10 CI runs on the same two conflict-resolution cases. Failures correlate with device clock skew in the emulator image.",
                    "Drafts may silently overwrite each other when two devices edit offline.",
                    "Pin the emulator clock in CI and add a deterministic merge test before widening the rollout.",
                ],
            ),
            story(
                "MOB-318",
                "Dark Mode Audit",
                StoryStatus::Review,
                RiskLevel::Low,
                "Reviewed by two teammates within 6h",
                "Tom W.",
                [
                    "All 42 screens were checked against the contrast checklist. Two minor fixes were requested and already pushed.",
                    "Low; cosmetic issues only.",
                    "Merge after the final approval.",
                ],
            ),
            story(
                "MOB-322",
                "Push Notification Settings",
                StoryStatus::Done,
                RiskLevel::Low,
                "Shipped to beta testers",
                "Lena F.",
                [
                    "Feature shipped to the beta channel with no crash reports after 48 hours.",
                    "Positive; unblocks the marketing opt-in campaign.",
                    "No action needed.",
                ],
            ),
        ],
        developers: vec![
            developer("Priya K.", 28, 4, 1, RiskLevel::Medium),
            developer("Tom W.", 19, 3, 1, RiskLevel::Low),
            developer("Lena F.", 22, 4, 1, RiskLevel::Low),
        ],
        recommendations: vec![recommendation(
            "rec-1",
            "Stabilize sync tests",
            [
                "Pair Priya K. with Tom W. for a half-day on the flaky offline-sync tests (MOB-311).",
                "Removes the only medium-risk item before the sprint demo.",
                "Tom W. finished his review work early and has prior experience with the sync engine.",
            ],
            &[
                "Book a pairing slot for tomorrow morning",
                "Pin the emulator clock in the CI image",
                "Re-run the suite 20 times to confirm stability",
            ],
        )],
    }
}

fn data_pipeline(today: NaiveDate) -> SprintSnapshot {
    SprintSnapshot {
        health_score: 54,
        sprint_name: sprint_name(today, "Ingestion Rewrite"),
        days_remaining: 2,
        end_date: display_date(today + Duration::days(2)),
        burnout_risk: BurnoutRisk {
            level: RiskLevel::High,
            trend: Trend::Up,
            value: "22%".to_string(),
        },
        delivery_risk: DeliveryRisk {
            level: RiskLevel::High,
            at_risk_stories: 2,
        },
        workload_balance: WorkloadBalance {
            status: WorkloadStatus::Critical,
        },
        burnout_trend: trend(today, [40, 44, 51, 58, 63, 70, 82]),
        stories: vec![
            story(
                "DP-77",
                "Backfill Historical Events",
                StoryStatus::InProgress,
                RiskLevel::High,
                "Job runtime grew 3x after schema change",
                "Omar S.",
                [
                    "The nightly backfill now takes 9 hours instead of 3 since the partition key changed. At this rate it will not finish before the sprint ends.",
                    "Dashboards built on historical events stay stale for another sprint.",
                    "Split the backfill by month and run the partitions in parallel.",
                ],
            ),
            story(
                "DP-81",
                "Schema Registry Migration",
                StoryStatus::ToDo,
                RiskLevel::High,
                "Not started with 2 days left",
                "Omar S.",
                [
                    "The story has no commits and depends on DP-77 finishing first.",
                    "Producers stay on the deprecated registry.",
                    "Move to next sprint and communicate the slip to downstream teams.",
                ],
            ),
            story(
                "DP-84",
                "Alerting on Lag",
                StoryStatus::Done,
                RiskLevel::Low,
                "Alert rules deployed",
                "Ines M.",
                [
                    "Consumer-lag alerts are live with runbooks attached.",
                    "Positive; on-call now sees ingestion delays within 5 minutes.",
                    "No action needed.",
                ],
            ),
        ],
        developers: vec![
            developer("Omar S.", 51, 6, 2, RiskLevel::High),
            developer("Ines M.", 17, 3, 1, RiskLevel::Low),
        ],
        recommendations: vec![
            recommendation(
                "rec-1",
                "Defer 'Schema Registry Migration'",
                [
                    "Move DP-81 to the next sprint so Omar S. can focus on the backfill.",
                    "Raises the chance of finishing DP-77 on time and halves Omar S.'s open work.",
                    "DP-81 is blocked by DP-77 and has not started; keeping it only adds pressure.",
                ],
                &[
                    "Move DP-81 to Backlog",
                    "Post the change in the data-platform channel",
                ],
            ),
            recommendation(
                "rec-2",
                "Share the backfill",
                [
                    "Have Ines M. take over the parallel partition runner for DP-77.",
                    "Spreads the load across the team and reduces burnout risk.",
                    "Ines M. finished DP-84 and has free capacity for the last two days.",
                ],
                &[
                    "Hand over the partition runner branch",
                    "Agree on the month split in a 15-minute sync",
                    "Check progress at the next standup",
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_sprint_name_uses_year_and_month() {
        assert_eq!(sprint_name(today(), "Core Features"), "Sprint 25.12 - Core Features");
        let jan = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert_eq!(sprint_name(jan, "X"), "Sprint 26.01 - X");
    }

    #[test]
    fn test_end_date_is_four_days_out() {
        let catalog = SnapshotCatalog::authored(today());
        assert_eq!(catalog.default_snapshot().end_date, "Dec 5, 2025");
    }

    #[test]
    fn test_trend_ends_today() {
        let catalog = SnapshotCatalog::authored(today());
        let trend = &catalog.default_snapshot().burnout_trend;
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[5].day, "Yesterday");
        assert_eq!(trend[6].day, "Today");
        // 2025-11-25 was a Tuesday
        assert_eq!(trend[0].day, "Tue");
    }

    #[test]
    fn test_lookup_by_project_id() {
        let catalog = SnapshotCatalog::authored(today());
        assert_eq!(catalog.projects().count(), 3);
        assert_eq!(catalog.default_project().id, "core-platform");
        let mobile = catalog.snapshot("mobile-app").unwrap();
        assert_eq!(mobile.health_score, 86);
        assert!(catalog.snapshot("missing").is_none());
        assert_eq!(catalog.project("data-pipeline").unwrap().team, "Data Engineering");
    }

    #[test]
    fn test_authored_snapshots_validate() {
        let catalog = SnapshotCatalog::authored(today());
        for project in catalog.projects() {
            let snapshot = catalog.snapshot(&project.id).unwrap();
            assert!(snapshot.validate().is_ok(), "{} failed validation", project.id);
        }
    }
}
