//! Health score ring and the three risk cards

use leptos::*;
use sprint_pulse::models::{RiskLevel, WorkloadStatus};

use crate::DashboardContext;

/// Circumference of the score ring (r = 52)
const RING_CIRCUMFERENCE: f32 = 326.0;

fn ring_offset(score: u8) -> f32 {
    RING_CIRCUMFERENCE - RING_CIRCUMFERENCE * f32::from(score.min(100)) / 100.0
}

fn workload_class(status: WorkloadStatus) -> &'static str {
    match status {
        WorkloadStatus::Balanced => "badge badge-success",
        WorkloadStatus::Uneven => "badge badge-warning",
        WorkloadStatus::Critical => "badge badge-danger",
    }
}

#[component]
pub fn HealthHero() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    move || {
        let snapshot = ctx.snapshot.get();
        let band = snapshot.health_band();
        let burnout = snapshot.burnout_risk.clone();
        let delivery = snapshot.delivery_risk.clone();
        let workload = snapshot.workload_balance.status;

        view! {
            <div class="health-hero">
                <div class="card score-card">
                    <h3 class="card-label">"Sprint Health Score"</h3>
                    <svg class="score-ring" viewBox="0 0 112 112">
                        <circle class="ring-track" stroke-width="8" fill="transparent" r="52" cx="56" cy="56"></circle>
                        <circle
                            class=format!("ring-value {}", band.color_class())
                            stroke-width="8"
                            stroke-dasharray=RING_CIRCUMFERENCE.to_string()
                            stroke-dashoffset=ring_offset(snapshot.health_score).to_string()
                            stroke-linecap="round"
                            fill="transparent"
                            r="52"
                            cx="56"
                            cy="56"
                        ></circle>
                    </svg>
                    <div class=format!("score-value {}", band.color_class())>{snapshot.health_score}</div>
                    <div class="score-band">{band.label()}</div>
                </div>

                <div class="card metric-card">
                    <h3 class="card-label">"Burnout Risk"</h3>
                    <span class=burnout.level.badge_class()>{burnout.level.as_str()}</span>
                    <p class="metric-trend">{burnout.trend.arrow()}" "{burnout.value}" this week"</p>
                </div>

                <div class="card metric-card">
                    <h3 class="card-label">"Delivery Risk"</h3>
                    <span class=delivery.level.badge_class()>{delivery.level.as_str()}</span>
                    <p class="metric-detail">{delivery.at_risk_stories}" stories at risk"</p>
                </div>

                <div class="card metric-card">
                    <h3 class="card-label">"Workload Balance"</h3>
                    <span class=workload_class(workload)>{workload.to_string()}</span>
                    <p class="metric-detail">
                        {if workload == WorkloadStatus::Balanced { "Work is evenly spread" } else { "Some developers are overloaded" }}
                    </p>
                </div>
            </div>
        }
    }
}

/// Dot color for risk levels in lists
pub fn risk_dot(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "dot dot-green",
        RiskLevel::Medium => "dot dot-yellow",
        RiskLevel::High => "dot dot-red",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_offset() {
        assert_eq!(ring_offset(0), RING_CIRCUMFERENCE);
        assert_eq!(ring_offset(100), 0.0);
        assert!((ring_offset(72) - 91.28).abs() < 0.01);
        assert_eq!(ring_offset(250), 0.0);
    }
}
