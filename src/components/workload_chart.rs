//! Per-developer workload bars

use leptos::*;

use super::health_hero::risk_dot;
use crate::DashboardContext;

/// Bar width as a percentage of the largest value in the series
fn bar_percent(value: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (value as f32 / max as f32 * 100.0).min(100.0)
}

#[component]
pub fn WorkloadChart() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    move || {
        let developers = ctx.snapshot.get().developers;
        let max_commits = developers.iter().map(|d| d.commits).max().unwrap_or(0);
        let max_prs = developers.iter().map(|d| d.prs).max().unwrap_or(0);

        view! {
            <div class="card chart-card">
                <h3 class="card-title">"Developer Workload"</h3>
                <div class="legend">
                    <span class="legend-item"><span class="legend-swatch commits"></span>"Commits"</span>
                    <span class="legend-item"><span class="legend-swatch prs"></span>"PRs"</span>
                </div>
                {if developers.is_empty() {
                    view! { <p class="empty-state">"No developer activity"</p> }.into_view()
                } else {
                    developers.into_iter().map(|dev| view! {
                        <div class="workload-row">
                            <div class="workload-name">
                                <span class=risk_dot(dev.burnout_risk)></span>
                                {dev.name}
                                <span class="workload-stories">{dev.stories}" stories"</span>
                            </div>
                            <div class="workload-bars">
                                <div class="bar commits" style=format!("width: {:.0}%", bar_percent(dev.commits, max_commits))>
                                    {dev.commits}
                                </div>
                                <div class="bar prs" style=format!("width: {:.0}%", bar_percent(dev.prs, max_prs))>
                                    {dev.prs}
                                </div>
                            </div>
                        </div>
                    }).collect_view()
                }}
            </div>
        }
    }
}
