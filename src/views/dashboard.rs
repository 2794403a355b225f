//! Main dashboard layout

use leptos::*;
use sprint_pulse::models::{Dialog, ModalState};

use super::{ConnectProjectModal, ExportModal, RecommendationDetail, StoryDetail};
use crate::components::{BurnoutChart, HealthHero, RecommendationList, StoryRiskTable, WorkloadChart};
use crate::utils::log_trace;
use crate::DashboardContext;

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    view! {
        <main class="dashboard">
            <div class="sprint-bar">
                <div>
                    <h2 class="sprint-name">{move || ctx.snapshot.get().sprint_name}</h2>
                    <p class="sprint-meta">
                        {move || ctx.snapshot.with(|s| format!("{} days remaining · Ends {}", s.days_remaining, s.end_date))}
                    </p>
                </div>
                <button class="btn btn-primary" on:click=move |_| ctx.open(Dialog::Export)>
                    "Export Report"
                </button>
            </div>

            <HealthHero />

            <div class="grid grid-2">
                <BurnoutChart />
                <WorkloadChart />
            </div>

            <div class="grid grid-3">
                <StoryRiskTable />
                <RecommendationList />
            </div>

            <footer class="dashboard-footer">
                <button class="link-btn" on:click=move |_| log_trace::download_logs()>
                    "Download diagnostics log"
                </button>
            </footer>

            <DialogHost />
        </main>
    }
}

/// Renders whichever dialog is open
#[component]
fn DialogHost() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    move || match ctx.dialog.get() {
        ModalState::Closed => view! { <></> }.into_view(),
        ModalState::Open(Dialog::Export) => view! { <ExportModal /> }.into_view(),
        ModalState::Open(Dialog::ConnectProject) => view! { <ConnectProjectModal /> }.into_view(),
        ModalState::Open(Dialog::Story(id)) => view! { <StoryDetail id=id /> }.into_view(),
        ModalState::Open(Dialog::Recommendation(id)) => view! { <RecommendationDetail id=id /> }.into_view(),
    }
}

/// Placeholder shown during the initial load delay
#[component]
pub fn LoadingSkeleton() -> impl IntoView {
    view! {
        <main class="dashboard skeleton" aria-busy="true">
            <div class="skeleton-bar wide"></div>
            <div class="health-hero">
                {(0..4).map(|_| view! { <div class="card skeleton-card"></div> }).collect_view()}
            </div>
            <div class="grid grid-2">
                <div class="card skeleton-chart"></div>
                <div class="card skeleton-chart"></div>
            </div>
            <div class="card skeleton-table"></div>
        </main>
    }
}
