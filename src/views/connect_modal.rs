//! "Connect New Project" dialog. The integrations are not wired up yet.

use leptos::*;
use sprint_pulse::models::Dialog;

use crate::DashboardContext;

const INTEGRATIONS: [(&str, &str); 3] = [
    ("Jira", "Import sprints, stories and assignees"),
    ("GitHub", "Commits, pull requests and reviews"),
    ("Azure DevOps", "Boards and repositories"),
];

#[component]
pub fn ConnectProjectModal() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let close = move |_| ctx.close_if(&Dialog::ConnectProject);

    view! {
        <div class="modal-backdrop" on:click=close>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Connect New Project"</h3>
                    <button class="close-btn" on:click=close>"×"</button>
                </div>
                <p class="modal-subtitle">"Choose a source to analyze"</p>
                <div class="integration-list">
                    {INTEGRATIONS.into_iter().map(|(name, blurb)| view! {
                        <button
                            class="integration-btn"
                            on:click=move |_| log::info!("connect {} requested", name)
                        >
                            <span class="integration-name">{name}</span>
                            <span class="integration-blurb">{blurb}</span>
                        </button>
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}
