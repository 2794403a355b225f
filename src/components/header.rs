//! Top bar: product title, connected sources and the project switcher

use leptos::*;

use super::ProjectSwitcher;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="brand">
                <div class="brand-icon">"⚡"</div>
                <div>
                    <h1>"AI Sprint Health Tracker"</h1>
                    <p class="tagline">"Real-time insights & delivery risk analysis"</p>
                </div>
            </div>

            <div class="header-right">
                <ProjectSwitcher />
                <div class="sources">
                    <span class="sources-dot"></span>
                    <span class="sources-label">"Connected Sources:"</span>
                    <span class="source-chip">"Jira"</span>
                    <span class="source-chip">"Git"</span>
                </div>
            </div>
        </header>
    }
}
