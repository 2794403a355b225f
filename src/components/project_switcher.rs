//! Project switcher dropdown

use leptos::*;
use sprint_pulse::models::Dialog;

use crate::DashboardContext;

#[component]
pub fn ProjectSwitcher() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let (open, set_open) = create_signal(false);

    let projects = ctx.catalog.with_value(|c| c.projects().cloned().collect::<Vec<_>>());

    let connect_new = move |_| {
        set_open.set(false);
        ctx.open(Dialog::ConnectProject);
    };

    view! {
        <div class="project-switcher">
            <button class="switcher-btn" on:click=move |_| set_open.update(|o| *o = !*o)>
                <span
                    class="project-dot"
                    style=move || format!("background-color: {}", ctx.project.get().color)
                ></span>
                <span class="switcher-text">
                    <span class="project-name">{move || ctx.project.get().name}</span>
                    <span class="project-team">{move || ctx.project.get().team}</span>
                </span>
                <span class=move || if open.get() { "chevron open" } else { "chevron" }>"▾"</span>
            </button>

            <Show when=move || open.get()>
                // Click outside closes the menu
                <div class="switcher-overlay" on:click=move |_| set_open.set(false)></div>
                <div class="switcher-menu">
                    <div class="menu-title">"Your Projects"</div>
                    {projects.clone().into_iter().map(|project| {
                        let id = project.id.clone();
                        let check_id = project.id.clone();
                        let on_pick = move |_| {
                            ctx.switch_project(id.clone());
                            set_open.set(false);
                        };
                        view! {
                            <button class="menu-item" on:click=on_pick>
                                <span class="project-dot" style=format!("background-color: {}", project.color)></span>
                                <span class="menu-text">
                                    <span class="project-name">{project.name}</span>
                                    <span class="project-team">{project.team}</span>
                                </span>
                                {move || (ctx.project_id.get() == check_id).then(|| view! {
                                    <span class="menu-check">"✓"</span>
                                })}
                            </button>
                        }
                    }).collect_view()}
                    <button class="menu-item connect-new" on:click=connect_new>
                        "+ Connect New Project"
                    </button>
                </div>
            </Show>
        </div>
    }
}
