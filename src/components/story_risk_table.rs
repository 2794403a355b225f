//! Sprint stories with their AI risk assessment

use leptos::*;
use sprint_pulse::models::{Dialog, StoryStatus};

use crate::DashboardContext;

fn status_class(status: StoryStatus) -> &'static str {
    match status {
        StoryStatus::ToDo => "status status-todo",
        StoryStatus::InProgress => "status status-progress",
        StoryStatus::Review => "status status-review",
        StoryStatus::Done => "status status-done",
    }
}

#[component]
pub fn StoryRiskTable() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    move || {
        let stories = ctx.snapshot.get().stories;
        let at_risk = ctx.snapshot.with(|s| s.delivery_risk.at_risk_stories);

        view! {
            <div class="card table-card">
                <div class="card-header">
                    <h3 class="card-title">"Story Risk Analysis"</h3>
                    <span class="card-subtitle">{at_risk}" at risk"</span>
                </div>
                <table class="story-table">
                    <thead>
                        <tr>
                            <th>"Story"</th>
                            <th>"Status"</th>
                            <th>"Risk"</th>
                            <th>"AI Reason"</th>
                            <th>"Assignee"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {stories.into_iter().map(|story| {
                            let dialog = Dialog::Story(story.id.clone());
                            view! {
                                <tr class="story-row" on:click=move |_| ctx.open(dialog.clone())>
                                    <td>
                                        <div class="story-id">{story.id}</div>
                                        <div class="story-title">{story.title}</div>
                                    </td>
                                    <td><span class=status_class(story.status)>{story.status.to_string()}</span></td>
                                    <td><span class=story.risk_level.badge_class()>{story.risk_level.as_str()}</span></td>
                                    <td class="story-reason">{story.ai_reason}</td>
                                    <td>{story.assignee}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
    }
}
