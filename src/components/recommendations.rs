//! AI recommendation cards

use leptos::*;
use sprint_pulse::models::Dialog;

use crate::DashboardContext;

#[component]
pub fn RecommendationList() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    move || {
        let recommendations = ctx.snapshot.get().recommendations;

        view! {
            <div class="card recommendations">
                <h3 class="card-title">"AI Recommendations"</h3>
                <div class="rec-list">
                    {recommendations.into_iter().map(|rec| {
                        let dialog = Dialog::Recommendation(rec.id.clone());
                        let id = rec.id.clone();
                        view! {
                            <button class="rec-item" on:click=move |_| ctx.open(dialog.clone())>
                                <div class="rec-head">
                                    <span class="rec-title">{rec.title}</span>
                                    {move || ctx.apply_state.with(|s| s.is_applied(&id)).then(|| view! {
                                        <span class="badge badge-success">"Applied"</span>
                                    })}
                                </div>
                                <p class="rec-description">{rec.description}</p>
                                <span class="rec-impact">{rec.impact}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>
            </div>
        }
    }
}
