//! Story and recommendation detail dialogs

use gloo::timers::future::TimeoutFuture;
use leptos::*;

use crate::DashboardContext;

#[component]
fn DetailFrame(title: String, subtitle: String, children: Children) -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    view! {
        <div class="modal-backdrop" on:click=move |_| ctx.close()>
            <div class="modal modal-wide" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <div>
                        <h3>{title}</h3>
                        <p class="modal-subtitle">{subtitle}</p>
                    </div>
                    <button class="close-btn" on:click=move |_| ctx.close()>"×"</button>
                </div>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn StoryDetail(id: String) -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    let Some(story) = ctx.snapshot.with_untracked(|s| s.story(&id).cloned()) else {
        log::warn!("story {} not in current snapshot", id);
        return view! { <></> }.into_view();
    };

    let analysis = story.ai_analysis_detail.clone().unwrap_or_else(|| story.ai_reason.clone());

    view! {
        <DetailFrame title=story.title.clone() subtitle=format!("{} · {}", story.id, story.assignee)>
            <div class="detail-badges">
                <span class=story.risk_level.badge_class()>{format!("{} Risk", story.risk_level)}</span>
                <span class="status">{story.status.to_string()}</span>
            </div>
            <section class="detail-section">
                <h4>"AI Analysis"</h4>
                <p>{analysis}</p>
            </section>
            {story.impact.clone().map(|impact| view! {
                <section class="detail-section">
                    <h4>"Impact"</h4>
                    <p>{impact}</p>
                </section>
            })}
            {story.suggested_action.clone().map(|action| view! {
                <section class="detail-section suggestion">
                    <h4>"Suggested Action"</h4>
                    <p>{action}</p>
                </section>
            })}
        </DetailFrame>
    }
    .into_view()
}

#[component]
pub fn RecommendationDetail(id: String) -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    let Some(rec) = ctx.snapshot.with_untracked(|s| s.recommendation(&id).cloned()) else {
        log::warn!("recommendation {} not in current snapshot", id);
        return view! { <></> }.into_view();
    };

    let rec_id = store_value(rec.id.clone());
    let apply = move |_| {
        let id = rec_id.get_value();
        let Some(next) = ctx.apply_state.get_untracked().begin(&id) else {
            return;
        };
        ctx.apply_state.set(next);
        log::info!("applying recommendation {}", id);
        let delay = ctx.timings.apply_recommendation_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            ctx.apply_state.update(|s| *s = s.finish());
        });
    };

    let applying = move || ctx.apply_state.with(|s| s.is_applying(&rec_id.get_value()));
    let applied = move || ctx.apply_state.with(|s| s.is_applied(&rec_id.get_value()));

    view! {
        <DetailFrame title=rec.title.clone() subtitle=rec.impact.clone()>
            <p class="detail-description">{rec.description.clone()}</p>
            <section class="detail-section">
                <h4>"Why this helps"</h4>
                <p>{rec.reasoning.clone()}</p>
            </section>
            <section class="detail-section">
                <h4>"Steps"</h4>
                <ol class="step-list">
                    {rec.steps.clone().into_iter().map(|step| view! { <li>{step}</li> }).collect_view()}
                </ol>
            </section>
            <div class="modal-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || !ctx.apply_state.with(|s| s.can_apply(&rec_id.get_value()))
                    on:click=apply
                >
                    {move || if applied() {
                        "✓ Applied"
                    } else if applying() {
                        "Applying..."
                    } else {
                        "Apply Recommendation"
                    }}
                </button>
            </div>
        </DetailFrame>
    }
    .into_view()
}
