//! Export dialog

use chrono::Utc;
use gloo::timers::future::TimeoutFuture;
use leptos::*;
use sprint_pulse::export::{self, ExportFormat, ExportPhase};
use sprint_pulse::models::Dialog;

use crate::utils::download::BrowserDownload;
use crate::DashboardContext;

/// Run one export through the state machine.
///
/// Everything after `begin` happens on the dashboard context, so closing the
/// dialog mid-export does not lose the outcome.
fn start_export(ctx: DashboardContext, format: ExportFormat) {
    let Some(next) = ctx.export_phase.get_untracked().begin(format) else {
        return;
    };
    ctx.export_phase.set(next);
    let snapshot = ctx.snapshot.get_untracked();
    let timings = ctx.timings;

    spawn_local(async move {
        TimeoutFuture::new(timings.export_start_ms).await;

        let outcome = export::export(&snapshot, format, Utc::now(), &mut BrowserDownload);
        if let Err(e) = &outcome {
            log::error!("export failed: {}", e);
        }
        ctx.export_phase.update(|phase| *phase = phase.finish(&outcome));

        TimeoutFuture::new(timings.completed_display_ms).await;

        let closes = ctx.export_phase.with_untracked(ExportPhase::closes_dialog_on_settle);
        ctx.export_phase.update(|phase| *phase = phase.settle());
        if closes {
            ctx.close_if(&Dialog::Export);
        }
    });
}

#[component]
fn ExportOption(format: ExportFormat, description: &'static str) -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let phase = ctx.export_phase;

    view! {
        <button
            class="export-option"
            disabled=move || phase.with(ExportPhase::is_busy)
            on:click=move |_| start_export(ctx, format)
        >
            <span class=format!("export-icon {}", format.extension())>{format.extension().to_uppercase()}</span>
            <span class="export-text">
                <span class="export-label">{format.label()}</span>
                <span class="export-description">{description}</span>
            </span>
            <span class="export-status">
                {move || phase.with(|p| {
                    if p.is_exporting(format) {
                        "Exporting..."
                    } else if p.is_completed(format) {
                        "✓ Done"
                    } else {
                        ""
                    }
                })}
            </span>
        </button>
    }
}

#[component]
pub fn ExportModal() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let close = move |_| ctx.close_if(&Dialog::Export);

    view! {
        <div class="modal-backdrop" on:click=close>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Export Sprint Report"</h3>
                    <button class="close-btn" on:click=close>"×"</button>
                </div>
                <p class="modal-subtitle">{move || ctx.snapshot.get().sprint_name}</p>

                <div class="export-options">
                    <ExportOption
                        format=ExportFormat::Tabular
                        description="Multi-sheet report (.xlsx)"
                    />
                    <ExportOption
                        format=ExportFormat::Document
                        description="Formatted report for sharing"
                    />
                </div>

                {move || ctx.export_phase.with(|p| p.error_message().map(|m| m.to_string())).map(|message| view! {
                    <p class="export-error">{message}</p>
                })}
            </div>
        </div>
    }
}
