//! Sprint health dashboard (Leptos CSR)

mod components;
mod utils;
mod views;

use chrono::Local;
use gloo::timers::future::TimeoutFuture;
use leptos::*;

use sprint_pulse::export::ExportPhase;
use sprint_pulse::models::{ApplyState, Dialog, ModalState, Project, SprintSnapshot, UiTimings};
use sprint_pulse::SnapshotCatalog;

use components::Header;
use views::{Dashboard, LoadingSkeleton};

// ============================================
// Shared dashboard state
// ============================================

#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub catalog: StoredValue<SnapshotCatalog>,
    pub project_id: RwSignal<String>,
    pub project: Memo<Project>,
    pub snapshot: Memo<SprintSnapshot>,
    pub dialog: RwSignal<ModalState<Dialog>>,
    /// Lives here rather than in the dialog so an export survives the dialog closing
    pub export_phase: RwSignal<ExportPhase>,
    pub apply_state: RwSignal<ApplyState>,
    pub timings: UiTimings,
}

impl DashboardContext {
    fn new(catalog: SnapshotCatalog, timings: UiTimings) -> Self {
        let project_id = create_rw_signal(catalog.default_project().id.clone());
        let catalog = store_value(catalog);

        let project = create_memo(move |_| {
            let id = project_id.get();
            catalog.with_value(|c| c.project(&id).unwrap_or_else(|| c.default_project()).clone())
        });
        let snapshot = create_memo(move |_| {
            let id = project_id.get();
            catalog.with_value(|c| c.snapshot(&id).unwrap_or_else(|| c.default_snapshot()).clone())
        });

        Self {
            catalog,
            project_id,
            project,
            snapshot,
            dialog: create_rw_signal(ModalState::Closed),
            export_phase: create_rw_signal(ExportPhase::Idle),
            apply_state: create_rw_signal(ApplyState::Idle),
            timings,
        }
    }

    pub fn open(&self, dialog: Dialog) {
        self.dialog.set(ModalState::Open(dialog));
    }

    pub fn close(&self) {
        self.dialog.set(ModalState::Closed);
    }

    /// Close only if `dialog` is the one showing.
    pub fn close_if(&self, dialog: &Dialog) {
        if self.dialog.get_untracked().item() == Some(dialog) {
            self.close();
        }
    }

    pub fn switch_project(&self, id: String) {
        if self.project_id.get_untracked() != id {
            log::info!("switching to project {}", id);
            self.apply_state.set(ApplyState::Idle);
            self.project_id.set(id);
        }
    }
}

// ============================================
// App
// ============================================

#[component]
fn App() -> impl IntoView {
    let timings = UiTimings::default();
    let catalog = SnapshotCatalog::authored(Local::now().date_naive());
    let ctx = DashboardContext::new(catalog, timings);
    provide_context(ctx);

    // Simulated initial fetch
    let (loading, set_loading) = create_signal(true);
    spawn_local(async move {
        TimeoutFuture::new(timings.initial_load_ms).await;
        set_loading.set(false);
        log::info!("dashboard ready");
    });

    view! {
        <div class="app">
            <Header />
            {move || if loading.get() {
                view! { <LoadingSkeleton /> }.into_view()
            } else {
                view! { <Dashboard /> }.into_view()
            }}
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    utils::log_trace::init();
    mount_to_body(App);
}
