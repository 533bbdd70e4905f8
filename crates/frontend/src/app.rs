use crate::domain::a001_demande::ui::list::DemandeFillList;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Notifications are shared by the pool page and the quote modal.
    provide_context(ToastService::new());

    view! {
        <DemandeFillList />
        <ToastHost />
    }
}
