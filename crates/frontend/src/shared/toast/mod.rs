//! Non-blocking notifications
//!
//! ```ignore
//! let toasts = use_context::<ToastService>().expect("ToastService not provided");
//! toasts.show("Devis créé", ToastKind::Success);
//! ```

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a notification stays on screen
pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast--info",
            ToastKind::Success => "toast toast--success",
            ToastKind::Warning => "toast toast--warning",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
}

/// One notification at a time; a new one replaces the current one and restarts the timer
#[derive(Clone, Copy)]
pub struct ToastService {
    current: RwSignal<Option<Toast>>,
    generation: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            generation: StoredValue::new(0),
        }
    }

    pub fn show(&self, text: impl Into<String>, kind: ToastKind) {
        let text = text.into();
        match kind {
            ToastKind::Error => log::error!("{}", text),
            ToastKind::Warning => log::warn!("{}", text),
            _ => log::info!("{}", text),
        }

        self.generation.update_value(|g| *g += 1);
        let ticket = self.generation.get_value();
        self.current.set(Some(Toast { text, kind }));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            // a newer toast owns the slot now
            if this.generation.try_get_value() == Some(ticket) {
                let _ = this.current.try_set(None);
            }
        });
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    pub fn current(&self) -> Option<Toast> {
        self.current.get()
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the current notification; mount once near the app root
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");

    view! {
        {move || toasts.current().map(|toast| view! {
            <div class=toast.kind.class() role="status" on:click=move |_| toasts.dismiss()>
                {toast.text}
            </div>
        })}
    }
}
