use leptos::ev;
use leptos::prelude::*;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

fn is_close_key(key: &str) -> bool {
    key == "Escape"
}

/// Runs `on_close` once the current event dispatch is over
fn close_next_tick(on_close: Callback<()>) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        on_close.run(());
    });
}

/// Modal surface with a title bar and a body.
///
/// Closes on Escape and on a click that both starts and ends on the overlay,
/// so selecting text inside the modal and releasing outside keeps it open.
#[component]
pub fn ModalFrame(
    #[prop(into)]
    title: String,
    /// Line under the title (client name, context)
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    on_close: Callback<()>,
    /// Extra style for the modal surface (`div.modal`), e.g. a max width
    #[prop(optional, into)]
    modal_style: Option<String>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
            if is_close_key(&keyboard_event.key()) {
                // closing unmounts this frame and drops the listener we are running in
                close_next_tick(on_close);
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    }
    // keep the listener alive only as long as the modal is mounted
    let keydown = StoredValue::new_local(Some(keydown));
    on_cleanup(move || {
        if let Some(closure) = keydown.try_update_value(|c| c.take()).flatten() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    });

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // the overlay must not be removed during its own click dispatch
            close_next_tick(on_close);
        }
    };

    let modal_style = format!(
        "position: relative; {}",
        modal_style.unwrap_or_default()
    );

    view! {
        <div
            class="modal-overlay"
            style="z-index: 1000;"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class="modal" style=modal_style on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <div>
                        <h2 class="modal-title">{title}</h2>
                        {move || subtitle.get().map(|s| view! {
                            <p class="modal-subtitle">{s}</p>
                        })}
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_escape_closes() {
        assert!(is_close_key("Escape"));
        assert!(!is_close_key("Enter"));
        assert!(!is_close_key("e"));
        assert!(!is_close_key(""));
    }
}
