use leptos::ev::KeyboardEvent;
use leptos::*;

#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] cancel_label: MaybeSignal<String>,
    #[prop(optional, into)] confirm_disabled: MaybeSignal<bool>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let confirm_button_class = if destructive {
        "btn btn-danger"
    } else {
        "btn btn-primary"
    };

    let confirm_label_text = Signal::derive(move || {
        let text = confirm_label.get();
        if text.trim().is_empty() {
            "Да".to_string()
        } else {
            text
        }
    });
    let cancel_label_text = Signal::derive(move || {
        let text = cancel_label.get();
        if text.trim().is_empty() {
            "Отмена".to_string()
        } else {
            text
        }
    });
    let title_text = Signal::derive(move || title.get());
    let message_text = Signal::derive(move || message.get());

    let cancel_on_backdrop = on_cancel;
    let cancel_on_header_button = on_cancel;
    let cancel_on_esc = on_cancel;
    let cancel_on_footer_button = on_cancel;
    let confirm_on_footer_button = on_confirm;

    view! {
        <Show when=move || is_open.get()>
            <div
                class="modal d-block"
                tabindex="-1"
                role="dialog"
                aria-modal="true"
                on:keydown=move |ev: KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        cancel_on_esc.call(());
                    }
                }
            >
                <div
                    class="modal-backdrop fade show"
                    on:click=move |_| cancel_on_backdrop.call(())
                ></div>
                <div class="modal-dialog modal-dialog-centered">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{move || title_text.get()}</h5>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Закрыть"
                                on:click=move |_| cancel_on_header_button.call(())
                            ></button>
                        </div>
                        <div class="modal-body">
                            <p>{move || message_text.get()}</p>
                        </div>
                        <div class="modal-footer">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                on:click=move |_| cancel_on_footer_button.call(())
                            >
                                {move || cancel_label_text.get()}
                            </button>
                            <button
                                type="button"
                                class=confirm_button_class
                                disabled=move || confirm_disabled.get()
                                on:click=move |_| confirm_on_footer_button.call(())
                            >
                                {move || confirm_label_text.get()}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn confirm_dialog_renders_with_default_labels() {
        let html = render_to_string(move || {
            let is_open = Signal::derive(|| true);
            view! {
                <ConfirmDialog
                    is_open=is_open
                    title="Подтверждение"
                    message="Удалить объявление?"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    destructive=true
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Удалить объявление?"));
        assert!(html.contains("Да"));
        assert!(html.contains("Отмена"));
        assert!(html.contains("btn-danger"));
    }

    #[test]
    fn confirm_dialog_is_hidden_when_closed() {
        let html = render_to_string(move || {
            let is_open = Signal::derive(|| false);
            view! {
                <ConfirmDialog
                    is_open=is_open
                    title="Подтверждение"
                    message="Удалить объявление?"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("Удалить объявление?"));
    }
}
