//! Notice Banner Component
//!
//! Shows the store's current notice and clears it after the configured delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let store = use_app_store();
    let delay_ms = use_app_context().config.notice_ms;

    Effect::new(move |_| {
        let Some(seq) = store.notice().with(|notice| notice.as_ref().map(|n| n.seq)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            store_dismiss_notice(&store, seq);
        });
    });

    move || {
        store.notice().get().map(|notice| {
            let seq = notice.seq;
            let class = notice.css_class();
            let dismiss = move |_: leptos::ev::MouseEvent| store_dismiss_notice(&store, seq);
            view! {
                <div class=class role="alert">
                    <span>{notice.message}</span>
                    <button class="notice-close" on:click=dismiss>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
