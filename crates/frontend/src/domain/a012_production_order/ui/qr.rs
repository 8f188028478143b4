use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::services::use_services;
use client::api::decode;
use client::ApiError;
use contracts::domain::a012_production_order::aggregate::{
    ProductionOrder, QrCode, GENERATE_QR_ACTION,
};
use contracts::domain::common::{RecordId, Resource};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, ButtonSize};

#[derive(Clone, Debug, PartialEq)]
enum QrState {
    Closed,
    Loading,
    Ready(String),
    Failed(String),
}

pub fn qr_action(id: RecordId) -> AnyView {
    view! { <QrCodeButton id=id /> }.into_any()
}

/// Row button that asks the backend for the order's QR and shows it.
#[component]
fn QrCodeButton(id: RecordId) -> impl IntoView {
    let api = StoredValue::new(use_services().api);
    let state = RwSignal::new(QrState::Closed);

    let generate = move |_: leptos::ev::MouseEvent| {
        state.set(QrState::Loading);
        let api = api.get_value();
        spawn_local(async move {
            let result = api
                .action(ProductionOrder::endpoint(), id, GENERATE_QR_ACTION, serde_json::json!({}))
                .await
                .and_then(decode::<QrCode>);
            let next = match result {
                Ok(qr) => QrState::Ready(qr.qr_code_data),
                Err(e) => {
                    log::error!("QR generation failed for order {}: {}", id, e);
                    QrState::Failed(qr_error(&e))
                }
            };
            state.try_set(next);
        });
    };

    let close = Callback::new(move |_| state.set(QrState::Closed));

    view! {
        <Button
            size=ButtonSize::Small
            appearance=ButtonAppearance::Subtle
            disabled=move || state.get() == QrState::Loading
            on_click=generate
        >
            {icon("qr")}
        </Button>
        {move || {
            let body = match state.get() {
                QrState::Closed | QrState::Loading => return None,
                QrState::Ready(data) if data.is_empty() => {
                    view! { <p>"No hay datos de QR disponibles."</p> }.into_any()
                }
                QrState::Ready(data) => view! {
                    <img
                        class="qr-code"
                        src=format!("data:image/png;base64,{}", data)
                        alt="Código QR"
                        style="width: 100%; height: auto;"
                    />
                }
                .into_any(),
                QrState::Failed(message) => {
                    view! { <div class="error-message">{message}</div> }.into_any()
                }
            };
            Some(view! {
                <Modal title="Código QR de Orden de Producción" on_close=close>
                    {body}
                </Modal>
            })
        }}
    }
}

fn qr_error(e: &ApiError) -> String {
    format!("Error al generar el código QR: {}", e.user_message())
}
