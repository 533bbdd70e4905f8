pub mod state;

use self::state::create_state;
use crate::domain::a001_demande::api::{fetch_pending_demandes, open_demande_file};
use crate::domain::a003_devis::api::fetch_existing_devis;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::toast::{ToastKind, ToastService};
use crate::usecases::u501_create_devis_from_demandes::{CreateDevisModal, CreateDevisVm};
use contracts::domain::a001_demande::{ensure_same_client, Demande, DemandeFile, SelectionError};
use contracts::domain::a003_devis::ExistingDevis;
use leptos::prelude::*;
use thaw::*;

fn format_date(demande: &Demande) -> String {
    demande
        .created_at
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn format_quantity(demande: &Demande) -> String {
    match demande.quantite {
        Some(q) if q.fract() == 0.0 => format!("{}", q as i64),
        Some(q) => format!("{}", q),
        None => "—".to_string(),
    }
}

fn devis_label(devis: &ExistingDevis) -> String {
    if devis.numero.trim().is_empty() {
        "Devis existant".to_string()
    } else {
        format!("Devis {}", devis.numero)
    }
}

/// Pool of demandes awaiting a quote; several demandes of one client are
/// turned into a single devis through the quote modal.
#[component]
#[allow(non_snake_case)]
pub fn DemandeFillList() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");
    let state = create_state();
    let vm = CreateDevisVm::new();

    let lookup_existing_devis = move |ticket: u64, keys: Vec<(String, String)>| {
        for (demande_id, numero) in keys {
            leptos::task::spawn_local(async move {
                match fetch_existing_devis(&demande_id, &numero).await {
                    Ok(existing) => state.update(|s| {
                        s.record_existing_devis(ticket, &demande_id, existing);
                    }),
                    Err(e) => log::warn!("devis lookup for {} failed: {}", numero, e),
                }
            });
        }
    };

    let load = move |ticket: u64| {
        leptos::task::spawn_local(async move {
            let result = fetch_pending_demandes().await;
            let keys = match &result {
                Ok(items) => {
                    log::debug!("demande pool loaded: {} item(s)", items.len());
                    items
                        .iter()
                        .map(|d| (d.id.clone(), d.numero.clone()))
                        .collect::<Vec<_>>()
                }
                Err(e) => {
                    log::error!("demande pool load failed: {}", e);
                    Vec::new()
                }
            };
            let applied = state
                .try_update(|s| s.finish_load(ticket, result))
                .unwrap_or(false);
            if applied {
                lookup_existing_devis(ticket, keys);
            } else {
                log::debug!("stale demande pool answer {} dropped", ticket);
            }
        });
    };

    let fetch = move || {
        if let Some(ticket) = state.try_update(|s| s.begin_load()) {
            load(ticket);
        }
    };

    fetch();

    let loading = move || state.with(|s| s.is_loading);
    let selected_count = move || state.with(|s| s.selected_ids.len());

    let handle_create_devis = move || {
        let selected = state.with_untracked(|s| s.selected_demandes());
        match ensure_same_client(&selected) {
            Ok(_) => vm.open(&selected),
            Err(SelectionError::MixedClients) => {
                toasts.show(SelectionError::MixedClients.to_string(), ToastKind::Warning)
            }
            Err(e) => log::debug!("quote not opened: {}", e),
        }
    };

    let on_created = Callback::new(move |_| {
        toasts.show("Devis créé et envoyé.", ToastKind::Success);
        if let Some(ticket) = state.try_update(|s| s.devis_created()) {
            load(ticket);
        }
    });

    let open_file = move |demande_id: String, file: DemandeFile| {
        leptos::task::spawn_local(async move {
            if let Err(e) = open_demande_file(&demande_id, file).await {
                toasts.show(e.to_string(), ToastKind::Error);
            }
        });
    };

    view! {
        <PageFrame page_id="a001_demande--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("quote")}
                    <h1 class="page__title">"Demandes à chiffrer"</h1>
                    <Badge appearance=BadgeAppearance::Tint>
                        {move || state.with(|s| s.items.len()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                        disabled=Signal::derive(loading)
                    >
                        {icon("refresh")}
                        " Actualiser"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| handle_create_devis()
                        disabled=Signal::derive(move || selected_count() == 0)
                    >
                        {move || format!("Créer un devis ({})", selected_count())}
                    </Button>
                </div>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div style="margin-bottom: 12px;">
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                </div>
            })}

            <Show when=move || loading() && !state.with(|s| s.is_loaded)>
                <div style="padding: 24px; display: flex; justify-content: center;">
                    <Spinner />
                </div>
            </Show>

            <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                <p class="text-muted" style="padding: 12px 0;">"Aucune demande en attente."</p>
            </Show>

            <Show when=move || state.with(|s| !s.items.is_empty())>
                <div class="table-container">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell table__header-cell--checkbox">
                                    <input
                                        type="checkbox"
                                        class="table__checkbox"
                                        prop:checked=move || state.with(|s| s.all_selected())
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            state.update(|s| s.toggle_all(checked));
                                        }
                                    />
                                </th>
                                <th class="table__header-cell">"N°"</th>
                                <th class="table__header-cell">"Client"</th>
                                <th class="table__header-cell">"Date"</th>
                                <th class="table__header-cell text-right">"Quantité"</th>
                                <th class="table__header-cell">"Devis"</th>
                                <th class="table__header-cell">"PDF"</th>
                                <th class="table__header-cell">"Fichiers joints"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|d| d.id.clone()
                                children=move |d| {
                                    let id_checked = d.id.clone();
                                    let id_toggle = d.id.clone();
                                    let id_selected = d.id.clone();
                                    let id_devis = d.id.clone();
                                    let id_pdf = d.id.clone();
                                    let documents = d.viewable_documents();
                                    let pdf_cell = if d.has_demande_pdf {
                                        view! {
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                size=ButtonSize::Small
                                                on_click=move |_| open_file(id_pdf.clone(), DemandeFile::Pdf)
                                            >
                                                "Ouvrir"
                                            </Button>
                                        }
                                        .into_any()
                                    } else {
                                        view! { <span class="text-muted">"—"</span> }.into_any()
                                    };
                                    let documents_cell = if documents.is_empty() {
                                        view! { <span class="text-muted">"—"</span> }.into_any()
                                    } else {
                                        documents
                                            .into_iter()
                                            .map(|(index, filename)| {
                                                let id_document = d.id.clone();
                                                view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        on_click=move |_| {
                                                            open_file(id_document.clone(), DemandeFile::Document(index))
                                                        }
                                                    >
                                                        {filename}
                                                    </Button>
                                                }
                                            })
                                            .collect_view()
                                            .into_any()
                                    };
                                    view! {
                                        <tr
                                            class="table__row"
                                            class:table__row--selected=move || state.with(|s| s.is_selected(&id_selected))
                                        >
                                            <td class="table__cell table__cell--checkbox">
                                                <input
                                                    type="checkbox"
                                                    class="table__checkbox"
                                                    prop:checked=move || state.with(|s| s.is_selected(&id_checked))
                                                    on:change=move |ev| {
                                                        let checked = event_target_checked(&ev);
                                                        state.update(|s| s.toggle(&id_toggle, checked));
                                                    }
                                                />
                                            </td>
                                            <td class="table__cell">{d.numero.clone()}</td>
                                            <td class="table__cell">{d.client_name()}</td>
                                            <td class="table__cell">{format_date(&d)}</td>
                                            <td class="table__cell text-right">{format_quantity(&d)}</td>
                                            <td class="table__cell">
                                                {move || match state.with(|s| s.existing_devis_for(&id_devis).cloned()) {
                                                    Some(devis) => {
                                                        let label = devis_label(&devis);
                                                        view! {
                                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                                                {label}
                                                            </Badge>
                                                            {devis.pdf.map(|pdf| view! {
                                                                " "
                                                                <a href=pdf target="_blank" rel="noopener noreferrer">"PDF"</a>
                                                            })}
                                                        }
                                                        .into_any()
                                                    }
                                                    None => view! { <span class="text-muted">"—"</span> }.into_any(),
                                                }}
                                            </td>
                                            <td class="table__cell">{pdf_cell}</td>
                                            <td class="table__cell">{documents_cell}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>

            <CreateDevisModal vm=vm on_created=on_created />
        </PageFrame>
    }
}
