use super::view_model::CreateDevisVm;
use crate::shared::components::table::{format_amount, TableCellAmount};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_create_devis_from_demandes::CreateDevisFromDemandes;
use leptos::prelude::*;
use thaw::*;

/// Quote editor for a batch of demandes of one client.
///
/// Rendered only while a session is open; `on_created` runs after the
/// backend accepted the batch.
#[component]
pub fn CreateDevisModal(vm: CreateDevisVm, on_created: Callback<()>) -> impl IntoView {
    let on_close = Callback::new(move |_| vm.close());

    view! {
        <Show when=move || vm.is_open.get()>
            <ModalFrame
                title=CreateDevisFromDemandes::display_name()
                subtitle=Signal::derive(move || Some(format!("Client : {}", vm.client_name.get())))
                on_close=on_close
                modal_style="max-width: 1100px; width: 95vw;".to_string()
            >
                <p class="text-muted" style="margin: 0 0 12px;">
                    {CreateDevisFromDemandes::description()}
                </p>
                <QuoteLinesTable vm=vm />
                <QuoteTotals vm=vm />

                {move || vm.error.get().map(|msg| view! {
                    <div style="margin-top: 12px;">
                        <MessageBar intent=MessageBarIntent::Error>{msg}</MessageBar>
                    </div>
                })}

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.close()
                    >
                        "Annuler"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit(on_created)
                        disabled=vm.is_submit_disabled()
                    >
                        {icon("send")}
                        {move || if vm.is_submitting().get() { " Création…" } else { " Créer & envoyer" }}
                    </Button>
                </div>
            </ModalFrame>
        </Show>
    }
}

#[component]
fn QuoteLinesTable(vm: CreateDevisVm) -> impl IntoView {
    let line_ids = move || {
        vm.lines
            .with(|ls| ls.iter().map(|l| l.demande_id.clone()).collect::<Vec<_>>())
    };

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=false min_width=110.0>"DDV"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=260.0>"Article"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=90.0 class="text-right">"PU HT"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=80.0>"Qté"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=80.0>"Remise %"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=80.0>"TVA %"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=110.0 class="text-right">"Total HT"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=90.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=line_ids
                        key=|id| id.clone()
                        children=move |id| view! { <LineRow vm=vm demande_id=id /> }
                    />
                </TableBody>
            </Table>
        </div>
        <Show when=move || vm.lines.with(|ls| ls.is_empty())>
            <p class="text-muted" style="padding: 12px 0;">
                "Aucune ligne. Ferme la fenêtre et sélectionne des demandes."
            </p>
        </Show>
    }
}

#[component]
fn LineRow(vm: CreateDevisVm, demande_id: String) -> impl IntoView {
    let line = {
        let id = demande_id.clone();
        Memo::new(move |_| vm.lines.with(|ls| ls.get(&id).cloned()))
    };
    let amounts = vm.line_amounts(demande_id.clone());
    let unpriced = vm.is_unpriced(demande_id.clone());
    let id = StoredValue::new(demande_id);

    let request_number = move || {
        line.with(|l| l.as_ref().map(|l| l.request_number.clone()).unwrap_or_default())
    };
    let selected_article =
        move || line.with(|l| l.as_ref().map(|l| l.article_id.clone()).unwrap_or_default());
    let quantity = move || line.with(|l| l.as_ref().map(|l| l.quantity).unwrap_or(1).to_string());
    let discount = move || {
        line.with(|l| l.as_ref().map(|l| l.discount_percent).unwrap_or_default().to_string())
    };
    let vat =
        move || line.with(|l| l.as_ref().map(|l| l.vat_percent).unwrap_or_default().to_string());

    let article_options = move || {
        vm.catalog.with(|cat| {
            cat.articles()
                .iter()
                .map(|a| {
                    let value = a.id.clone();
                    let option_id = a.id.clone();
                    view! {
                        <option
                            value=value
                            prop:selected=move || selected_article() == option_id
                        >
                            {a.label()}
                        </option>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>{request_number}</TableCellLayout>
            </TableCell>
            <TableCell>
                <div style="display: flex; align-items: center; gap: 6px;">
                    <select
                        class="form-select"
                        style="min-width: 240px;"
                        disabled=move || vm.loading_articles.get()
                        on:change=move |ev| {
                            vm.set_article(&id.get_value(), event_target_value(&ev));
                        }
                    >
                        {move || if vm.loading_articles.get() {
                            view! { <option value="" selected=true>"Chargement…"</option> }.into_any()
                        } else {
                            view! {
                                <option value="" prop:selected=move || selected_article().is_empty()>
                                    "— Choisir un article —"
                                </option>
                                {article_options}
                            }.into_any()
                        }}
                    </select>
                    <Show when=move || unpriced.get()>
                        <span title="Cet article n'a pas de prix HT dans le catalogue">
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                                "non tarifé"
                            </Badge>
                        </span>
                    </Show>
                </div>
            </TableCell>
            <TableCellAmount
                value=Signal::derive(move || amounts.get().map(|a| a.unit_price))
                muted=Signal::derive(move || Some(unpriced.get()))
            />
            <TableCell>
                <input
                    type="number"
                    class="form-input"
                    style="width: 70px;"
                    min="1"
                    step="1"
                    prop:value=quantity
                    on:input=move |ev| {
                        vm.set_quantity_input(&id.get_value(), &event_target_value(&ev));
                    }
                />
            </TableCell>
            <TableCell>
                <input
                    type="number"
                    class="form-input"
                    style="width: 70px;"
                    min="0"
                    max="100"
                    step="0.01"
                    prop:value=discount
                    on:input=move |ev| {
                        vm.set_discount_input(&id.get_value(), &event_target_value(&ev));
                    }
                />
            </TableCell>
            <TableCell>
                <input
                    type="number"
                    class="form-input"
                    style="width: 70px;"
                    min="0"
                    max="100"
                    step="0.01"
                    prop:value=vat
                    on:input=move |ev| {
                        vm.set_vat_input(&id.get_value(), &event_target_value(&ev));
                    }
                />
            </TableCell>
            <TableCellAmount value=Signal::derive(move || amounts.get().map(|a| a.ht)) bold=true />
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_line(&id.get_value())
                    disabled=vm.is_submitting()
                >
                    {icon("trash")}
                    " Retirer"
                </Button>
            </TableCell>
        </TableRow>
    }
}

#[component]
fn QuoteTotals(vm: CreateDevisVm) -> impl IntoView {
    let totals = vm.totals();

    view! {
        <div class="quote-totals" style="display: flex; flex-direction: column; align-items: flex-end; gap: 4px; margin-top: 16px;">
            <div>
                <span class="text-muted">"Total HT : "</span>
                <strong>{move || format_amount(totals.get().total_ht)}</strong>
            </div>
            <div>
                <span class="text-muted">"FODEC 1 % : "</span>
                <strong>{move || format_amount(totals.get().fodec)}</strong>
            </div>
            <div style="font-size: 1.1em;">
                <span class="text-muted">"Total TTC (avec 1% FODEC) : "</span>
                <strong>{move || format_amount(totals.get().total_ttc)}</strong>
            </div>
        </div>
    }
}
