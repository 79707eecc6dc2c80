use std::rc::Rc;

use console_contract::CatalogEntry;
use console_core::{CatalogExpansion, CommandCatalog, ExpansionContext};
use leptos::*;

#[component]
fn CatalogItem(
    entry: CatalogEntry,
    expansion: RwSignal<CatalogExpansion>,
    context: ExpansionContext,
) -> impl IntoView {
    let CatalogEntry {
        id,
        description,
        example,
        ..
    } = entry;
    let label = id.clone();
    let id = store_value(id);
    let expanded =
        move || expansion.with(|flags| id.with_value(|id| flags.is_expanded(context, id)));

    view! {
        <div class="catalog-item" class:expanded=expanded>
            <button
                type="button"
                class="catalog-item-toggle"
                aria-expanded=move || expanded().to_string()
                on:click=move |_| {
                    expansion.update(|flags| {
                        id.with_value(|id| flags.toggle(context, id));
                    })
                }
            >
                <span class="catalog-chevron">{move || if expanded() { "v" } else { ">" }}</span>
                <span class="catalog-id">{label}</span>
            </button>
            <Show when=expanded fallback=|| ()>
                <div class="catalog-item-detail">
                    <p>{description.clone()}</p>
                    <p class="catalog-example">"Example: " <code>{example.clone()}</code></p>
                </div>
            </Show>
        </div>
    }
}

#[component]
/// Flat catalog list shown next to the transcript.
pub fn InlineCatalog(
    /// Commands to list, in catalog order.
    catalog: Rc<CommandCatalog>,
    /// Expansion flags shared with the dialog; this list reads and toggles the inline set.
    expansion: RwSignal<CatalogExpansion>,
) -> impl IntoView {
    catalog
        .all()
        .iter()
        .cloned()
        .map(|entry| {
            view! { <CatalogItem entry=entry expansion=expansion context=ExpansionContext::Inline /> }
        })
        .collect_view()
}

#[component]
/// Catalog dialog grouping commands by category.
pub fn CatalogDialog(
    /// Commands to list, grouped by category.
    catalog: Rc<CommandCatalog>,
    /// Expansion flags shared with the inline list; the dialog uses its own set.
    expansion: RwSignal<CatalogExpansion>,
    /// Called when the close button is pressed.
    #[prop(into)]
    on_close: Callback<()>,
) -> impl IntoView {
    let groups = catalog
        .by_category()
        .into_iter()
        .map(|(category, entries)| {
            let items = entries
                .into_iter()
                .cloned()
                .map(|entry| {
                    view! { <CatalogItem entry=entry expansion=expansion context=ExpansionContext::Modal /> }
                })
                .collect_view();
            view! {
                <section class="catalog-group">
                    <h3>{category.label()}</h3>
                    {items}
                </section>
            }
        })
        .collect_view();

    view! {
        <div class="console-modal-backdrop">
            <div class="console-modal catalog-dialog" role="dialog" aria-label="Command list">
                <header class="console-modal-header">
                    <h2>"Command list"</h2>
                    <button
                        type="button"
                        class="console-icon-button"
                        aria-label="Close"
                        on:click=move |_| on_close.call(())
                    >
                        "x"
                    </button>
                </header>
                <div class="catalog-dialog-body">{groups}</div>
            </div>
        </div>
    }
}
