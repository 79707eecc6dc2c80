//! Multi-window console UI: window list, tab strip, transcript, input line with suggestions,
//! lexical token table, command catalog, and display settings.
//!
//! All session state lives in the [`ConsoleRuntime`] store; this crate only renders it, turns DOM
//! events into [`SessionAction`] values, and runs reducer effects against the DOM.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod catalog_panel;
mod dom;

use console_contract::SuggestionKind;
use console_core::{
    load_dark_mode, save_dark_mode, CatalogExpansion, ConsoleRuntime, RecallDirection,
    SessionAction, SessionEffect, TranscriptEntry, WindowId,
};
use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use platform_host::format_clock_utc;

use crate::catalog_panel::{CatalogDialog, InlineCatalog};

const INPUT_DOM_ID: &str = "console-input";
const TRANSCRIPT_DOM_ID: &str = "console-transcript";

/// Prompt shown before commands; falls back to a bare marker until the directory is known.
fn prompt_label(directory: &str) -> String {
    if directory.is_empty() {
        ">".to_string()
    } else {
        format!("{directory} >")
    }
}

fn render_entry(entry: TranscriptEntry) -> View {
    let clock = format_clock_utc(entry.timestamp_ms());
    match entry {
        TranscriptEntry::Submission {
            command, directory, ..
        } => view! {
            <div class="console-line console-submission">
                <span class="console-prompt">{prompt_label(&directory)}</span>
                <span class="console-command">{command}</span>
                <time class="console-time">{clock}</time>
            </div>
        }
        .into_view(),
        TranscriptEntry::Result { output, .. } if output.is_empty() => ().into_view(),
        TranscriptEntry::Result { output, .. } => view! {
            <pre class="console-line console-output">{output}</pre>
        }
        .into_view(),
    }
}

fn spawn_submit(runtime: &ConsoleRuntime) {
    if let Some(pending) = runtime.submit_active() {
        spawn_local(async move {
            pending.await;
        });
    }
}

#[component]
/// Console page contents. Boots the working-directory refresh and the stored theme on mount.
pub fn ConsoleApp(
    /// Session runtime assembled by the entry layer.
    runtime: ConsoleRuntime,
) -> impl IntoView {
    let store = runtime.store;
    let state = store.state;
    let runtime = store_value(runtime);
    let expansion = create_rw_signal(CatalogExpansion::default());
    let dark_mode = create_rw_signal(false);
    let windows_open = create_rw_signal(true);
    let tokens_open = create_rw_signal(true);
    let commands_open = create_rw_signal(true);
    let catalog_dialog_open = create_rw_signal(false);
    let settings_open = create_rw_signal(false);

    runtime.with_value(|runtime| {
        let boot = runtime.boot();
        spawn_local(async move {
            boot.await;
        });
        let prefs = runtime.services.prefs.clone();
        spawn_local(async move {
            dark_mode.set(load_dark_mode(prefs.as_ref()).await);
        });
    });

    create_effect(move |_| dom::apply_dark_class(dark_mode.get()));

    create_effect(move |_| {
        if store.effects.with(Vec::is_empty) {
            return;
        }
        for effect in store.take_effects() {
            match effect {
                SessionEffect::FocusComposer => dom::focus_element_by_id(INPUT_DOM_ID),
                SessionEffect::RevealTranscriptEnd(window_id) => {
                    if store.with(|state| state.active_window_id == window_id) {
                        dom::scroll_to_end_by_id(TRANSCRIPT_DOM_ID);
                    }
                }
            }
        }
    });

    let toggle_dark = move |_| {
        let dark = !dark_mode.get_untracked();
        dark_mode.set(dark);
        let prefs = runtime.with_value(|runtime| runtime.services.prefs.clone());
        spawn_local(async move { save_dark_mode(prefs.as_ref(), dark).await });
    };

    let window_ids =
        move || state.with(|state| state.windows.iter().map(|w| w.id.clone()).collect::<Vec<_>>());
    let is_active = move |id: &WindowId| state.with(|state| &state.active_window_id == id);
    let transcript = move || {
        state.with(|state| state.active_window().map(|w| w.transcript.clone()).unwrap_or_default())
    };
    let prompt = move || state.with(|state| prompt_label(&state.current_directory));
    let buffer = move || state.with(|state| state.composer.buffer.clone());
    let suggestions = create_memo(move |_| {
        // Subscribe: the buffer and visited directories both live in the session state.
        state.with(|_| ());
        runtime.with_value(ConsoleRuntime::suggestions)
    });
    let panel_visible =
        move || state.with(|state| state.composer.suggestions_open) && !suggestions.with(Vec::is_empty);
    let tokens = move || state.with(|state| state.display_tokens.clone());

    let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" => runtime.with_value(spawn_submit),
        "ArrowUp" => {
            ev.prevent_default();
            store.dispatch(SessionAction::RecallHistory {
                direction: RecallDirection::Older,
            });
        }
        "ArrowDown" => {
            ev.prevent_default();
            store.dispatch(SessionAction::RecallHistory {
                direction: RecallDirection::Newer,
            });
        }
        "Escape" => store.dispatch(SessionAction::DismissSuggestions),
        _ => {}
    };

    view! {
        <div class="console-root">
            <aside class="console-sidebar">
                <div class="console-brand">"Linux CLI"</div>
                <nav class="console-nav">
                    <button
                        type="button"
                        class="console-nav-item"
                        aria-expanded=move || windows_open.get().to_string()
                        on:click=move |_| windows_open.update(|open| *open = !*open)
                    >
                        "Windows"
                    </button>
                    <Show when=move || windows_open.get() fallback=|| ()>
                        <div class="console-window-list">
                            <For each=window_ids key=|id| id.clone() let:id>
                                {
                                    let target = id.clone();
                                    let active_id = id.clone();
                                    view! {
                                        <button
                                            type="button"
                                            class="console-window-link"
                                            class:active=move || is_active(&active_id)
                                            on:click=move |_| store.activate(target.clone())
                                        >
                                            {id.title()}
                                        </button>
                                    }
                                }
                            </For>
                        </div>
                    </Show>
                    <button
                        type="button"
                        class="console-nav-item"
                        on:click=move |_| catalog_dialog_open.set(true)
                    >
                        "Commands"
                    </button>
                    <button
                        type="button"
                        class="console-nav-item"
                        on:click=move |_| settings_open.set(true)
                    >
                        "Settings"
                    </button>
                </nav>
            </aside>

            <main class="console-main">
                <header class="console-header">
                    <h1>"Terminal"</h1>
                    <div class="console-tabs" role="tablist">
                        <For each=window_ids key=|id| id.clone() let:id>
                            {
                                let target = id.clone();
                                let closing = id.clone();
                                let active_id = id.clone();
                                let selected_id = id.clone();
                                view! {
                                    <div
                                        class="console-tab"
                                        role="tab"
                                        class:active=move || is_active(&active_id)
                                        aria-selected=move || is_active(&selected_id).to_string()
                                        on:click=move |_| store.activate(target.clone())
                                    >
                                        <span>{id.title()}</span>
                                        <button
                                            type="button"
                                            class="console-tab-close"
                                            aria-label="Close window"
                                            on:click=move |ev: MouseEvent| {
                                                ev.stop_propagation();
                                                store.close(closing.clone());
                                            }
                                        >
                                            "x"
                                        </button>
                                    </div>
                                }
                            }
                        </For>
                        <button
                            type="button"
                            class="console-tab-add"
                            aria-label="New window"
                            on:click=move |_| {
                                store.open();
                            }
                        >
                            "+"
                        </button>
                    </div>
                </header>

                <section id=TRANSCRIPT_DOM_ID class="console-transcript" role="log" aria-live="polite">
                    {move || transcript().into_iter().map(render_entry).collect_view()}
                </section>

                <div class="console-input-row">
                    <label class="console-prompt" for=INPUT_DOM_ID>{prompt}</label>
                    <input
                        id=INPUT_DOM_ID
                        class="console-input"
                        type="text"
                        prop:value=buffer
                        on:input=move |ev| {
                            store.dispatch(SessionAction::EditInput {
                                text: event_target_value(&ev),
                            })
                        }
                        on:keydown=on_keydown
                        placeholder="Type a command..."
                        autocomplete="off"
                        spellcheck="false"
                    />
                    <Show when=panel_visible fallback=|| ()>
                        <div class="console-suggestions" role="listbox" aria-label="Suggestions">
                            <For
                                each=move || suggestions.get()
                                key=|suggestion| (suggestion.kind, suggestion.id.clone())
                                let:suggestion
                            >
                                {
                                    let label = suggestion.label.clone();
                                    let is_directory = suggestion.kind == SuggestionKind::Directory;
                                    view! {
                                        <button
                                            type="button"
                                            class="console-suggestion"
                                            class:directory=is_directory
                                            on:click=move |_| {
                                                store.dispatch(SessionAction::SelectSuggestion {
                                                    label: label.clone(),
                                                })
                                            }
                                        >
                                            <span class="console-suggestion-label">{suggestion.label}</span>
                                            <span class="console-suggestion-kind">
                                                {suggestion.kind.as_str()}
                                            </span>
                                        </button>
                                    }
                                }
                            </For>
                        </div>
                    </Show>
                </div>
            </main>

            <aside class="console-inspector">
                <button
                    type="button"
                    class="console-section-toggle"
                    aria-expanded=move || tokens_open.get().to_string()
                    on:click=move |_| tokens_open.update(|open| *open = !*open)
                >
                    "Tokens"
                </button>
                <Show when=move || tokens_open.get() fallback=|| ()>
                    <table class="console-token-table">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Token"</th>
                                <th>"Kind"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                tokens()
                                    .into_iter()
                                    .map(|token| {
                                        view! {
                                            <tr>
                                                <td>{token.index}</td>
                                                <td class="console-token-value">{token.value}</td>
                                                <td>{token.kind}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
                <button
                    type="button"
                    class="console-section-toggle"
                    aria-expanded=move || commands_open.get().to_string()
                    on:click=move |_| commands_open.update(|open| *open = !*open)
                >
                    "Commands"
                </button>
                <Show when=move || commands_open.get() fallback=|| ()>
                    <div class="catalog-inline">
                        <InlineCatalog
                            catalog=runtime.with_value(|runtime| runtime.catalog.clone())
                            expansion=expansion
                        />
                    </div>
                </Show>
            </aside>

            <Show when=move || catalog_dialog_open.get() fallback=|| ()>
                <CatalogDialog
                    catalog=runtime.with_value(|runtime| runtime.catalog.clone())
                    expansion=expansion
                    on_close=move |_| catalog_dialog_open.set(false)
                />
            </Show>

            <Show when=move || settings_open.get() fallback=|| ()>
                <div class="console-modal-backdrop">
                    <div class="console-modal settings-dialog" role="dialog" aria-label="Settings">
                        <h2>"Settings"</h2>
                        <div class="settings-row">
                            <span>"Theme"</span>
                            <button type="button" class="console-theme-toggle" on:click=toggle_dark>
                                {move || if dark_mode.get() { "Light" } else { "Dark" }}
                            </button>
                        </div>
                        <button
                            type="button"
                            class="console-modal-close"
                            on:click=move |_| settings_open.set(false)
                        >
                            "Close"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn prompt_shows_directory_once_known() {
        assert_eq!(prompt_label(""), ">");
        assert_eq!(prompt_label("/home/demo"), "/home/demo >");
    }
}
