use console_app::ConsoleApp;
use console_core::{CommandCatalog, ConsoleConfig, ConsoleRuntime};
use leptos::*;
use leptos_meta::*;
use platform_host_web::build_host_services;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Linux CLI" />
        <Meta name="description" content="Browser console for a remote command execution service." />

        <main class="site-root">
            <ConsoleEntry />
        </main>
    }
}

/// Assembles configuration, host services, and the catalog, then mounts the console.
#[component]
pub fn ConsoleEntry() -> impl IntoView {
    let config = ConsoleConfig::from_build_env();
    let services = build_host_services(&config.execute_endpoint);
    logging::log!("console host strategy: {}", services.host_strategy.as_str());
    let catalog = CommandCatalog::builtin().unwrap_or_else(|err| {
        logging::warn!("built-in command catalog unavailable: {err}");
        CommandCatalog::default()
    });
    let runtime = ConsoleRuntime::new(&config, catalog, services);

    view! { <ConsoleApp runtime=runtime /> }
}
