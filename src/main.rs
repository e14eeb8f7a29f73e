#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use sentiment_dashboard::app::*;
    use sentiment_dashboard::config::Config;
    use sentiment_dashboard::events::spawn_change_relay;
    use sentiment_dashboard::state::AppState;
    use std::io::{Error, ErrorKind};

    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration
    let config = Config::load().map_err(|e| {
        log::error!("Configuration error: {}", e);
        Error::new(ErrorKind::InvalidInput, e)
    })?;
    let state = web::Data::new(AppState::from_config(&config));

    // Database changes feed the event stream for as long as the process lives
    spawn_change_relay(state.store.clone(), state.events.clone(), config.change_poll_interval);

    let conf = get_configuration(None)
        .await
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    log::info!("listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            // JSON endpoints go first so the server-function catch-all cannot shadow them
            .configure(sentiment_dashboard::api::configure)
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            .service(favicon)
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.svg")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!("{site_root}/favicon.svg"))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --features csr`
    use sentiment_dashboard::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
