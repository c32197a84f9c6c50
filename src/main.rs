// Entrypoint for the styler.
// - Keeps `main` small: set up logging and config, build the API client
//   and hand a session to the UI loop.
// - Returns `anyhow::Result` so startup failures print a readable chain.

use styler_cli::{api::ApiClient, config::Config, session::Session, ui::main_menu};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Endpoint, download directory and default style come from
    // STYLER_* variables. See `config::Config::from_env`.
    let config = Config::from_env();
    log::debug!("{config:?}");

    let api = ApiClient::new(&config)?;

    // Blocks until the user exits.
    main_menu(Session::new(api, &config))?;
    Ok(())
}
