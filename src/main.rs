//! colorgrab CLI entry point

use std::process::ExitCode;

use clap::Parser;

use colorgrab::cli::{
    app::{
        load_merged_config, pick_options, run_clipboard_holder, run_pick, EXIT_ERROR,
        EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use colorgrab::domain::color::ColorFormat;
use colorgrab::domain::config::AppConfig;
use colorgrab::infrastructure::XdgConfigStore;

// The X11 connection is not Send, so the pick runs on a single thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new().with_verbose(cli.verbose);

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::HoldClipboard) => return run_clipboard_holder().await,
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        format: cli.format.map(|f| ColorFormat::from(f).to_string()),
        interval: cli.interval.clone(),
        offset: cli.offset.clone(),
        notify: if cli.notify { Some(true) } else { None },
        font: cli.font.as_ref().map(|p| p.to_string_lossy().into_owned()),
        ..Default::default()
    };

    let config = load_merged_config(cli_config, &presenter).await;

    let options = match pick_options(&config, cli.json, cli.verbose) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_pick(options).await
}
