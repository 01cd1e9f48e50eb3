use clap::Parser;
use color_eyre::Result;

use data_modules_tui::cli::CliArgs;
use data_modules_tui::{config, event, logging, pages, terminal, App};

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    logging::init_tracing(args.debug);

    if args.check {
        return event::run_check();
    }

    let config = config::init_app_config()?;
    let pages = pages::load_bundle()?;

    // Without a terminal there is nothing to draw on
    if args.headless || args.export_dir.is_some() || !is_terminal() {
        return event::run_headless(&pages, &config, args.json);
    }

    let mut app = App::new(pages, &config)?;
    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup_terminal_state(true, true);
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
