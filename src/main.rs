//! typefolio: terminal portfolio page.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args and load config
//!   3. Resolve effective log level (`-v` flags > env > config) and init logger
//!   4. Validate typewriter settings and build the relay (fail fast)
//!   5. Spawn Ctrl-C → shutdown signal watcher
//!   6. Render header, run the hero view, calls to action, sections
//!   7. Interactive runs: contact console
//!   8. Footer, cancel token

use std::io::IsTerminal;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use typefolio::contact::{self, ContactOutcome};
use typefolio::error::AppError;
use typefolio::hero::{HeroExit, HeroMode, HeroView};
use typefolio::relay::providers;
use typefolio::typewriter::Settings;
use typefolio::{config, logger, page};

#[derive(Debug, Parser)]
#[command(name = "typefolio", version, about = "Terminal portfolio page")]
struct Cli {
    /// Interactive mode: animate until Enter, then show the contact form.
    #[arg(short, long)]
    interactive: bool,

    /// Path to the site config (default: config/default.toml).
    #[arg(short = 'f', long = "config", value_name = "PATH")]
    config: Option<String>,

    /// Print the hero line without animating.
    #[arg(long)]
    no_animate: bool,

    /// Increase logging verbosity (-v warn, -vv info, -vvv debug, -vvvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    // A pending stdin read lives on a blocking thread and would hold up
    // runtime shutdown until the next newline.
    std::process::exit(code);
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    let config = config::load(args.config.as_deref())?;

    let cli_level = logger::verbosity_level(args.verbose);
    let effective_log_level = cli_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, cli_level.is_some())?;

    info!(
        source = %config.source.display(),
        effective_log_level = %effective_log_level,
        interactive = args.interactive,
        "config loaded"
    );

    let settings = Settings::from_config(&config.typewriter)?;

    let relay = if args.interactive {
        let relay = providers::build(
            &config.relay,
            config.relay_public_key.clone(),
            config.relay_access_token.clone(),
        )?;
        info!(provider = relay.provider_name(), "relay ready");
        Some(relay)
    } else {
        None
    };

    // Shared shutdown token. Ctrl-C cancels it and every view watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            ctrlc_token.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    page::render_header(&mut stdout, &config)?;

    let mode = if args.no_animate || !stdout.is_terminal() {
        HeroMode::Static
    } else if args.interactive {
        HeroMode::UntilDismissed
    } else {
        HeroMode::Rotations(config.typewriter.rotations)
    };
    debug!(?mode, "starting hero view");

    let mut hero = HeroView::new(&settings, &config.typewriter.caret, mode);
    if let Ok((columns, _)) = crossterm::terminal::size() {
        hero = hero.with_columns(columns);
    }
    let hero_exit = hero.run(&mut stdout, &mut lines, &shutdown).await?;
    if hero_exit == HeroExit::Shutdown {
        return Ok(());
    }

    page::render_calls_to_action(&mut stdout, &config)?;
    page::render_sections(&mut stdout, &config)?;

    if let Some(relay) = relay {
        page::render_contact_heading(&mut stdout, &config)?;
        let outcome = contact::run_contact(&mut lines, &mut stdout, &relay, &shutdown).await?;
        debug!(?outcome, "contact console closed");
        if outcome == ContactOutcome::Closed && shutdown.is_cancelled() {
            return Ok(());
        }
    }

    page::render_footer(&mut stdout, &config)?;
    shutdown.cancel();
    Ok(())
}
