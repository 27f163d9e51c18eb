mod app;
mod prompt;

use clap::Parser;

/// Build a local SPA library, link it into its consumer projects, and start
/// a background watch rebuild.
#[derive(Parser, Debug)]
#[command(
    name = "liblink",
    about = "Build the SPA library, link it into consumer projects, and start a watch rebuild",
    version
)]
pub struct Cli {
    /// Library project root
    #[arg(long)]
    pub library_path: Option<String>,

    /// Infinity app project root
    #[arg(long)]
    pub infinity_path: Option<String>,

    /// Extra consumer project roots, comma- or semicolon-delimited
    #[arg(long)]
    pub additional_spa_paths: Option<String>,

    /// Name of the linked package
    #[arg(long)]
    pub package_name: Option<String>,

    /// Package manager to invoke (default: auto-detect pnpm > yarn > npm)
    #[arg(long, value_parser = ["npm", "yarn", "pnpm"])]
    pub package_manager: Option<String>,

    /// Skip additional consumer roots that do not exist instead of failing
    #[arg(long)]
    pub skip_missing_paths: bool,

    /// Never prompt; missing required values are fatal
    #[arg(long, short = 'n')]
    pub non_interactive: bool,

    /// Save resolved paths as defaults without asking
    #[arg(long)]
    pub force_save: bool,

    /// Never write the config file (wins over --force-save)
    #[arg(long)]
    pub no_save: bool,

    /// Skip the library build step
    #[arg(long)]
    pub skip_build: bool,

    /// Skip linking into consumer projects
    #[arg(long)]
    pub skip_link: bool,

    /// Do not start the background watch process
    #[arg(long)]
    pub skip_watch: bool,

    /// Print every resolved path before running anything
    #[arg(long)]
    pub debug_paths: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = app::run(&cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
