// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Sync (default) | List | Whoami | Options | Version
//! ```

use std::io::IsTerminal;
use std::process::ExitCode;

use group_mirror::cli::global::GlobalOptions;
use group_mirror::cli::sync::SyncArgs;
use group_mirror::cli::{self, Command};
use group_mirror::cmd::config::run_options_command;
use group_mirror::cmd::list::run_list_command;
use group_mirror::cmd::sync::run_sync_command;
use group_mirror::cmd::whoami::run_whoami_command;
use group_mirror::config::Config;
use group_mirror::config::loader::ConfigLoader;
use group_mirror::logging::init_logging;
use group_mirror::logging::{LogConfig, LogLevel};
use tracing::debug;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .with_ansi(std::io::stderr().is_terminal())
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global, &[]).map(|config| run_options_command(&config))
        }
        Some(Command::Whoami) => match load_config(&cli.global, &[]) {
            Ok(config) => run_whoami_command(&config).await,
            Err(e) => Err(e),
        },
        Some(Command::List(args)) => {
            match load_config(&cli.global, &args.selection.to_config_overrides()) {
                Ok(config) => run_list_command(&config).await,
                Err(e) => Err(e),
            }
        }
        Some(Command::Sync(args)) => sync(&cli.global, args).await,
        None => sync(&cli.global, &SyncArgs::default()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn sync(global: &GlobalOptions, args: &SyncArgs) -> group_mirror::error::Result<()> {
    let config = load_config(global, &args.to_config_overrides())?;
    run_sync_command(&config).await
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("gmirror.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix("GMIRROR")
}

/// Layer files and environment, then the command's own flags over the
/// global ones.
fn load_config(
    global: &GlobalOptions,
    command_overrides: &[(String, String)],
) -> group_mirror::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for line in loader.format_loaded_files() {
        debug!(source = %line, "config source");
    }
    for (key, value) in global
        .to_config_overrides()
        .iter()
        .chain(command_overrides)
    {
        loader = loader.set(key, value.as_str())?;
    }
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
