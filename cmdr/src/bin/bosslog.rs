// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use bosslog_cmdr::{CLIArg, ERROR_REPORT_FOOTER, try_get_or_create_log_file_path,
                   try_run_command, unrecoverable_error_message};
use bosslog_ui::{CommonResult, TracingConfig, init_tracing,
                 setup_default_miette_global_report_handler};
use clap::Parser;

// Note: The `tokio::main` macro internally calls `.expect("Failed building the Runtime")`
// when initializing the Tokio runtime. This is unavoidable and safe, as runtime creation
// failure is a fatal error that should panic. The lint must be suppressed here.
#[tokio::main]
#[allow(clippy::unwrap_in_result)]
async fn main() -> CommonResult<()> {
    setup_default_miette_global_report_handler(ERROR_REPORT_FOOTER);

    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    let enable_logging = cli_arg.global_options.enable_logging;
    if enable_logging {
        let log_file_path = try_get_or_create_log_file_path()?;
        init_tracing(TracingConfig::new_file(log_file_path.display().to_string()))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let result = try_run_command(&cli_arg).await;

    if let Err(error) = &result {
        tracing::error!(
            message = "Could not run bosslog due to the following problem",
            error = %unrecoverable_error_message(error)
        );
    }

    if enable_logging {
        tracing::debug!(message = "Stop logging...");
    }

    println!("{}", result?);
    Ok(())
}
