// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! If you want to change the default global report handler you can do the following:
//! 1. Customize the default global implementation of the `ReportHandler` trait. (Easy).
//! 2. Register a custom error report handler of your own. (Difficult).
//!
//! This module does the first. The hook is only activated at the time that the error is
//! displayed, when the top-level miette handler in `main() -> miette::Result<_>` runs.
//! So the terminal width is only looked up if an error actually occurs.

use miette::MietteHandlerOpts;

pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Terminal width from the `COLUMNS` environment variable, which most shells export.
#[must_use]
pub fn terminal_width_from_env() -> usize {
    parse_terminal_width(std::env::var("COLUMNS").ok().as_deref())
}

/// Falls back to [`DEFAULT_TERMINAL_WIDTH`] for anything that is not a positive number.
#[must_use]
pub fn parse_terminal_width(maybe_columns: Option<&str>) -> usize {
    maybe_columns
        .and_then(|it| it.trim().parse::<usize>().ok())
        .filter(|it| *it > 0)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// The [`miette::ErrorHook`] is lazily evaluated. The `footer` is printed under every
/// report, eg: where to file issues.
pub fn setup_default_miette_global_report_handler(footer: &'static str) {
    miette::set_hook(Box::new(move |_report| {
        let terminal_width = terminal_width_from_env();
        tracing::debug!(message = "miette::set_hook", terminal_width = terminal_width);
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .footer(footer.to_string())
                .build(),
        )
    }))
    .ok();
}
