// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # [`init_tracing`]
//!
//! Convenience method to setup Tokio [`tracing_subscriber`] with the output destination
//! described by a [`TracingConfig`]: `stdout`, `stderr`, a log file, or a display and a
//! log file together. You can also customize the log level, and choose between a global
//! subscriber (apps) and a thread local one (tests).

use tracing::dispatcher;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use super::{DisplayPreference, TracingScope, WriterConfig};
use crate::core::log::{rolling_file_appender_impl, tracing_config::TracingConfig};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer. Note that
/// [`tracing_subscriber::fmt::format::Pretty`] and
/// [`tracing_subscriber::fmt::format::Compact`] are mutually exclusive.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Simply initialize the tracing system with the provided [`TracingConfig`]. This will
/// set either (depending on its [`TracingScope`]):
/// 1. Global default subscriber, which once set, can't be unset or changed.
///    - This is great for apps.
///    - Docs for [Global default tracing
///      subscriber](https://docs.rs/tracing/latest/tracing/subscriber/fn.set_global_default.html)
/// 2. Thread local subscriber, which is thread local, and you can assign different ones
///    to different threads.
///    - This is great for tests.
///    - Docs for [Thread local tracing
///      subscriber](https://docs.rs/tracing/latest/tracing/subscriber/fn.set_default.html)
///
/// # Return
/// 1. If you set the [`TracingScope`] to [`TracingScope::ThreadLocal`], then this
///    function will return a [`tracing::dispatcher::DefaultGuard`]. You should drop this
///    guard when you're done with the tracing system. This will reset the tracing system
///    to its previous state for that thread.
/// 2. If you set the [`TracingScope`] to [`TracingScope::Global`], then this function
///    will return [`None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber is
/// already installed.
pub fn init_tracing(
    tracing_config: TracingConfig,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let scope = tracing_config.scope;
    let layers = try_create_layers(&tracing_config)?;
    match scope {
        TracingScope::Global => {
            tracing_subscriber::registry()
                .with(layers)
                .try_init()
                .map_err(|err| miette::miette!("Can't install tracing subscriber: {err}"))?;
            Ok(None)
        }
        TracingScope::ThreadLocal => {
            let it = tracing_subscriber::registry().with(layers).set_default();
            Ok(Some(it))
        }
    }
}

/// Returns the layers. This does not initialize the tracing system. Don't forget to do
/// this manually, by calling `init` on the returned layers.
///
/// For example, once you have the layers, you can run the following:
/// `try_create_layers(..).map(|layers|
/// tracing_subscriber::registry().with(layers).init());`
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add
    // more layers which don't have a level filter.
    return_it.push(Box::new(tracing_config.get_level_filter()));

    if let Some(layer) = try_create_display_layer(
        tracing_config.get_level_filter(),
        tracing_config.get_writer_config(),
    ) {
        return_it.push(layer);
    }

    if let Some(layer) = try_create_file_layer(
        tracing_config.get_level_filter(),
        tracing_config.get_writer_config(),
    )? {
        return_it.push(layer);
    }

    Ok(return_it)
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// This is useful for composition of layers. There's more info in the docs
/// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
#[must_use]
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    // Shared configuration regardless of where logs are output to.
    let fmt_layer = create_fmt!().with_ansi(true);

    // Configure the writer based on the desired log target, and return it.
    match writer_config {
        WriterConfig::DisplayAndFile(display_pref, _)
        | WriterConfig::Display(display_pref) => match display_pref {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
        },
        WriterConfig::None | WriterConfig::File(_) => None,
    }
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    // No color codes in the log file.
    let fmt_layer = create_fmt!().with_ansi(false);

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, tracing_log_file_path)
        | WriterConfig::File(tracing_log_file_path) => {
            let file = rolling_file_appender_impl::try_create(&tracing_log_file_path)?;
            Some(Box::new(
                fmt_layer.with_writer(file).with_filter(level_filter),
            ))
        }
        WriterConfig::None | WriterConfig::Display(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    fn temp_log_file() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("log.txt");
        let file_path = file_path.to_str().unwrap().to_string();
        (dir, file_path)
    }

    #[test]
    fn test_try_create_display_layer() {
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(
                LevelFilter::DEBUG,
                WriterConfig::Display(DisplayPreference::Stdout),
            );
        assert!(layer.is_some());

        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, WriterConfig::None);
        assert!(layer.is_none());
    }

    #[test]
    fn test_try_create_file_layer() {
        let (_dir, file_path) = temp_log_file();
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, WriterConfig::File(file_path.clone()))
                .unwrap();

        assert!(layer.is_some());
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_try_create_both_layers() {
        let (_dir, file_path) = temp_log_file();
        let tracing_config =
            TracingConfig::new_file_and_display(file_path.clone(), DisplayPreference::Stderr);

        let layers = try_create_layers(&tracing_config).unwrap();
        assert_eq!(layers.len(), 3);
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    #[serial]
    fn test_thread_local_file_logging_respects_level() {
        let (_dir, file_path) = temp_log_file();
        let guard = init_tracing(
            TracingConfig::new_file(file_path.clone())
                .with_level_filter(LevelFilter::INFO)
                .with_scope(TracingScope::ThreadLocal),
        )
        .unwrap();
        assert!(guard.is_some());

        tracing::info!(message = "field saved", key = "custom_ab12");
        tracing::debug!(message = "not written");
        drop(guard);

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert!(content.contains("field saved"));
        assert!(content.contains("custom_ab12"));
        assert!(!content.contains("not written"));
    }
}
