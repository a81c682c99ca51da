use crate::{error::Error, extension::TomlTableExt, state::State};
use std::{fs, io, path::Path, sync::OnceLock};
use tracing::Level;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, writer::MakeWriterExt},
    layer::SubscriberExt,
};

/// Initializes the tracing subscriber.
pub(super) fn init(state: &State) -> Result<(), Error> {
    if TRACING_APPENDER_GUARD.get().is_some() {
        tracing::warn!("the tracing subscriber has already been initialized");
        return Ok(());
    }

    let app_env = state.env();
    let in_dev_mode = app_env.is_dev();
    let mut env_filter = if in_dev_mode {
        "info,intl_tel_core=trace,intl_tel_input=trace"
    } else {
        "info"
    };

    let mut log_dir = None;
    let mut log_rotation = "daily";
    let mut max_log_files = 30;
    let mut display_target = true;
    let mut display_filename = in_dev_mode;
    let mut display_line_number = in_dev_mode;
    let mut display_span_list = false;
    if let Some(config) = state.get_config("tracing") {
        log_dir = config.get_str("log-dir");
        if let Some(rotation) = config.get_str("log-rotation") {
            log_rotation = rotation;
        }
        if let Some(files) = config.get_u64("max-log-files") {
            max_log_files = usize::try_from(files).unwrap_or(1);
        }
        if let Some(filter) = config.get_str("filter") {
            env_filter = filter;
        }
        display_target = config.get_bool("display-target").unwrap_or(true);
        display_filename = config.get_bool("display-filename").unwrap_or(in_dev_mode);
        display_line_number = config
            .get_bool("display-line-number")
            .unwrap_or(in_dev_mode);
        display_span_list = config.get_bool("display-span-list").unwrap_or(false);
    }

    let (file_writer, worker_guard) = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            if !log_dir.exists() {
                fs::create_dir_all(log_dir).map_err(|err| {
                    let log_dir = log_dir.display();
                    Error::with_source(format!("fail to create the log directory `{log_dir}`"), err)
                })?;
            }

            let rotation = match log_rotation {
                "minutely" => Rotation::MINUTELY,
                "hourly" => Rotation::HOURLY,
                "daily" => Rotation::DAILY,
                _ => Rotation::NEVER,
            };
            let file_appender = RollingFileAppender::builder()
                .rotation(rotation)
                .filename_prefix(format!("intl-tel.{}", app_env.as_str()))
                .filename_suffix("log")
                .max_log_files(max_log_files.max(1))
                .build(log_dir)
                .map_err(|err| Error::with_source("fail to build the rolling file appender", err))?;
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env_filter);
    if in_dev_mode {
        let stdout_layer = fmt::layer()
            .with_target(display_target)
            .with_file(display_filename)
            .with_line_number(display_line_number)
            .with_writer(io::stdout.with_max_level(Level::DEBUG))
            .pretty();
        let file_layer = file_writer.map(|writer| {
            fmt::layer()
                .with_ansi(false)
                .with_target(display_target)
                .with_writer(writer)
        });
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(stdout_layer)
            .with(file_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let stdout_layer = fmt::layer()
            .with_target(display_target)
            .with_file(display_filename)
            .with_line_number(display_line_number)
            .with_writer(io::stdout.with_max_level(Level::WARN))
            .json()
            .with_current_span(true)
            .with_span_list(display_span_list);
        let file_layer = file_writer.map(|writer| {
            fmt::layer()
                .with_target(display_target)
                .with_writer(writer)
                .json()
                .with_current_span(true)
                .with_span_list(display_span_list)
        });
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(stdout_layer)
            .with(file_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    if TRACING_APPENDER_GUARD.set(worker_guard).is_err() {
        tracing::warn!("the worker guard for the tracing appender has already been set");
    }
    Ok(())
}

/// Tracing appender guard.
static TRACING_APPENDER_GUARD: OnceLock<Option<WorkerGuard>> = OnceLock::new();
