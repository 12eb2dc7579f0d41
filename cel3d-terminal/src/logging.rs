/// Logger setup for the viewer binary
use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g. "info" or
/// "cel3d_core=debug". When unset, `RUST_LOG` is consulted, then `warn`.
///
/// The terminal is owned by the renderer while the viewer runs, so records
/// go to `log_file` when one is given.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: None,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.write_style(config.write_style);

        let mut file_error = None;
        if let Some(path) = &config.log_file {
            match File::create(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                    builder.write_style(env_logger::WriteStyle::Never);
                }
                Err(err) => file_error = Some((path.clone(), err)),
            }
        }

        builder.init();

        if let Some((path, err)) = file_error {
            log::warn!("cannot open log file {}: {}", path.display(), err);
        }
        log::debug!("logging initialized");
    });
}
