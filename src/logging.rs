//! log4rs setup.

use crate::error::{Error, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

/// Read from the working directory when present.
pub const LOG_CONFIG_PATH: &str = "log4rs.yml";

const PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Initialize from `log4rs.yml`, or log `Info` and above to stderr.
pub fn init() -> Result<()> {
    let path = Path::new(LOG_CONFIG_PATH);
    if path.exists() {
        return log4rs::init_file(path, Default::default()).map_err(|e| {
            Error::Config(format!("cannot initialize logging from {}: {e}", path.display()))
        });
    }
    log4rs::init_config(stderr_config(LevelFilter::Info)?)
        .map_err(|e| Error::Config(format!("cannot initialize logging: {e}")))?;
    Ok(())
}

pub fn stderr_config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| Error::Config(format!("invalid logging config: {e}")))
}
