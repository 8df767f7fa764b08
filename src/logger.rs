use std::time::Instant;

lazy_static::lazy_static! {
    pub static ref LOGGER: Logger = Logger {
        start: Instant::now(),
    };
}

pub struct Logger {
    start: Instant,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn flush(&self) {}

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!(
            "[{} +{:.3}s] [{} > {:?}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            self.start.elapsed().as_secs_f64(),
            record.metadata().target(),
            record.level(),
            record.args()
        );
    }
}

/// Installs `LOGGER` as the global logger with `level` as the max level.
pub fn init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&*LOGGER)?;
    log::set_max_level(level);

    Ok(())
}
