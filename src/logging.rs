use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Install the logger for the binaries. 0 = warnings only, 1 = info, 2 = debug, more = trace.
pub fn init_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()
}
