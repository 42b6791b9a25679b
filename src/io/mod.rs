mod csv_log;

pub use csv_log::{append_log, read_log, read_log_if_exists, CsvLog, LogRecord, DEFAULT_LOG_FILE};
