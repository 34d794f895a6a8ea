use std::sync::{Mutex, Once};

use audioring_alloc::{safe_allocate, safe_allocate_aligned, safe_allocate_in};
use audioring_test_utils::FailingAllocator;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Keeps every record so tests can search for their own messages.
struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let line = record.args().to_string();
        self.records.lock().unwrap().push((record.level(), line));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn install() -> &'static CaptureLogger {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    &LOGGER
}

/// Records at `level` that mention `needle`. Tests run in parallel, so
/// each one searches for a size no other test requests.
fn records_with(logger: &CaptureLogger, level: Level, needle: &str) -> Vec<String> {
    logger
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, line)| *l == level && line.contains(needle))
        .map(|(_, line)| line.clone())
        .collect()
}

#[test]
fn refused_allocation_logs_a_warning() {
    let logger = install();
    let alloc = FailingAllocator::always();
    assert!(safe_allocate_in(7331, &alloc).is_err());

    let warnings = records_with(logger, Level::Warn, "7331 bytes");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("out of memory"));
}

#[test]
fn oversized_request_logs_a_warning() {
    let logger = install();
    assert!(safe_allocate(usize::MAX).is_err());

    let needle = format!("{} bytes", usize::MAX);
    let warnings = records_with(logger, Level::Warn, &needle);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("out of memory"));
}

#[test]
fn bad_alignment_logs_a_warning() {
    let logger = install();
    assert!(safe_allocate_aligned(4242, 12).is_err());

    let warnings = records_with(logger, Level::Warn, "4242 bytes");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("invalid align 12"));
}

#[test]
fn successful_allocation_logs_no_warning() {
    let logger = install();
    let block = safe_allocate(9173).unwrap();
    assert_eq!(block.len(), 9173);

    assert!(records_with(logger, Level::Warn, "9173 bytes").is_empty());
}
