use log::Level;
use logcheck::logger::{LogLevel, Logger};
use logcheck::recorder::Recorder;
use testing_logger::CapturedLog;

pub mod transcript;

/// Runs `test` against a fresh recorder and hands everything that reached the `log` facade to
/// `asserter`.
pub fn test_recorder_logs<T, F>(test: T, asserter: F)
where
    T: FnOnce(&mut Recorder),
    F: Fn(&Vec<CapturedLog>),
{
    testing_logger::setup();
    let mut recorder = Recorder::new();
    test(&mut recorder);
    testing_logger::validate(asserter);
}

pub fn count_logs(captured_logs: &[CapturedLog], level: Level, body: &str) -> usize {
    captured_logs
        .iter()
        .filter(|log| log.level == level && log.body == body)
        .count()
}

pub fn log_all<L: Logger>(logger: &mut L, messages: &[(&str, LogLevel)]) {
    for &(message, level) in messages {
        logger.log(message, level);
    }
}
