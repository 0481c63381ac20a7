//! Helpers to check which steps of resizing were performed
//! by the current thread.
use std::cell::RefCell;

thread_local!(static STEPS_LOG: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) });

pub fn log_message(msg: &'static str) {
    STEPS_LOG.with_borrow_mut(|log| log.push(msg));
}

pub fn logs_contain(msg: &str) -> bool {
    count_of_messages(msg) > 0
}

/// Returns how many logged messages contain the given string.
pub fn count_of_messages(msg: &str) -> usize {
    STEPS_LOG.with_borrow(|log| log.iter().filter(|line| line.contains(msg)).count())
}

pub fn clear_log() {
    STEPS_LOG.with_borrow_mut(|log| log.clear());
}
