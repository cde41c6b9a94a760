// Browser launch module
// Best effort: failing to open a browser never stops the server

use crate::logger::{self, LogWriter};

/// Open `url` in the system's default browser without waiting for it
pub fn open_browser(url: &str, log: &LogWriter) {
    if let Err(e) = open::that_detached(url) {
        logger::log_browser_failed(log, url, &e);
    }
}
