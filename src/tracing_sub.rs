use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing::Level;

// The terminal owns stdout/stderr once the alternate screen is entered, so
// log output is delegated: to a file when one was configured, to a sink
// otherwise.
static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();

pub struct DelegatingWriter;

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match LOG_FILE.get() {
            Some(file) => match file.lock() {
                Ok(mut file) => file.write(buf),
                Err(_) => Ok(buf.len()),
            },
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = LOG_FILE.get()
            && let Ok(mut file) = file.lock()
        {
            file.flush()?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter
    }
}

/// Initialize the tracing subscriber. When `log_file` is given, formatted
/// events append there; otherwise events are swallowed so callsites stay
/// cheap. Safe to call multiple times; subsequent calls are no-ops for the
/// global subscriber.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    if let Some(path) = log_file {
        let file = File::options().append(true).create(true).open(path)?;
        let _ = LOG_FILE.set(Mutex::new(file));
    }
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
