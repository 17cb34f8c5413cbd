//! Alert presenter for a terminal.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use bi_core::ports::{Alert, AlertPort};

/// Writes each alert as a `title: message` line.
pub struct TerminalAlerts<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalAlerts<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TerminalAlerts<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> AlertPort for TerminalAlerts<W> {
    async fn show(&self, alert: Alert) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(out, "{}: {}", alert.title, alert.message) {
            warn!(error = %err, title = %alert.title, "failed to write alert");
        }
    }
}
