//! Progress feedback for streaming replies

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Lifecycle hooks around one streaming reply
pub trait StreamIndicator {
    /// The request went out; nothing has arrived yet.
    fn on_waiting(&self);

    /// The first token arrived and is about to be printed.
    fn on_first_token(&self);

    /// The exchange ended. `failed` is set when the fallback was used.
    fn on_finished(&self, failed: bool);

    /// The user cancelled the exchange.
    fn on_cancelled(&self);
}

/// Shows a spinner until the first token arrives
pub struct StreamProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl StreamProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for StreamProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamIndicator for StreamProgressReporter {
    fn on_waiting(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Menunggu jawaban...".dimmed().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(previous) = guard.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_first_token(&self) {
        self.clear();
    }

    fn on_finished(&self, failed: bool) {
        self.clear();
        if failed {
            eprintln!("{} {}", "x".red(), "Jawaban tidak lengkap".dimmed());
        }
    }

    fn on_cancelled(&self) {
        self.clear();
        eprintln!("{}", "(dibatalkan)".dimmed());
    }
}

/// Plain text feedback (no spinner)
pub struct SimpleProgress;

impl StreamIndicator for SimpleProgress {
    fn on_waiting(&self) {}

    fn on_first_token(&self) {}

    fn on_finished(&self, failed: bool) {
        if failed {
            eprintln!("x Jawaban tidak lengkap");
        }
    }

    fn on_cancelled(&self) {
        eprintln!("(dibatalkan)");
    }
}
