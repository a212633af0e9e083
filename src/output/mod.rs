//! Status output for cleanup runs
//!
//! Human-readable only; nothing here is meant to be parsed. Errors go to
//! stderr, everything else to stdout.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct OutputManager {
    pub verbose: bool,
    quiet: bool,
    start_time: Instant,
}

impl OutputManager {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            start_time: Instant::now(),
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            start_time: Instant::now(),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.print_with_timestamp("INFO", message, "ℹ️");
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_with_timestamp("INFO", message, "ℹ️");
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_with_timestamp("SUCCESS", message, "✅");
        }
    }

    pub fn warning(&self, message: &str) {
        self.print_with_timestamp("WARN", message, "⚠️");
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}❌ {}", self.timestamp_prefix(), message);
    }

    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }

        if self.verbose {
            let separator = "━".repeat(60);
            println!("\n{}", separator);
            println!("📋 {}", title);
            println!("{}", separator);
        } else {
            println!("\n📋 {}", title);
        }
    }

    pub fn step(&self, step: &str) {
        if self.verbose {
            println!("    🔸 {}", step);
        }
    }

    pub fn detail(&self, detail: &str) {
        if self.verbose {
            println!("      📝 {}", detail);
        }
    }

    /// Listing that is shown even without `--verbose`, e.g. a dry-run plan
    pub fn list(&self, title: &str, items: &[String]) {
        if self.quiet {
            return;
        }

        println!("  📂 {}", title);
        for (i, item) in items.iter().enumerate() {
            println!("    {}. {}", i + 1, item);
        }
        if items.is_empty() {
            println!("    (No items to display)");
        }
    }

    pub fn summary(&self, title: &str, items: &[(&str, String)]) {
        if self.quiet {
            return;
        }

        println!("\n📊 {}", title);
        for (key, value) in items {
            println!("  • {}: {}", key, value);
        }
    }

    pub fn format_duration(&self, duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs < 60 {
            format!("{:.1}s", duration.as_secs_f64())
        } else if secs < 3600 {
            format!("{}m{:02}s", secs / 60, secs % 60)
        } else {
            format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn elapsed_time(&self) -> String {
        self.format_duration(self.elapsed())
    }

    fn timestamp_prefix(&self) -> String {
        if self.verbose {
            format!("[{:8.3}s] ", self.start_time.elapsed().as_secs_f64())
        } else {
            String::new()
        }
    }

    fn print_with_timestamp(&self, level: &str, message: &str, emoji: &str) {
        if self.verbose {
            println!("{}{} {} {}", self.timestamp_prefix(), emoji, level, message);
        } else {
            println!("{} {}", emoji, message);
        }
    }
}
