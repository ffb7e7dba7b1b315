use std::fmt;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use chrono::Utc;
use indexmap::IndexMap;

use crate::fields::FieldMap;

/// Where transaction log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    No,
    Console,
    File,
    Both,
}

impl LogMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "no" => Some(LogMode::No),
            "console" => Some(LogMode::Console),
            "file" => Some(LogMode::File),
            "both" => Some(LogMode::Both),
            _ => None,
        }
    }
}

/// How much gets logged. Each level is a superset of the previous one:
/// `low` logs IPN verification outcomes, `medium` adds submissions,
/// `high` adds protocol tracing, `debug` adds full field dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Low,
    Medium,
    High,
    Debug,
}

impl Verbosity {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Verbosity::Low),
            "medium" => Some(Verbosity::Medium),
            "high" => Some(Verbosity::High),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }
}

/// Severity tag carried in each log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Info,
    Error,
    Warning,
    Trace,
    Debug,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tag::Info => "INFO",
            Tag::Error => "ERROR",
            Tag::Warning => "WARNING",
            Tag::Trace => "TRACE",
            Tag::Debug => "DEBUG",
        };
        f.write_str(s)
    }
}

/// Routing decision for one line: (stderr, stdout, file).
///
/// Errors always reach stderr no matter the mode. Everything else is gated
/// by the configured mode; the file sink applies to all tags.
fn sinks(tag: Tag, mode: LogMode) -> (bool, bool, bool) {
    let stderr = tag == Tag::Error;
    let stdout = tag != Tag::Error && matches!(mode, LogMode::Console | LogMode::Both);
    let file = matches!(mode, LogMode::File | LogMode::Both);
    (stderr, stdout, file)
}

/// The transaction log. Configured once at construction, never reconfigured.
///
/// Line format: `[client-address] - - [timestamp] - [TAG] - message`.
/// The file sink is opened, appended and closed per write; no locking is
/// performed.
#[derive(Debug)]
pub struct EventLog {
    mode: LogMode,
    level: Verbosity,
    file: PathBuf,
}

impl EventLog {
    pub fn new(mode: LogMode, level: Verbosity, file: PathBuf) -> Self {
        Self { mode, level, file }
    }

    /// Whether events of the given verbosity category should be logged.
    /// Always false when logging is turned off.
    pub fn enabled(&self, min: Verbosity) -> bool {
        self.mode != LogMode::No && self.level >= min
    }

    pub fn write(&self, tag: Tag, client: &str, message: &str) {
        let line = format!(
            "[{}] - - [{}] - [{}] - {}\n",
            client,
            Utc::now().format("%m/%d/%Y %-I:%M %p"),
            tag,
            message
        );

        let (stderr, stdout, file) = sinks(tag, self.mode);
        if stderr {
            eprint!("{line}");
        }
        if stdout {
            print!("{line}");
        }
        if file {
            self.append(&line);
        }
    }

    /// One-line summary of an IPN verification outcome, with the raw PayPal
    /// reply and the transaction data sorted by key.
    pub fn ipn_results(
        &self,
        client: &str,
        verified: bool,
        response: &str,
        data: &IndexMap<String, String>,
    ) {
        if self.mode == LogMode::No {
            return;
        }

        let mut text = String::new();
        if verified {
            text.push_str("TRANSACTION COMPLETED - ");
        } else {
            text.push_str("TRANSACTION FAILED - IPN Validation Failed - ");
        }
        text.push_str(&format!("[Paypal IPN Response] - {} - ", response));
        text.push_str("[Transaction Data] - ");

        let mut pairs: Vec<_> = data.iter().collect();
        pairs.sort_by_key(|(k, _)| k.as_str());
        let joined: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        text.push_str(&joined.join(", "));

        self.write(Tag::Info, client, &text);
    }

    /// One-line summary of a transaction handed off to PayPal.
    pub fn submitted_transaction(&self, client: &str, fields: &FieldMap) {
        if self.mode == LogMode::No {
            return;
        }

        let joined: Vec<String> = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        let text = format!("TRANSACTION SUBMITTED - [Data] - {}", joined.join(", "));

        self.write(Tag::Info, client, &text);
    }

    fn append(&self, line: &str) {
        let opened = OpenOptions::new().create(true).append(true).open(&self.file);
        match opened {
            Ok(mut file) => {
                if let Err(e) = file.write_all(line.as_bytes()) {
                    tracing::warn!("Failed to append to log file {:?}: {}", self.file, e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to open log file {:?}: {}", self.file, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_reach_stderr_in_every_mode() {
        for mode in [LogMode::No, LogMode::Console, LogMode::File, LogMode::Both] {
            let (stderr, _, _) = sinks(Tag::Error, mode);
            assert!(stderr, "mode {:?} must keep the stderr error sink", mode);
        }
    }

    #[test]
    fn mode_no_suppresses_everything_else() {
        for tag in [Tag::Info, Tag::Warning, Tag::Trace, Tag::Debug] {
            assert_eq!(sinks(tag, LogMode::No), (false, false, false));
        }
    }

    #[test]
    fn file_sink_applies_to_all_tags() {
        let (_, _, file) = sinks(Tag::Error, LogMode::File);
        assert!(file);
        let (_, stdout, file) = sinks(Tag::Trace, LogMode::Both);
        assert!(stdout);
        assert!(file);
    }

    #[test]
    fn verbosity_levels_are_ordered() {
        assert!(Verbosity::Debug > Verbosity::High);
        assert!(Verbosity::High > Verbosity::Medium);
        assert!(Verbosity::Medium > Verbosity::Low);
    }
}
