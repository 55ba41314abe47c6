//! Progress reporting seam for the resolver and the forecast client.
//!
//! Interactive runs print progress to the console; front-end runs must keep
//! stdout reserved for the single JSON payload line. The orchestrator picks
//! the implementation, collaborators stay mode-agnostic.

/// Receives human-oriented progress lines from the resolver and fetcher.
pub trait Reporter {
    fn note(&self, line: &str);
}

/// Prints each progress line to stdout. Used in interactive mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn note(&self, line: &str) {
        println!("{line}");
    }
}

/// Discards all progress lines. Used in front-end (JSON) mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn note(&self, _line: &str) {}
}
