//! Stderr logger for the OCR binaries.
//!
//! Pipeline crates log through the `log` facade: per-span segmentation and
//! per-segment labels at `debug`, library and recognition summaries at `info`,
//! blank glyphs and parameter mismatches at `warn`. This logger prints each
//! record as `[elapsed LEVEL stage] message`, where `stage` is the emitting
//! crate without its `mkhedruli_` prefix (`segment`, `recog`, ...).
//!
//! Install once at startup with `init_with_level`. With the `tracing`
//! feature, `init_tracing` installs a `tracing-subscriber` fmt subscriber
//! that also reports span timings of the instrumented stages.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let stage = stage_name(record.target());
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            stage,
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Short stage label for a log target such as `mkhedruli_recog::library`.
fn stage_name(target: &str) -> &str {
    let krate = target.split("::").next().unwrap_or(target);
    match krate.strip_prefix("mkhedruli_") {
        Some(stage) => stage,
        None if krate == "mkhedruli" => "cli",
        None => krate,
    }
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StageLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Environment variable holding the filter directives, checked before `RUST_LOG`.
#[cfg(feature = "tracing")]
pub const LOG_ENV: &str = "MKHEDRULI_LOG";

/// Install a fmt subscriber; `json` switches to flattened JSON events.
///
/// Without `MKHEDRULI_LOG` or `RUST_LOG`, pipeline crates log at `info` and
/// everything else at `warn`.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(
                "warn,mkhedruli=info,mkhedruli_core=info,mkhedruli_segment=info,\
                 mkhedruli_features=info,mkhedruli_recog=info",
            )
        });
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_drop_the_crate_prefix() {
        assert_eq!(stage_name("mkhedruli_recog::recognizer::pipeline"), "recog");
        assert_eq!(stage_name("mkhedruli_segment"), "segment");
        assert_eq!(stage_name("mkhedruli::ocr"), "cli");
        assert_eq!(stage_name("imageproc::contours"), "imageproc");
    }

    #[test]
    fn repeated_init_is_a_noop() {
        init_with_level(LevelFilter::Warn).expect("first init");
        init_with_level(LevelFilter::Debug).expect("second init");
        log::warn!("logger smoke test");
    }
}
