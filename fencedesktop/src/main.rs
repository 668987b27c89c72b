//! fencedesktop: desktop icons grouped into snapping fences
//!
//! Draws the wallpaper fullscreen and lays the desktop's files out in
//! draggable, resizable fences whose edges snap to each other and to the
//! screen.

mod desktop;
mod textures;

use desktop::FencesApp;
use eframe::NativeOptions;
use std::any::Any;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "fencedesktop=info,fencecore=info";

const CRASH_LOG_NAME: &str = "fences-crash.log";

fn main() {
    init_logging();
    install_crash_log(fencecore::storage::config_dir());
    RestartPolicy::from_env().supervise(run_once);
}

/// `RUST_LOG` overrides the default filter
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Panics are logged and appended, with a backtrace when one is captured,
/// to the crash log in `dir`.
fn install_crash_log(dir: PathBuf) {
    std::panic::set_hook(Box::new(move |info| {
        let what = describe_panic(info.payload(), info.location());
        error!(panic = %what, "shell panicked");

        let backtrace = std::backtrace::Backtrace::capture();
        let mut report = what;
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            report.push_str(&format!("\n{}", backtrace));
        }
        if let Err(e) = append_crash_report(&dir, &report) {
            warn!(dir = %dir.display(), error = %e, "crash log not written");
        }
    }));
}

fn describe_panic(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let msg = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    match location {
        Some(at) => format!("{} at {}:{}:{}", msg, at.file(), at.line(), at.column()),
        None => msg.to_string(),
    }
}

/// One timestamped entry per crash, oldest first.
fn append_crash_report(dir: &Path, report: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(CRASH_LOG_NAME);
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "[{}] {}", timestamp, report)?;
    Ok(path)
}

#[derive(Debug, PartialEq)]
enum RunExit {
    Closed,
    Failed(String),
}

fn run_once() -> RunExit {
    match std::panic::catch_unwind(run_desktop) {
        Ok(Ok(())) => RunExit::Closed,
        Ok(Err(e)) => RunExit::Failed(e.to_string()),
        Err(_) => RunExit::Failed("panic".to_string()),
    }
}

/// How often a failed shell is started again.
///
/// Only a shell that is the machine's desktop restarts itself; a development
/// run stops at the first failure so it can be looked at.
#[derive(Debug, Clone, Copy)]
struct RestartPolicy {
    max_restarts: u32,
    delay: Duration,
}

impl RestartPolicy {
    fn from_env() -> Self {
        let max_restarts = if std::env::var_os("FENCES_SESSION_SHELL").is_some() { 5 } else { 0 };
        Self { max_restarts, delay: Duration::from_secs(2) }
    }

    /// Run until the window is closed or the restarts are used up.
    /// Returns how many restarts happened.
    fn supervise(&self, mut run: impl FnMut() -> RunExit) -> u32 {
        let mut restarts = 0;
        loop {
            let reason = match run() {
                RunExit::Closed => {
                    info!("clean shutdown");
                    return restarts;
                }
                RunExit::Failed(reason) => reason,
            };
            if restarts >= self.max_restarts {
                error!(%reason, restarts, "shell failed, not restarting");
                return restarts;
            }
            restarts += 1;
            warn!(%reason, attempt = restarts, of = self.max_restarts, "restarting shell in {:?}", self.delay);
            std::thread::sleep(self.delay);
        }
    }
}

fn run_desktop() -> Result<(), eframe::Error> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Fences")
            .with_decorations(false)
            .with_maximized(true),
        ..Default::default()
    };

    eframe::run_native(
        "fences",
        options,
        Box::new(|cc| {
            fencecore::FenceTheme::default().apply(&cc.egui_ctx);
            Box::new(FencesApp::new(cc))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_restarts: u32) -> RestartPolicy {
        RestartPolicy { max_restarts, delay: Duration::ZERO }
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_restarts_stop_at_limit() {
        let mut runs = 0;
        let restarts = policy(3).supervise(|| {
            runs += 1;
            RunExit::Failed("boom".into())
        });
        assert_eq!((runs, restarts), (4, 3));
    }

    #[test]
    fn test_clean_exit_ends_supervision() {
        let mut runs = 0;
        let restarts = policy(5).supervise(|| {
            runs += 1;
            if runs < 2 {
                RunExit::Failed("boom".into())
            } else {
                RunExit::Closed
            }
        });
        assert_eq!((runs, restarts), (2, 1));
        assert_eq!(policy(0).supervise(|| RunExit::Failed("x".into())), 0);
    }

    #[test]
    fn test_describe_panic_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("disk full"));
        assert_eq!(describe_panic(owned.as_ref(), None), "disk full");
        let number: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(describe_panic(number.as_ref(), None), "unknown panic");

        let here = Location::caller();
        let text = describe_panic(&"oops", Some(here));
        assert!(text.starts_with("oops at "));
        assert!(text.contains("main.rs"));
    }

    #[test]
    fn test_crash_reports_append() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("fences");
        let path = append_crash_report(&nested, "first").unwrap();
        append_crash_report(&nested, "second").unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
    }
}
