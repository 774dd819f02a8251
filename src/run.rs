//! Application execution logic.
//!
//! This module wires the configured listing source and lookup backend into
//! the status service, then drives it from stdin, an optional refresh timer
//! and OS shutdown signals.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use shownet::config::{LookupBackend, ValidatedConfig};
use shownet::lookup::{Backend, CommandLookup, LookupError, PublicIpResolver, ReqwestLookup};
use shownet::network::CommandSource;
use shownet::status::{MenuSnapshot, ServiceStopped, StatusHandle, StatusService, WatchSink};

use crate::display::{OutputFormat, TerminalDisplay, format_copy, format_snapshot};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The lookup backend could not be built.
    #[error("Failed to set up public address lookup: {0}")]
    LookupSetup(#[source] LookupError),

    /// The status service stopped before the application did.
    #[error("Status service stopped unexpectedly")]
    ServiceStopped,

    /// The status service task panicked or was cancelled.
    #[error("Status service task failed: {0}")]
    ServiceTask(#[source] tokio::task::JoinError),

    /// Reading commands from stdin failed.
    #[error("Failed to read commands from stdin: {0}")]
    Input(#[source] std::io::Error),
}

impl From<ServiceStopped> for RunError {
    fn from(_: ServiceStopped) -> Self {
        Self::ServiceStopped
    }
}

/// A command typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserAction {
    Refresh,
    Copy(usize),
    Quit,
}

/// Parses one line of user input.
///
/// Blank lines and unknown words yield `None`.
fn parse_action(line: &str) -> Option<UserAction> {
    let word = line.trim();
    match word.to_ascii_lowercase().as_str() {
        "" => None,
        "r" | "refresh" => Some(UserAction::Refresh),
        "q" | "quit" | "exit" => Some(UserAction::Quit),
        other => {
            let index = other.parse().ok();
            if index.is_none() {
                tracing::warn!("Unknown command '{word}' (use r, q or a row number)");
            }
            index.map(UserAction::Copy)
        }
    }
}

/// Runtime options extracted from validated config.
struct RuntimeOptions {
    format: OutputFormat,
    refresh_interval: Option<Duration>,
    once: bool,
}

impl RuntimeOptions {
    /// Whether end of input ends the run.
    ///
    /// With periodic refresh the menu keeps updating without input, so
    /// only a shutdown signal stops it.
    const fn stops_at_end_of_input(&self) -> bool {
        self.refresh_interval.is_none()
    }
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            format: OutputFormat::from_json_flag(config.json),
            refresh_interval: config.refresh_interval,
            once: config.once,
        }
    }
}

/// Builds the lookup backend selected in the config.
fn create_backend(config: &ValidatedConfig) -> Result<Backend, LookupError> {
    match config.lookup_backend {
        LookupBackend::Curl => Ok(Backend::Command(
            CommandLookup::new(config.curl_command.clone(), config.lookup_url.clone())
                .with_timeout(config.lookup_timeout),
        )),
        LookupBackend::Http => {
            ReqwestLookup::with_timeout(config.lookup_url.clone(), config.lookup_timeout)
                .map(Backend::Http)
        }
    }
}

/// Executes the application.
///
/// With `--once` a single cycle runs and its final menu is printed.
/// Otherwise the menu is printed on every change until `q`, end of input,
/// or a shutdown signal.
///
/// # Errors
///
/// Returns an error if:
/// - The lookup backend cannot be built
/// - Reading stdin fails
/// - The status service stops unexpectedly
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real stdin and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);

    let source = CommandSource::new(config.listing_command.clone());
    let backend = create_backend(&config).map_err(RunError::LookupSetup)?;
    let resolver = PublicIpResolver::new(backend).with_timeout(config.lookup_timeout);

    tracing::info!("Reading interfaces from {}", source.program().display());
    tracing::info!(
        "Looking up public addresses via {} ({}, {}s limit)",
        config.lookup_backend,
        config.lookup_url,
        resolver.timeout().as_secs()
    );

    if options.once {
        run_once(source, resolver, options.format).await
    } else {
        run_interactive(source, resolver, &options).await
    }
}

/// Runs one cycle and prints the final menu.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_once(
    source: CommandSource,
    resolver: PublicIpResolver<Backend>,
    format: OutputFormat,
) -> Result<(), RunError> {
    let (sink, rx) = WatchSink::new();
    let (service, handle) = StatusService::new(source, resolver, sink);
    let service_task = tokio::spawn(service.run());

    handle.refresh()?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let outcome = tokio::select! {
        biased;

        () = &mut shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(None)
        }

        snapshot = wait_for_complete(rx) => snapshot.map(Some),
    };

    let _ = handle.quit();
    service_task.await.map_err(RunError::ServiceTask)?;

    if let Some(snapshot) = outcome? {
        println!("{}", format_snapshot(&snapshot, format));
    }
    Ok(())
}

/// Waits until the published menu is final.
async fn wait_for_complete(
    mut rx: tokio::sync::watch::Receiver<MenuSnapshot>,
) -> Result<MenuSnapshot, RunError> {
    rx.wait_for(MenuSnapshot::is_complete)
        .await
        .map(|snapshot| snapshot.clone())
        .map_err(|_| RunError::ServiceStopped)
}

/// Runs the interactive loop on stdin.
///
/// Excluded from coverage - requires stdin and signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_interactive(
    source: CommandSource,
    resolver: PublicIpResolver<Backend>,
    options: &RuntimeOptions,
) -> Result<(), RunError> {
    let sink = TerminalDisplay::new(std::io::stdout(), options.format);
    let (service, handle) = StatusService::new(source, resolver, sink);
    let service_task = tokio::spawn(service.run());

    if options.format == OutputFormat::Text {
        eprintln!("Commands: r = refresh, <row> = copy, q = quit");
    }
    handle.refresh()?;

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    let mut ticker = options.refresh_interval.map(refresh_ticker);
    if let Some(interval) = options.refresh_interval {
        tracing::info!("Refreshing every {}s", interval.as_secs());
    }

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    let mut input_open = true;

    let outcome = loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                break Ok(());
            }

            () = next_tick(&mut ticker) => {
                tracing::debug!("Periodic refresh");
                if let Err(e) = handle.refresh() {
                    break Err(e.into());
                }
            }

            line = lines.next(), if input_open => match line {
                Some(Ok(line)) => match parse_action(&line) {
                    Some(UserAction::Quit) => break Ok(()),
                    Some(action) => {
                        if let Err(e) = perform(&handle, action, options.format).await {
                            break Err(e);
                        }
                    }
                    None => {}
                },
                Some(Err(e)) => break Err(RunError::Input(e)),
                None if options.stops_at_end_of_input() => {
                    tracing::debug!("End of input, stopping...");
                    break Ok(());
                }
                None => {
                    tracing::info!("End of input, refreshing until a shutdown signal");
                    input_open = false;
                }
            },
        }
    };

    let _ = handle.quit();
    service_task.await.map_err(RunError::ServiceTask)?;
    outcome
}

/// Carries out a refresh or copy request.
async fn perform(
    handle: &StatusHandle,
    action: UserAction,
    format: OutputFormat,
) -> Result<(), RunError> {
    match action {
        UserAction::Refresh => handle.refresh()?,
        UserAction::Copy(index) => {
            let text = handle.copy(index).await;
            println!("{}", format_copy(index, text.as_deref(), format));
        }
        UserAction::Quit => handle.quit()?,
    }
    Ok(())
}

/// Creates a ticker whose first tick is one full period away.
fn refresh_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Completes on the next tick, or never when periodic refresh is off.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is simply never observed.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
