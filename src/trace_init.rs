#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Install the global subscriber once.
///
/// With `log_dir` events go to `andaluh-trace.jsonl` there as JSON lines;
/// without it they are written to stderr. `RUST_LOG` overrides the default
/// `andaluh=debug` filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("andaluh=debug"));
        match log_dir {
            Some(dir) => {
                // Blocking writer: the CLI exits right after its last event.
                let file_appender = tracing_appender::rolling::never(dir, "andaluh-trace.jsonl");
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_env_filter(filter)
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_env_filter(filter)
                    .init();
            }
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&std::path::Path>) {}
