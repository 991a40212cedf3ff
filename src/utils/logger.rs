use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
///
/// `--verbose` opens up the flow reducer, which reports every ignored
/// action at debug level, and the notifier adapters. The rest of the crate
/// stays at info so the calendar and slot math do not flood stderr.
pub fn default_directives(verbose: bool) -> String {
    let mut directives = vec!["warn", "booking_core=info"];
    if verbose {
        directives.push("booking_core::core::flow=debug");
        directives.push("booking_core::adapters=debug");
    }
    directives.join(",")
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                // verbose 時顯示 target，方便分辨 flow 與 adapter 的訊息
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .json(), // 給 log 收集器用的結構化輸出
        )
        .init();
}
