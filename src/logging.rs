use tracing_subscriber::{
    Layer, Registry, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global subscriber: coloured stdout plus one daily-rotated
/// file per level under `log_dir` (info.log, warn.log, error.log, debug.log)
pub fn init(log_dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let file_layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = [
        ("info.log", LevelFilter::INFO),
        ("warn.log", LevelFilter::WARN),
        ("error.log", LevelFilter::ERROR),
        ("debug.log", LevelFilter::DEBUG),
    ]
    .into_iter()
    .map(|(name, level)| {
        tracing_subscriber::fmt::layer()
            .with_writer(tracing_appender::rolling::daily(log_dir, name))
            .with_ansi(false)
            .with_filter(level)
            .boxed()
    })
    .collect();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(file_layers)
        .with(env_filter)
        .with(console_layer)
        .init();

    Ok(())
}
