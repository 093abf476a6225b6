use std::io::Write;

/// Install the global logger. `RUST_LOG`, when set, overrides `level`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(level: Option<&str>) {
    // default level is info
    let level = level
        .and_then(|l| l.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);

    let _ = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .try_init();
}
