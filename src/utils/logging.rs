use tracing::Level;

pub fn setup_tracing(level: Level) {
    // a second call keeps the subscriber already installed
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .without_time()
        // stdout carries command output
        .with_writer(std::io::stderr)
        .json()
        .try_init();
}
