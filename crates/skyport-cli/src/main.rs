//! `skyport` binary entry point

#[tokio::main]
async fn main() {
    if let Err(err) = skyport_cli::run().await {
        skyport_cli::report_failure(&err);
        std::process::exit(err.exit_code());
    }
}
