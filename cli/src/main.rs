use clap::Parser;
use simjudge_cli::cmd::GlobalArgs;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = GlobalArgs::parse();
    app.exec_subcmd().await.unwrap_or_else(|e| {
        // core failures were already reported by the reporter
        let code = match e.downcast_ref::<simjudge_core::Error>() {
            Some(failure) => {
                log::debug!("{} ({}): {:?}", failure.kind(), failure.exit_code(), failure);
                failure.exit_code()
            }
            None => {
                eprintln!("Error: {:?}", e);
                1
            }
        };
        std::process::exit(code);
    });
}
