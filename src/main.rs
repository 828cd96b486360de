use clap::Parser;
use datastore_import_lib::app::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = app::run(cli).await;
    std::process::exit(code);
}
