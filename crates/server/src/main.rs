//! Manaclash Server Binary
//!
//! Runs the HTTP server for hosting live combat rooms.
//! Supports WebSocket connections for real-time play.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "manaclash combat server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to listen on.
    #[arg(long, default_value_t = 8888)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    mcl_core::log();
    mcl_core::kys();
    mcl_server::run((args.host, args.port)).await.unwrap();
}
