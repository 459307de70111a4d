use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::{error, info};

use webserver::{Result, ThreadPool, WebServer};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_QUEUE_SIZE: usize = 64;

#[derive(Parser)]
#[command(name = "webserver", version, about = "A multithreaded static file server")]
struct Cli {
    /// Server listening address
    #[arg(long, default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
    addr: SocketAddr,

    /// Number of worker threads, defaults to the number of CPUs
    #[arg(long, value_name = "N")]
    threads: Option<u32>,

    /// Maximum number of queued connections
    #[arg(long, default_value_t = DEFAULT_QUEUE_SIZE, value_name = "N")]
    queue_size: usize,

    /// Stop after handling this many connections
    #[arg(long, value_name = "N")]
    max_requests: Option<usize>,

    /// Directory to serve files from
    #[arg(long, default_value = ".", value_name = "DIR")]
    root: PathBuf,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let threads = cli.threads.unwrap_or_else(|| num_cpus::get() as u32);

    info!("webserver {}", env!("CARGO_PKG_VERSION"));
    info!("Serving {} on {}", cli.root.display(), cli.addr);
    info!("{} workers, queue capacity {}", threads, cli.queue_size);

    let pool = ThreadPool::new(threads, cli.queue_size)?;
    let server = WebServer::new(cli.root, pool);
    server.run(cli.addr, cli.max_requests)
}
