//! hftpd - A Line-Oriented File Transfer Protocol Server
//!
//! This is the main entry point for the hftpd server.
//! It sets up the TCP listener and the served-root file store, and spawns
//! one handler task per incoming connection.

use hftpd::commands::CommandHandler;
use hftpd::connection::{handle_connection, ConnectionStats};
use hftpd::storage::FileStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
    /// Directory whose files are served
    directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: hftpd::DEFAULT_HOST.to_string(),
            port: hftpd::DEFAULT_PORT,
            directory: hftpd::DEFAULT_ROOT.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    if i + 1 < args.len() {
                        config.host = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --host requires a value");
                        std::process::exit(1);
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        config.port = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --port requires a value");
                        std::process::exit(1);
                    }
                }
                "--directory" | "-d" => {
                    if i + 1 < args.len() {
                        config.directory = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --directory requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("hftpd version {}", hftpd::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn print_help() {
    println!(
        r#"
hftpd - A Line-Oriented File Transfer Protocol Server

USAGE:
    hftpd [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Host to bind to (default: 0.0.0.0)
    -p, --port <PORT>        Port to listen on (default: 19500)
    -d, --directory <DIR>    Directory to serve (default: testdata)
    -v, --version            Print version information
        --help               Print this help message

EXAMPLES:
    hftpd                            # Serve ./testdata on 0.0.0.0:19500
    hftpd --port 19501               # Listen on a different port
    hftpd --directory /srv/files     # Serve another directory

CONNECTING:
    Any line client works, for example netcat (note the CRLF line endings):
    $ nc localhost 19500
    get_file_listing
    0 OK
    a.txt
    b.bin
"#
    );
}

fn print_banner(config: &Config) {
    println!(
        r#"
        ██╗  ██╗███████╗████████╗██████╗ ██████╗
        ██║  ██║██╔════╝╚══██╔══╝██╔══██╗██╔══██╗
        ███████║█████╗     ██║   ██████╔╝██║  ██║
        ██╔══██║██╔══╝     ██║   ██╔═══╝ ██║  ██║
        ██║  ██║██║        ██║   ██║     ██████╔╝
        ╚═╝  ╚═╝╚═╝        ╚═╝   ╚═╝     ╚═════╝

hftpd v{} - Line-Oriented File Transfer Protocol Server
──────────────────────────────────────────────────────────────
Serving {} on {}
Ready to accept connections.

Use Ctrl+C to shutdown gracefully.
"#,
        hftpd::VERSION,
        config.directory,
        config.bind_address()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Print the banner
    print_banner(&config);

    // Open the served root, creating it if absent (shared across connections)
    let store = Arc::new(FileStore::new(&config.directory)?);
    info!("Serving directory {}", config.directory);

    // Create connection statistics
    let stats = Arc::new(ConnectionStats::new());

    // Bind the TCP listener
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, store, stats) => {}
        _ = shutdown => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(listener: TcpListener, store: Arc<FileStore>, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                // Create a command handler for this connection
                let handler = CommandHandler::new(Arc::clone(&store));
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
