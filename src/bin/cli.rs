//! kvs-client CLI
//!
//! Sends one command to the key-value service and prints the reply.
//! Status lines go to stdout; logs go to stderr (`RUST_LOG`).

use clap::{Parser, Subcommand};
use kvsclient::config::{DEFAULT_COMMAND, DEFAULT_RECV_BUFFER_SIZE};
use kvsclient::{Client, ClientConfig, ClientError, Command, Endpoint, Result, WriteMode};
use tracing_subscriber::{fmt, EnvFilter};

/// kvs-client CLI
#[derive(Parser, Debug)]
#[command(name = "kvs-client")]
#[command(about = "Send one command to a key-value service and print the reply")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:2000")]
    server: Endpoint,

    /// Receive buffer size in bytes; longer replies are truncated
    #[arg(short, long, default_value_t = DEFAULT_RECV_BUFFER_SIZE)]
    buffer_size: usize,

    /// Fail instead of retrying when the command is only partially written
    #[arg(long)]
    single_write: bool,

    /// Connect timeout in milliseconds (0 = wait indefinitely)
    #[arg(long, default_value_t = 0)]
    connect_timeout_ms: u64,

    /// Read timeout in milliseconds (0 = wait indefinitely)
    #[arg(long, default_value_t = 0)]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = wait indefinitely)
    #[arg(long, default_value_t = 0)]
    write_timeout_ms: u64,

    /// Command to send (defaults to "set teacher King")
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Expire the key after this many seconds
        ttl: Option<u64>,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Send the given words verbatim, joined by spaces
    Raw {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

impl Commands {
    fn into_command(self) -> Command {
        match self {
            Commands::Get { key } => Command::get(key),
            Commands::Set { key, value, ttl: None } => Command::set(key, value),
            Commands::Set { key, value, ttl: Some(ttl) } => Command::set_with_ttl(key, value, ttl),
            Commands::Del { key } => Command::del(key),
            Commands::Raw { words } => Command::raw(words.join(" ")),
        }
    }
}

fn main() {
    // Logs must not mix with the status lines on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        report(&e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let write_mode = if args.single_write {
        WriteMode::SingleAttempt
    } else {
        WriteMode::All
    };

    let config = ClientConfig::builder()
        .endpoint(args.server)
        .recv_buffer_size(args.buffer_size)
        .write_mode(write_mode)
        .connect_timeout_ms(args.connect_timeout_ms)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build()?;

    let command = match args.command {
        Some(command) => command.into_command(),
        None => Command::parse(DEFAULT_COMMAND)?,
    };

    let client = Client::new(config)?;
    tracing::debug!("kvs-client v{} -> {}", kvsclient::VERSION, client.config().endpoint);

    let exchange = client.execute_with(&command, |wire, _| println!("send msg: {}", wire))?;
    let response = &exchange.response;

    println!("recv msg: {}", response.text());

    if response.fills_buffer() {
        tracing::warn!(
            "Reply filled the {}-byte buffer and may be truncated",
            response.capacity()
        );
    }
    tracing::debug!("Reply: {:?}", exchange.reply());

    Ok(())
}

/// Print a diagnostic naming the failed step
fn report(error: &ClientError) {
    match error.stage() {
        Some(stage) => println!("{} failed: {}", stage, error),
        None => println!("error: {}", error),
    }
}
