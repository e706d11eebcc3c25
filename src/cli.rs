use clap::Parser;

/// Serve the current directory over HTTP with permissive CORS headers.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TCP port to listen on [default: 8000]
    pub port: Option<u16>,
}
