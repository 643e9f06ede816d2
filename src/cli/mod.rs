//! CLI module for the credential service

pub mod serve;

use clap::{Args, Parser, Subcommand};

/// Credential Service - account registration and login over HTTP
#[derive(Parser)]
#[command(name = "credential-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to bind, overriding `server.port`
    #[arg(long)]
    pub port: Option<u16>,
}
