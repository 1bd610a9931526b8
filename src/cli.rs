//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};
use std::net::IpAddr;

/// ipecho - what is my IP, with GeoIP/ASN enrichment
#[derive(Parser, Debug)]
#[command(name = "ipecho")]
#[command(version)]
#[command(about = "A tiny what-is-my-IP service with GeoIP/ASN enrichment", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: ./config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Look up an IP address against the local GeoIP databases
    Lookup {
        /// IPv4 or IPv6 address
        ip: IpAddr,

        /// Output format: text, json, jsonp or xml
        #[arg(long, short = 'f')]
        format: Option<String>,

        /// JSONP callback name
        #[arg(long)]
        callback: Option<String>,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output file path (default: stdout)
        output: Option<String>,
    },
}
