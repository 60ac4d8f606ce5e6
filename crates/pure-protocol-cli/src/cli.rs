//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pure protocol registry CLI
#[derive(Parser, Debug)]
#[command(name = "pproto")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered sub type tags and defaults
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Decode a protocol JSON file and print it back in canonical form
    Decode {
        /// JSON file to decode
        file: PathBuf,

        /// Supertype the value belongs to (e.g. DatasourceSpecification)
        #[arg(short, long)]
        supertype: String,

        /// Sub type tags to leave unregistered
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Configure the registry and report conflicts
    Check {
        /// Sub type tags to leave unregistered
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Show version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode() {
        let cli = Cli::parse_from([
            "pproto",
            "decode",
            "conn.json",
            "--supertype",
            "DatasourceSpecification",
            "-e",
            "redshift",
            "-e",
            "static",
        ]);

        match cli.command {
            Commands::Decode {
                file,
                supertype,
                exclude,
            } => {
                assert_eq!(file, PathBuf::from("conn.json"));
                assert_eq!(supertype, "DatasourceSpecification");
                assert_eq!(exclude, vec!["redshift", "static"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_json() {
        let cli = Cli::parse_from(["pproto", "list", "--json"]);
        assert!(matches!(cli.command, Commands::List { json: true }));
    }
}
