//! Module for the CLI.

use crate::input::{parse_batch_hex, read_batch_file};
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn, Level};
use zkbatch_decoder::prelude::{decode_batch, decode_forced_batch, DecodeError, L2Transaction};

/// Decodes Etrog L2 batch data and prints it as JSON.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Verbosity level (0-4)
    #[arg(long, short, help = "Verbosity level (0-4)", action = ArgAction::Count)]
    v: u8,
    /// Hex encoded batch data.
    #[clap(help = "Hex encoded batch data, 0x prefix optional", conflicts_with = "file")]
    data: Option<String>,
    /// Path to a file holding the hex encoded batch data.
    #[clap(long, short, env = "ZKBATCH_FILE", required_unless_present = "data")]
    file: Option<PathBuf>,
    /// Decode a forced batch.
    #[clap(long, help = "Decode a forced batch, without change L2 block markers")]
    forced: bool,
    /// Pretty-print the JSON output.
    #[clap(long)]
    pretty: bool,
    /// Path to write the JSON output to. Defaults to stdout.
    #[clap(long, short, env = "ZKBATCH_OUTPUT")]
    output: Option<PathBuf>,
}

impl Cli {
    /// Initializes telemtry for the application.
    pub(crate) fn init_telemetry(self) -> Result<Self> {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))?;
        Ok(self)
    }

    /// Decodes the batch data and writes it out as JSON.
    pub(crate) fn run(&self) -> Result<()> {
        let data = self.read_input()?;
        debug!(target: "zkbatch", "Read {} bytes of batch data", data.len());

        let json = if self.forced {
            let batch = decode_forced_batch(&data).map_err(report)?;
            info!(
                target: "zkbatch",
                "Decoded forced batch with {} transactions",
                batch.transactions.len()
            );
            log_transactions(batch.transactions.iter());
            self.to_json(&batch)?
        } else {
            let batch = decode_batch(&data).map_err(report)?;
            info!(
                target: "zkbatch",
                "Decoded batch with {} blocks and {} transactions",
                batch.blocks.len(),
                batch.tx_count()
            );
            log_transactions(batch.transactions());
            self.to_json(&batch)?
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, json)
                    .map_err(|e| anyhow!("Error writing {}: {e}", path.display()))?;
                info!(target: "zkbatch", "Wrote decoded batch to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }

    /// Reads the raw batch bytes from the inline data or the input file.
    fn read_input(&self) -> Result<Vec<u8>> {
        match (&self.data, &self.file) {
            (Some(data), _) => parse_batch_hex(data),
            (None, Some(path)) => {
                debug!(target: "zkbatch", "Reading batch data from {}", path.display());
                read_batch_file(path)
            }
            (None, None) => Err(anyhow!("No batch data provided")),
        }
    }

    fn to_json<T: Serialize>(&self, batch: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(batch)
        } else {
            serde_json::to_string(batch)
        };
        json.map_err(|e| anyhow!("Error serializing decoded batch: {e}"))
    }
}

/// Logs a decode error along with its offset.
fn report(err: DecodeError) -> anyhow::Error {
    error!(target: "zkbatch", offset = err.offset(), "Failed to decode batch: {err}");
    anyhow!(err)
}

fn log_transactions<'a>(transactions: impl Iterator<Item = &'a L2Transaction>) {
    for (index, tx) in transactions.enumerate() {
        let efficiency = tx.efficiency_percentage;
        let Some(legacy) = tx.as_legacy() else {
            debug!(target: "zkbatch", "tx {index}: pre-encoded, efficiency {efficiency}");
            continue;
        };
        match legacy.hash() {
            Ok(hash) => debug!(target: "zkbatch", "tx {index}: {hash}, efficiency {efficiency}"),
            Err(e) => warn!(target: "zkbatch", "tx {index}: cannot compute hash: {e}"),
        }
    }
}
