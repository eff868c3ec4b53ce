//! Command-line interface for ycsb-keygen
//!
//! # Usage Examples
//!
//! ## Batch generation
//! ```bash
//! # workloads.csv:
//! #   workload, keytype
//! #   workloada, monoint
//! #   workloadc, email
//! ycsb-keygen generate workloads.csv \
//!   --ycsb-dir YCSB --workload-dir workload_spec \
//!   --output-dir workloads --corpus list.txt
//! ```
//!
//! ## Single transform
//! ```bash
//! ycsb-keygen transform --load ycsb_load_a --txn ycsb_txn_a \
//!   --key-type email --corpus list.txt \
//!   --out-load workloada_email_load.dat --out-txn workloada_email_txn.dat
//! ```

use clap::{Parser, Subcommand};
use ycsb_keygen::{run_generate, run_transform, GenerateArgs, TransformArgs};

#[derive(Parser)]
#[command(name = "ycsb-keygen")]
#[command(about = "Generate YCSB workloads with randint, monoint or email keys")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run YCSB for every workload in a batch file and write remapped datasets
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Remap previously captured YCSB load and run output
    Transform {
        #[command(flatten)]
        args: TransformArgs,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            run_generate(args).await?;
        }
        Commands::Transform { args } => {
            run_transform(args)?;
        }
    }

    Ok(())
}
