use std::path::PathBuf;

use anchor_lang::prelude::Pubkey;
use clap::{Parser, ValueEnum};

use crate::instructions::SWITCHBOARD_PROGRAM_ID;

/// Permissionless devnet queue.
pub const DEFAULT_QUEUE: &str = "B4yBQ3hYcjnrNLxUnauJqwpFJnjtm7s8gHybgkAdgXhQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Cluster {
    Devnet,
    #[value(name = "mainnet-beta")]
    MainnetBeta,
    Localnet,
}

impl Cluster {
    pub fn url(self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "create-aggregator")]
#[command(about = "Provision a Switchboard aggregator from a JSON definition", long_about = None)]
pub struct Cli {
    /// Aggregator definition to provision
    #[arg(long, env = "AGGREGATOR_DEFINITION", default_value = "aggregator-definition.json")]
    pub definition_file: PathBuf,

    /// Where the provisioned schema is written
    #[arg(long, env = "AGGREGATOR_OUT_FILE", default_value = "outFile.json")]
    pub out_file: PathBuf,

    /// Oracle queue the aggregator reports to
    #[arg(long, env = "SWITCHBOARD_QUEUE", default_value = DEFAULT_QUEUE)]
    pub queue_key: Pubkey,

    #[arg(long, env = "SOLANA_CLUSTER", value_enum, default_value_t = Cluster::Devnet)]
    pub cluster: Cluster,

    /// Overrides the cluster's public endpoint
    #[arg(long, env = "SOLANA_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Keypair that pays for and owns the created accounts [default: ~/.config/solana/id.json]
    #[arg(long, env = "ANCHOR_WALLET")]
    pub authority_keypair: Option<PathBuf>,

    #[arg(long, env = "SWITCHBOARD_PROGRAM_ID", default_value_t = SWITCHBOARD_PROGRAM_ID)]
    pub program_id: Pubkey,

    /// Overwrite the output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Answer yes to the overwrite prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.cluster.url().to_string())
    }

    pub fn keypair_path(&self) -> PathBuf {
        self.authority_keypair.clone().unwrap_or_else(|| {
            let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
            home.join(".config").join("solana").join("id.json")
        })
    }
}
