use anyhow::{anyhow, Context};
use clap::Parser;
use solana_sdk::signature::read_keypair_file;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use feed_provisioner::config::Cli;
use feed_provisioner::store::{FixedAnswer, OverwritePrompt, TerminalPrompt};
use feed_provisioner::{
    create_aggregator_from_definition, load_aggregator_definition, save_aggregator_schema,
    OracleQueueAccount, SwitchboardRpc,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let definition = load_aggregator_definition(&cli.definition_file)?.ok_or_else(|| {
        anyhow!(
            "failed to load aggregator definition from {}",
            cli.definition_file.display()
        )
    })?;

    let keypair_path = cli.keypair_path();
    let payer = read_keypair_file(&keypair_path)
        .map_err(|err| anyhow!("failed to read keypair {}: {err}", keypair_path.display()))?;

    info!("######## Switchboard Setup ########");
    let rpc_url = cli.rpc_url();
    info!(%rpc_url, program = %cli.program_id, queue = %cli.queue_key, "connecting");
    let ledger = SwitchboardRpc::new(rpc_url, payer, cli.program_id);
    let queue = OracleQueueAccount::new(cli.queue_key);

    let schema = create_aggregator_from_definition(&ledger, &definition, &queue)
        .await
        .context("aggregator provisioning failed")?;
    info!("Aggregator created successfully");

    let prompt: Box<dyn OverwritePrompt> = if cli.yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(TerminalPrompt)
    };
    save_aggregator_schema(&schema, &cli.out_file, cli.force, prompt.as_ref())?;
    Ok(())
}
