mod blockchain;
mod config;
mod error;
mod report;

use dotenvy::dotenv;
use log::info;

use blockchain::Blockchain;
use config::{Config, OutputFormat};
use error::Result;
use report::ChainReport;

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env()?;
    info!(
        "⛓️ Building ledger (difficulty={} bytes, max_attempts={:?})",
        config.difficulty, config.max_attempts
    );

    let mut bc = Blockchain::new(config.proof_of_work()?);
    bc.append("Hello World!")?;
    bc.append("How are you?")?;
    bc.append("I'm fine!")?;

    print_chain(&bc, config.output)?;
    println!("Blockchain valid: {}", bc.verify());

    // Simulated tampering of a non-terminal block.
    bc.chain[1].data = "How do you feel?".to_string();
    println!("Blockchain valid: {}", bc.verify());

    Ok(())
}

fn print_chain(bc: &Blockchain, output: OutputFormat) -> Result<()> {
    let report = ChainReport::new(bc);
    match output {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
