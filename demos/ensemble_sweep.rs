//! Ensemble Sweep Demo
//!
//! Run with: `cargo run --example ensemble_sweep`
//! Verbose: `RUST_LOG=trueno_ensemble=debug cargo run --example ensemble_sweep`
//!
//! Expands a two-parameter LAMMPS-style sweep into model directories under a
//! scratch experiment root, then passes a result between two entities with
//! the in-memory data exchange client.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use trueno_ensemble::client::{Client, ClientConfig, MemoryDataStore};
use trueno_ensemble::entity::{Ensemble, Entity, FileSet, Node, Orchestrator};
use trueno_ensemble::params::ParameterSet;
use trueno_ensemble::{Generator, GeneratorConfig};

const INPUT_TEMPLATE: &str = "\
units        metal
thermo       ;THERMO;
run          ;STEPS;
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Trueno-Ensemble Sweep Demo ===\n");

    let scratch = tempfile::tempdir().context("create scratch directory")?;
    let inputs = scratch.path().join("inputs");
    write_inputs(&inputs)?;

    demo_generate(scratch.path(), &inputs)?;
    demo_data_exchange()?;

    println!("All demos completed successfully!");
    Ok(())
}

fn write_inputs(inputs: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(inputs).context("create inputs directory")?;
    fs::write(inputs.join("in.atm"), INPUT_TEMPLATE).context("write input template")?;
    fs::write(inputs.join("Cu_u3.eam"), "# potential\n").context("write potential")?;
    Ok(())
}

fn demo_generate(root: &Path, inputs: &Path) -> anyhow::Result<()> {
    println!("1. Generate Experiment");
    println!("   -------------------");

    let config = GeneratorConfig::from_json_str(r#"{"overwrite": true, "strategy": "all_perm"}"#)?;
    let generator = Generator::from_config(&config)?;

    let params = ParameterSet::new()
        .with("STEPS", [10, 15, 20])
        .with("THERMO", [5, 10]);
    let mut sweep = Ensemble::new("atm", params);
    sweep.attach_generator_files(
        FileSet::builder()
            .tagged(inputs.join("in.atm"))
            .link(inputs.join("Cu_u3.eam"))
            .build()?,
    );
    let mut post = Node::new("post_process");
    let mut orc = Orchestrator::default();

    let exp = root.join("lammps_atm");
    let report = generator.generate(
        &exp,
        std::slice::from_mut(&mut sweep),
        std::slice::from_mut(&mut post),
        Some(&mut orc),
        &config.strategy_options,
    )?;

    println!("   Generated {} models under {}", report.model_count(), exp.display());
    for model in sweep.models() {
        let dir = model.path().context("model has no directory")?;
        let rendered = fs::read_to_string(dir.join("in.atm"))?;
        let thermo = rendered.lines().nth(1).unwrap_or_default();
        println!("   {:<8} {}", model.name(), thermo.trim());
    }
    println!();
    println!("{}", report.to_json_pretty()?);
    println!();
    Ok(())
}

fn demo_data_exchange() -> anyhow::Result<()> {
    println!("2. Data Exchange");
    println!("   -------------");

    let store = Arc::new(MemoryDataStore::new());
    let mut producer = Client::new("atm_0", ClientConfig::default());
    producer.register_outgoing("orchestrator", Arc::clone(&store));
    let mut consumer = Client::new("post_process", ClientConfig::default());
    consumer.register_incoming("atm_0", Arc::clone(&store));

    producer.send_data("energy", b"-3.54".to_vec())?;
    println!("   SEND atm_0_energy = -3.54");

    for (source, value) in consumer.get_data("energy", true)? {
        let value = value.map(|v| String::from_utf8_lossy(&v).to_string());
        println!("   GET  {source}: {value:?}");
    }
    println!();
    Ok(())
}
