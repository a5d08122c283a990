mod cli;

use tfinv::inventory::ScaledInstances;
use tfinv::outputs::Outputs;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("TFINV_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    if let Err(e) = run(cli) {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let environment = cli.environment;

    let outputs = Outputs::read(&environment.terraform_dir())?;

    let instances = enumerate(&outputs);
    let document = tfinv::inventory::build(&outputs, &instances, environment, &cli.service);

    let inventory_path = cli
        .output
        .unwrap_or_else(|| environment.inventory_path());
    tfinv::write::write_document(&document, &inventory_path, None)?;

    let variables = tfinv::vars::project(&outputs);
    tfinv::write::write_document(
        &variables,
        &environment.vars_path(),
        Some(tfinv::vars::VARS_HEADER),
    )?;

    tfinv::secrets::scaffold(&environment.secrets_path(), environment)?;

    Ok(())
}

/// Fetch scale set members for the scaled roles named in the outputs.
///
/// With the composite `ansible_inventory` output present the role groups are
/// mirrored from the tree instead, so no enumeration is needed.
fn enumerate(outputs: &Outputs) -> ScaledInstances {
    if outputs.get("ansible_inventory").is_some() {
        tracing::info!("composite inventory output present, skipping scale set enumeration");
        return ScaledInstances::default();
    }

    let Some(resource_group) = outputs.get_str("resource_group_name") else {
        return ScaledInstances::default();
    };

    let fetch = |vmss_key: &str| {
        outputs
            .get_str(vmss_key)
            .map(|vmss_name| tfinv::vmss::list_instances(resource_group, vmss_name))
            .unwrap_or_default()
    };

    ScaledInstances::new(fetch("web_vmss_name"), fetch("worker_vmss_name"))
}
