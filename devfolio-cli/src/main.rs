use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use devfolio::*;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("show", sub_matches)) => show_command(sub_matches).await?,
        Some(("save", sub_matches)) => save_command(sub_matches).await?,
        Some(("upload", sub_matches)) => upload_command(sub_matches).await?,
        Some(("reset", sub_matches)) => reset_command(sub_matches).await?,
        Some(("visit", _)) => visit_command().await?,
        _ => {
            build_cli().print_help()?;
            std::process::exit(1);
        }
    }

    Ok(())
}

fn build_cli() -> Command {
    Command::new("devfolio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and manage portfolio data on the configured storage backend")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Fetch the aggregate and print a summary (or the full document)")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the full document as JSON"),
                ),
        )
        .subcommand(
            Command::new("save")
                .about("Replace the persisted aggregate with a JSON document from disk")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("JSON file holding a complete portfolio document")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload an image and print its retrieval URI")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Image file to upload")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Factory reset: overwrite the aggregate with the built-in default")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("visit")
                .about("Simulate one application boot, recording today's visit"),
        )
}

/// Bind the backend selected in the environment, or explain how to configure
/// one. An unconfigured deployment never attempts a data operation.
fn service_from_env() -> Result<Box<dyn PortfolioService>> {
    let config = BackendConfig::from_env()?;
    match create_service(&config) {
        Some(service) => Ok(service),
        None => anyhow::bail!(
            "no backend configured. Set BACKEND_TYPE to local, firebase or supabase \
             (plus FIREBASE_* or SUPABASE_* connection variables for hosted backends)."
        ),
    }
}

async fn show_command(matches: &ArgMatches) -> Result<()> {
    let service = service_from_env()?;
    let profile = service.get_profile().await?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{} - {}", profile.bio.name, profile.bio.role);
    println!(
        "theme: {:?} ({} mode)",
        profile.settings.theme,
        if profile.settings.dark_mode { "dark" } else { "light" }
    );
    println!("total visits: {}", profile.settings.total_visits());
    println!("visible sections:");
    for section in profile.settings.visible_sections() {
        println!("  {:>2}. {} ({})", section.order, section.name, section.id);
    }
    println!(
        "content: {} projects, {} experiences, {} education entries",
        profile.projects.len(),
        profile.work_experiences.len(),
        profile.education.len()
    );
    Ok(())
}

async fn save_command(matches: &ArgMatches) -> Result<()> {
    let path = PathBuf::from(matches.get_one::<String>("file").unwrap());
    let raw = std::fs::read(&path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let data: PortfolioData = serde_json::from_slice(&raw)
        .with_context(|| format!("'{}' is not a valid portfolio document", path.display()))?;

    let service = service_from_env()?;
    service.update_profile(&data).await?;
    println!("Saved {} to the configured backend", path.display());
    Ok(())
}

async fn upload_command(matches: &ArgMatches) -> Result<()> {
    let path = PathBuf::from(matches.get_one::<String>("file").unwrap());
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("file name is not valid UTF-8")?;

    let service = service_from_env()?;
    let uri = service.upload_image(file_name, &bytes).await?;
    println!("{uri}");
    Ok(())
}

async fn reset_command(matches: &ArgMatches) -> Result<()> {
    if !matches.get_flag("yes") {
        anyhow::bail!("reset discards all content; re-run with --yes to confirm");
    }
    let service = service_from_env()?;
    service.reset_data().await?;
    println!("Portfolio reset to the built-in default");
    Ok(())
}

async fn visit_command() -> Result<()> {
    let service = service_from_env()?;
    let mut markers = SessionMarkers::new();
    let profile = boot(service.as_ref(), &mut markers).await?;
    let today = date_key(chrono_today());
    println!(
        "visits today: {}, total: {}",
        profile.settings.visit_count.get(&today).copied().unwrap_or(0),
        profile.settings.total_visits()
    );
    Ok(())
}

fn chrono_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
