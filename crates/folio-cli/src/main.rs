use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_auth::{HostedIdentity, IdentityProvider};
use folio_content::ContentClient;
use folio_core::{load_config, FolioConfig};

#[derive(Parser)]
#[command(name = "folio", version, about = "Terminal portfolio client")]
struct Cli {
    #[arg(long, default_value = "folio.yaml", help = "Path to the config file")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the interactive portfolio")]
    Start,
    #[command(about = "Validate the config file")]
    Validate,
    #[command(about = "List projects from the content store")]
    Projects,
    #[command(about = "List skills from the content store")]
    Skills,
    #[command(about = "Show how the current credentials resolve")]
    Whoami,
    #[command(about = "Show the visit counter for a page")]
    Visits {
        #[arg(default_value = "about", help = "Page name")]
        page: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Start => folio_tui::run_tui(config).await?,
        Commands::Validate => {
            println!(
                "Config valid. Profile '{}', {} social links, relay {}.",
                config.profile.name,
                config.profile.social.len(),
                config.relay.endpoint
            );
        }
        Commands::Projects => list_projects(&config).await?,
        Commands::Skills => list_skills(&config).await?,
        Commands::Whoami => whoami(&config).await?,
        Commands::Visits { page } => visits(&config, &page).await?,
    }

    Ok(())
}

fn client(config: &FolioConfig) -> ContentClient {
    ContentClient::new(
        &config.content.base_url,
        &config.content.anon_key,
        config.content.access_token.clone(),
    )
}

async fn list_projects(config: &FolioConfig) -> Result<()> {
    let projects = client(config).list_projects().await?;
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }
    println!("{:<28} {:<12} {:<40}", "TITLE", "CREATED", "TECHNOLOGIES");
    println!("{}", "-".repeat(80));
    for project in &projects {
        println!(
            "{:<28} {:<12} {:<40}",
            project.title,
            project.created_at.format("%Y-%m-%d"),
            project.technologies.join(", "),
        );
    }
    Ok(())
}

async fn list_skills(config: &FolioConfig) -> Result<()> {
    let skills = client(config).list_skills().await?;
    if skills.is_empty() {
        println!("No skills found.");
        return Ok(());
    }
    println!("{:<20} {:<16} {:<6} {:<14}", "NAME", "CATEGORY", "LEVEL", "BAND");
    println!("{}", "-".repeat(60));
    for skill in &skills {
        println!(
            "{:<20} {:<16} {:<6} {:<14}",
            skill.name,
            skill.category,
            skill.level,
            format!("{:?}", skill.band()),
        );
    }
    Ok(())
}

async fn whoami(config: &FolioConfig) -> Result<()> {
    let provider = Arc::new(HostedIdentity::new(
        &config.content.base_url,
        &config.content.anon_key,
        config.content.access_token.clone(),
    ));
    let session = provider.fetch_session().await?;
    match session.identity {
        Some(identity) => println!(
            "Signed in as {} ({})",
            identity.email.as_deref().unwrap_or("no email"),
            identity.id
        ),
        None => println!("Anonymous session."),
    }
    Ok(())
}

async fn visits(config: &FolioConfig, page: &str) -> Result<()> {
    let count = client(config).count_page_visits(page).await?;
    println!("{count} visits recorded for '{page}'.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_start_subcommand() {
        let cli = Cli::try_parse_from(["folio", "start"]).unwrap();
        assert!(matches!(cli.command, Commands::Start));
    }

    #[test]
    fn parses_validate_with_config_path() {
        let cli = Cli::try_parse_from(["folio", "--config", "/tmp/p.yaml", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate));
        assert_eq!(cli.config, PathBuf::from("/tmp/p.yaml"));
    }

    #[test]
    fn parses_visits_with_default_page() {
        let cli = Cli::try_parse_from(["folio", "visits"]).unwrap();
        match cli.command {
            Commands::Visits { page } => assert_eq!(page, "about"),
            _ => panic!("expected visits subcommand"),
        }
    }

    #[test]
    fn parses_projects_and_skills() {
        assert!(matches!(
            Cli::try_parse_from(["folio", "projects"]).unwrap().command,
            Commands::Projects
        ));
        assert!(matches!(
            Cli::try_parse_from(["folio", "skills"]).unwrap().command,
            Commands::Skills
        ));
    }
}
