use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::console::{LineSource, StdinSource};
use crate::providers::create_provider;
use crate::session::SessionLoop;
use crate::workspace::Workspace;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Run {
            prompt,
            provider,
            model,
            temperature,
            workspace,
            base_url,
            yes,
        } => {
            run_session(
                config,
                prompt,
                provider,
                model,
                temperature,
                workspace,
                base_url.as_deref(),
                yes,
            )
            .await
        }
        Commands::Config => {
            println!("config file: {}", config.config_path.display());
            println!(
                "provider:    {}",
                config.default_provider.as_deref().unwrap_or("openai")
            );
            println!(
                "model:       {}",
                config.default_model.as_deref().unwrap_or("gpt-4o-mini")
            );
            println!("temperature: {}", config.default_temperature);
            println!("workspace:   {}", config.workspace_dir.display());
            println!(
                "api key:     {}",
                if config.api_key.is_some() {
                    "set"
                } else {
                    "unset (using environment)"
                }
            );
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_session(
    config: Config,
    prompt: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    temperature_override: Option<f64>,
    workspace_override: Option<PathBuf>,
    base_url: Option<&str>,
    assume_yes: bool,
) -> Result<()> {
    let provider_name = provider_override
        .as_deref()
        .or(config.default_provider.as_deref())
        .unwrap_or("openai");

    let model = model_override
        .as_deref()
        .or(config.default_model.as_deref())
        .unwrap_or("gpt-4o-mini");

    let temperature = temperature_override.unwrap_or(config.default_temperature);
    if !(0.0..=2.0).contains(&temperature) {
        anyhow::bail!("temperature must be within 0.0..=2.0, got {temperature}");
    }

    let provider = create_provider(provider_name, config.api_key.as_deref(), base_url)?;
    info!(provider = provider_name, model, "session starting");

    let workspace_root = workspace_override.unwrap_or(config.workspace_dir);
    let workspace = Workspace::new(workspace_root);

    let mut input = StdinSource::new();
    workspace.bootstrap(&mut input, assume_yes).await?;

    let seed_prompt = match prompt {
        Some(p) => p,
        None => input.read_line("What do you want to create?").await?,
    };
    if seed_prompt.trim().is_empty() {
        anyhow::bail!("nothing to create: the seed prompt is empty");
    }

    let session = SessionLoop::new(provider.as_ref(), &workspace, model, temperature);
    session.run(&seed_prompt).await?;

    println!("Done");
    Ok(())
}
