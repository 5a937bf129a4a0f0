use anyhow::Result;
use colored::Colorize;
use folio_application::AppBootstrap;
use folio_core::secret::SecretService;
use folio_infrastructure::ConfigService;

/// Prints where folio keeps its files. With `init`, writes the effective
/// configuration to `config.toml` when no file exists yet.
pub async fn show(
    app: &AppBootstrap,
    config_service: &ConfigService,
    init: bool,
) -> Result<bool> {
    let config_file = config_service.path();
    if init {
        if config_file.exists() {
            println!("{} {} already exists", "✗".red().bold(), config_file.display());
            return Ok(false);
        }
        config_service.save(&app.config)?;
        println!("{} Wrote {}", "✓".green().bold(), config_file.display());
    }

    let secrets = app.secrets();
    let secret_state = if secrets.secret_file_exists().await {
        "present".green()
    } else {
        "missing".yellow()
    };

    println!("config   {}", config_file.display());
    println!("storage  {}", app.storage_file().display());
    println!("secrets  {} ({})", secrets.path().display(), secret_state);
    Ok(true)
}
