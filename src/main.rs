use bfp_admin::backend::RestClient;
use bfp_admin::cli::{Cli, Commands, LocalAction};
use bfp_admin::commands::{self, ListArgs};
use bfp_admin::config::Config;
use bfp_admin::error::Result;
use bfp_admin::local_store::FileStore;
use bfp_admin::{logging, with_record_type};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::List { kind, search, card, filter, page, export } => {
            let backend = RestClient::from_config(&config)?;
            let args = ListArgs {
                search: &search,
                card: &card,
                filters: &filter,
                page,
                export: export.as_deref(),
            };
            with_record_type!(kind, R => commands::list::<R, _>(&backend, args).await?);
        }

        Commands::Create { kind, json } => {
            let backend = RestClient::from_config(&config)?;
            with_record_type!(kind, R => commands::create::<R, _>(&backend, &json).await?);
        }

        Commands::Update { kind, id, json } => {
            let backend = RestClient::from_config(&config)?;
            with_record_type!(kind, R => commands::update::<R, _>(&backend, &id, &json).await?);
        }

        Commands::Delete { kind, id, yes } => {
            let backend = RestClient::from_config(&config)?;
            with_record_type!(kind, R => commands::delete::<R, _>(&backend, &id, yes).await?);
        }

        Commands::SetStatus { kind, id, status } => {
            let backend = RestClient::from_config(&config)?;
            with_record_type!(kind, R => commands::set_status::<R, _>(&backend, &id, &status).await?);
        }

        Commands::ApproveLeave { id } => {
            let backend = RestClient::from_config(&config)?;
            commands::review_leave(&backend, &id, true).await?;
        }

        Commands::RejectLeave { id } => {
            let backend = RestClient::from_config(&config)?;
            commands::review_leave(&backend, &id, false).await?;
        }

        Commands::Import { kind, file, dry_run } => {
            let backend = RestClient::from_config(&config)?;
            with_record_type!(kind, R => commands::import::<R, _>(&backend, &file, dry_run).await?);
        }

        Commands::Local { action } => {
            let folder = config.local_store_dir();
            match action {
                LocalAction::List { store } => commands::local_list(&FileStore::open(&folder), &store)?,
                LocalAction::Get { store, id } => commands::local_get(&FileStore::open(&folder), &store, &id)?,
                LocalAction::Put { store, json, id } => {
                    commands::local_put(&mut FileStore::open(&folder), &store, &json, id.as_deref())?
                }
                LocalAction::Delete { store, id } => {
                    commands::local_delete(&mut FileStore::open(&folder), &store, &id)?
                }
                LocalAction::Clear => match FileStore::clear(&folder)? {
                    true => println!("✔ local store removed: {}", FileStore::store_path(&folder).display()),
                    false => println!("no local store at {}", FileStore::store_path(&folder).display()),
                },
            }
        }

        Commands::Config { set_url, set_key, set_local_dir, show } => {
            let changed = set_url.is_some() || set_key.is_some() || set_local_dir.is_some();
            if let Some(url) = set_url {
                config.backend_url = Some(url);
            }
            if let Some(key) = set_key {
                config.api_key = Some(key);
            }
            if let Some(dir) = set_local_dir {
                config.local_store_dir = Some(dir);
            }
            if changed {
                config.save()?;
                println!("✔ configuration saved to {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Configuration:");
                println!("  backend URL: {}", config.get_backend_url().unwrap_or_else(|_| "(not set)".into()));
                println!("  API key: {}", if config.get_api_key().is_some() { "set" } else { "not set" });
                println!("  local store: {}", FileStore::store_path(&config.local_store_dir()).display());
            }
        }
    }

    Ok(())
}
