use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use locale_gateway::config::{load_config, GatewayConfig};
use locale_gateway::locale::{localize, Locale, LocaleRegistry, UrlLocalizer};
use locale_gateway::routing::{AnyMatcher, LocaleResolver, ResolveRequest};
use locale_gateway::seo::PageMetadata;

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Inspect locale resolution for the locale gateway", long_about = None)]
struct Cli {
    /// Gateway configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path the way the gateway would
    Resolve {
        path: String,
        /// Value of the locale preference cookie
        #[arg(long)]
        cookie: Option<String>,
        /// Raw Accept-Language header
        #[arg(long)]
        accept_language: Option<String>,
    },
    /// Prefix a path with a locale
    Localize { path: String, locale: String },
    /// Strip a leading locale segment
    Delocalize { path: String },
    /// hreflang alternates for a path
    Alternates { path: String },
    /// Canonical, alternates and html lang for a page
    Metadata { path: String, locale: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    let registry = LocaleRegistry::from_config(&config.locales)?;
    let localizer = Arc::new(UrlLocalizer::new(Arc::new(registry), &config.site.url));

    match cli.command {
        Commands::Resolve {
            path,
            cookie,
            accept_language,
        } => {
            let resolver = LocaleResolver::new(
                localizer.clone(),
                AnyMatcher::from_config(&config.exclusions),
            );
            let request = ResolveRequest::from_path_and_query(&path)
                .with_cookie(cookie.as_deref())
                .with_accept_language(accept_language.as_deref());
            print_json(&resolver.resolve(&request))?;
        }
        Commands::Localize { path, locale } => {
            let locale = lookup(&localizer, &locale)?;
            print_json(&json!({ "path": localize(&path, locale) }))?;
        }
        Commands::Delocalize { path } => {
            print_json(&json!({ "path": localizer.delocalize(&path) }))?;
        }
        Commands::Alternates { path } => {
            print_json(&localizer.alternates_for(&path))?;
        }
        Commands::Metadata { path, locale } => {
            let locale = lookup(&localizer, &locale)?;
            print_json(&PageMetadata::new(&localizer, &path, locale))?;
        }
    }

    Ok(())
}

fn lookup<'a>(localizer: &'a UrlLocalizer, code: &str) -> Result<&'a Locale, Box<dyn std::error::Error>> {
    localizer.registry().get(code).ok_or_else(|| {
        let supported: Vec<_> = localizer.registry().locales().map(Locale::code).collect();
        format!("unsupported locale '{code}' (supported: {})", supported.join(", ")).into()
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
