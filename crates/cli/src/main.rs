mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use commands::Sources;
use folio_content::IdType;
use folio_content::posts::DEFAULT_POST_LIMIT;
use folio_core::Locale;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "SEO metadata, sitemap and blog data for a bilingual portfolio", long_about = None)]
struct Cli {
    /// Configuration file (default: ./folio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve posts from a JSON file instead of the GraphQL endpoint
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Write a starter folio.toml
    Init {
        /// Directory to write folio.toml into
        path: PathBuf,

        /// Public site URL
        #[arg(long)]
        url: Option<String>,

        /// Site name used in titles
        #[arg(long)]
        name: Option<String>,
    },

    /// Check configuration, CMS connectivity and remote images
    Validate,

    /// Generate sitemap, robots.txt, static params and page metadata
    Build {
        /// Output directory for generated artifacts
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print sitemap.xml
    Sitemap,

    /// Print the blog post pages to pre-render as JSON
    Params,

    /// Print the metadata record for a page
    Meta {
        /// Locale code (ko, en)
        locale: Locale,

        /// Page path below the locale, e.g. /resume or /blog/12
        #[arg(default_value = "")]
        path: String,

        /// Print <head> tags instead of JSON
        #[arg(long)]
        html: bool,
    },

    /// Show a single post
    Post {
        /// Post identifier
        id: String,

        /// Locale used for dates and metadata
        #[arg(short, long, default_value = "ko")]
        locale: Locale,

        /// How to interpret the identifier
        #[arg(long, default_value = "DATABASE_ID")]
        id_type: IdType,
    },

    /// List recent posts
    Posts {
        /// Number of posts
        #[arg(short = 'n', long, default_value_t = DEFAULT_POST_LIMIT)]
        limit: u32,

        /// Cursor returned by a previous listing
        #[arg(long)]
        after: Option<String>,

        /// Locale used for dates
        #[arg(short, long, default_value = "ko")]
        locale: Locale,
    },

    /// Serve generated artifacts locally
    Preview {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let Cli {
        config,
        fixture,
        command,
    } = Cli::parse();
    let load = || Sources::load(config.as_deref(), fixture.as_deref());

    match command {
        Command::Init { path, url, name } => {
            commands::init::run(&path, url.as_deref(), name.as_deref())
        }
        Command::Validate => commands::validate::run(&load()?).await,
        Command::Build { output } => commands::build::run(&load()?, &output).await,
        Command::Sitemap => commands::inspect::sitemap(&load()?).await,
        Command::Params => commands::inspect::params(&load()?).await,
        Command::Meta { locale, path, html } => {
            commands::inspect::meta(&load()?, locale, &path, html).await
        }
        Command::Post { id, locale, id_type } => {
            commands::inspect::post(&load()?, &id, locale, id_type).await
        }
        Command::Posts {
            limit,
            after,
            locale,
        } => commands::inspect::posts(&load()?, limit, after.as_deref(), locale).await,
        Command::Preview { port } => commands::preview::run(load()?, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "folio", &mut io::stdout());
            Ok(())
        }
    }
}
