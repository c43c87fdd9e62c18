//! CLI entry point for mdxgen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdxgen")]
#[command(version)]
#[command(about = "A static site generator for MDX-based personal blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Remove generated files
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, slug)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "mdxgen=debug,info"
    } else {
        "mdxgen=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            mdxgen::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { title } => {
            let site = mdxgen::Site::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            site.new_post(&title)?;
        }

        Commands::Generate { watch } => {
            let site = mdxgen::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                mdxgen::commands::generate::watch(&site).await?;
            }
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = mdxgen::Site::new(&base_dir)?;

            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdxgen::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = mdxgen::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = mdxgen::Site::new(&base_dir)?;
            mdxgen::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("mdxgen version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
