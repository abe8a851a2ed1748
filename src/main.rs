//! CLI entry point for inkpress

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::helpers::{normalize_post_data, post_url};
use inkpress::{ContentConfig, Post};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "Query blog posts from a markdown collection or a hosted CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// YAML config file (environment variables override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content provider, overriding configuration (markdown or remote)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all posts, newest first
    Posts {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List posts in a category
    Category {
        name: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Post {
        category: String,
        slug: String,

        /// Print the rendered HTML
        #[arg(short, long)]
        render: bool,
    },

    /// List distinct categories
    Categories {
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Show the content provider in use
    Provider,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Version = cli.command {
        println!("inkpress version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let file_config = match &cli.config {
        Some(path) => ContentConfig::load(base_dir.join(path))
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => ContentConfig::default(),
    };
    let mut config = file_config
        .with_overrides(|key| std::env::var(key).ok())
        .rebase(&base_dir);
    if let Some(provider) = cli.provider {
        config.provider = Some(provider);
    }

    let adapter = inkpress::init_content_adapter(&config)?;

    match cli.command {
        Commands::Posts { json } => {
            let posts = inkpress::get_all_posts().await?;
            print_posts(&posts, json)?;
        }

        Commands::Category { name, json } => {
            let posts = inkpress::get_posts_by_category(&name).await?;
            print_posts(&posts, json)?;
        }

        Commands::Post {
            category,
            slug,
            render,
        } => match inkpress::get_post_by_slug(&category, &slug).await? {
            Some(post) if render => {
                let rendered = post.render().await?;
                println!("{}", rendered.content);
            }
            Some(post) => {
                println!("{}", serde_json::to_string_pretty(&post)?);
            }
            None => {
                anyhow::bail!("No post {:?} in category {:?}", slug, category);
            }
        },

        Commands::Categories { json } => {
            let categories = inkpress::get_distinct_categories().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                println!("Categories ({}):", categories.len());
                for category in categories {
                    println!("  {}", category);
                }
            }
        }

        Commands::Provider => {
            println!("{}", adapter.kind());
        }

        // Printed before configuration is loaded
        Commands::Version => {}
    }

    Ok(())
}

fn print_posts(posts: &[Post], json: bool) -> Result<()> {
    if json {
        let summaries: Vec<_> = posts.iter().map(normalize_post_data).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}] {}",
            post.data.date.format("%Y-%m-%d"),
            post.data.title,
            post_url(post),
            post.reading_time.text
        );
    }
    Ok(())
}
