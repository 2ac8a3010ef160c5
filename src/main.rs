//! CLI entry point for alxblg

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "alxblg")]
#[command(version)]
#[command(about = "A simple blog generator CLI", long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog project
    Init {
        /// Project name; creates a sub-directory and uses it as the site title
        project_name: Option<String>,

        /// Target directory for the project
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,
    },

    /// Build the static blog site
    Build {
        /// Source directory
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: PathBuf,
    },

    /// Start a development server
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "public")]
        directory: PathBuf,

        /// Watch for changes and rebuild automatically
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "alxblg=debug,info"
    } else {
        "alxblg=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;

    match cli.command {
        Commands::Init {
            project_name,
            directory,
        } => {
            let mut target_dir = cwd.join(directory);
            if let Some(name) = &project_name {
                target_dir.push(name);
            }
            println!("Initializing new blog project in {}...", target_dir.display());
            alxblg::commands::init::init_site(&target_dir, project_name.as_deref())?;

            println!("\nBlog project initialized successfully!");
            println!("\nNext steps:");
            println!("1. Edit blog.config.json to customize your blog");
            println!("2. Add more posts to content/posts/");
            println!("3. Run \"alxblg build\" to generate your blog");
            println!("4. Run \"alxblg serve\" to start the development server");
        }

        Commands::Build { source, output } => {
            let blog = alxblg::Blog::new(cwd.join(source), cwd.join(output));
            let summary = blog.build()?;

            println!("Blog built successfully!");
            println!("Output: {}", summary.output_dir.display());
            println!("Generated {} posts", summary.post_count);
            if summary.pages_written != summary.post_count {
                println!(
                    "Wrote {} post pages ({} shadowed by a duplicate slug)",
                    summary.pages_written,
                    summary.post_count - summary.pages_written
                );
            }
        }

        Commands::Serve {
            port,
            directory,
            watch,
        } => {
            alxblg::server::start(&cwd.join(directory), port, watch).await?;
        }
    }

    Ok(())
}
