use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use plantguide_import::pipelines::parse;
use plantguide_import::store::{load_plants, save_plants, to_json};
use plantguide_import::{enrich_plants, link_images, parse_guide_file, GuideConfig};

/// Extract native plant records from a planting guide and attach images
#[derive(Debug, Parser)]
#[command(name = "plantguide-import", version, about)]
struct Args {
    /// TOML configuration file (defaults to ./plantguide.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the plain-text guide into a plants JSON file
    Parse {
        /// Plain-text rendition of the planting guide
        #[arg(value_name = "GUIDE")]
        guide: PathBuf,

        /// Where to write the plants JSON (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Search, download and link an image for each plant
    Enrich {
        /// Plants JSON file, rewritten in place
        #[arg(value_name = "PLANTS")]
        plants: PathBuf,

        /// Directory holding the downloaded images
        #[arg(short, long, value_name = "DIR")]
        images_dir: PathBuf,

        /// URL cache file (defaults to url_cache.json next to the plants file)
        #[arg(long, value_name = "FILE")]
        cache: Option<PathBuf>,
    },
    /// Link images already on disk to their plants
    Link {
        /// Plants JSON file, rewritten in place
        #[arg(value_name = "PLANTS")]
        plants: PathBuf,

        /// Directory holding the images
        #[arg(short, long, value_name = "DIR")]
        images_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = GuideConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Parse { guide, output } => {
            info!("Parsing native plants from {}", guide.display());
            let plants = parse_guide_file(&guide, &config.parser)?;

            match output {
                Some(path) => {
                    save_plants(&path, &plants)?;
                    println!("Found {} unique native plants", plants.len());
                    println!("Saved to {}", path.display());

                    println!("\nPlants by category:");
                    for (category, count) in parse::category_counts(&plants) {
                        println!("  {}: {}", category, count);
                    }

                    println!("\nSample plants:");
                    for plant in plants.iter().take(15) {
                        println!("  - {}: {}", plant.scientific_name, plant.common_name);
                    }
                }
                None => print!("{}", to_json(&plants)?),
            }
        }
        Command::Enrich {
            plants: plants_path,
            images_dir,
            cache,
        } => {
            let cache_path = cache.unwrap_or_else(|| {
                plants_path
                    .parent()
                    .unwrap_or_else(|| std::path::Path::new("."))
                    .join("url_cache.json")
            });

            let mut plants = load_plants(&plants_path)?;
            println!("Processing {} plants...", plants.len());

            let summary =
                enrich_plants(&mut plants, &images_dir, &cache_path, &config.enrichment).await?;
            save_plants(&plants_path, &plants)?;

            println!("\n=== SUMMARY ===");
            println!("Searched: {}", summary.searched);
            println!("URLs found: {}", summary.found);
            println!("Search errors: {}", summary.search_errors);
            println!("Downloaded: {}", summary.downloaded);
            println!("Failed: {}", summary.failed);
            println!("Skipped (existing): {}", summary.skipped);
            println!("Total plants with images: {}", summary.linked);
        }
        Command::Link {
            plants: plants_path,
            images_dir,
        } => {
            let mut plants = load_plants(&plants_path)?;
            let matched = link_images(&mut plants, &images_dir);
            save_plants(&plants_path, &plants)?;
            println!("Matched {} plants with images", matched);
            println!("Updated {}", plants_path.display());
        }
    }

    Ok(())
}
