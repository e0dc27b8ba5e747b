use rcreative::{
    logger::{self, LoggerConfig},
    studio::read_image_file,
    Config, CreativeStudio, GeminiClient, PaletteExtractor, ProfileRepository,
};
use std::env;
use std::path::Path;
use std::sync::Arc;

const USAGE: &str = "Usage:
  rcreative generate <objective> [logo_path]
  rcreative refine <image_path> <instruction>
  rcreative palette <image_path>
  rcreative profiles";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    logger::log_config_info(&config);

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["palette", image_path] => {
            let logo = read_image_file(Path::new(image_path)).await?;
            let colors = PaletteExtractor::new(config.extraction).extract_data_url(&logo)?;
            for color in colors {
                println!("{}", color);
            }
        }
        ["profiles"] => {
            let profiles = ProfileRepository::from_config(&config.profiles).list().await?;
            if profiles.is_empty() {
                println!("No saved profiles yet.");
            }
            for profile in profiles {
                println!("{}  {}  ({})", profile.id, profile.name, profile.brief.aspect_ratio);
            }
        }
        ["generate", objective, rest @ ..] if rest.len() <= 1 => {
            let mut studio = open_studio(&config)?;
            studio.set_objective(*objective);
            if let Some(logo_path) = rest.first() {
                if let Err(e) = studio.set_logo_from_file(logo_path).await {
                    log::warn!("Ignoring logo {}: {}", logo_path, e);
                }
            }

            log::info!("🎨 Palette: {}", studio.brief().colors.join(", "));
            if studio.generate().await.is_err() {
                return Err(studio.last_error().unwrap_or("Generation failed").into());
            }
            let path = studio.download(&config.output_dir).await?;
            println!("{}", path.display());
        }
        ["refine", image_path, instruction] => {
            let mut studio = open_studio(&config)?;
            let base = read_image_file(Path::new(image_path)).await?;
            studio.adopt_image(base.parse()?);

            if studio.refine(instruction).await.is_err() {
                return Err(studio.last_error().unwrap_or("Refinement failed").into());
            }
            let path = studio.download(&config.output_dir).await?;
            println!("{}", path.display());
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn open_studio(config: &Config) -> rcreative::Result<CreativeStudio> {
    let client = GeminiClient::new(config.gemini.clone())?;
    log::info!("✅ Gemini client ready ({})", client.image().model());

    Ok(CreativeStudio::new(
        Arc::new(client),
        ProfileRepository::from_config(&config.profiles),
    )
    .with_extractor(PaletteExtractor::new(config.extraction)))
}
