//! Converts a Markdown file into a Google Slides deck.
//!
//! Usage: cargo run --example convert_markdown --features yup-oauth2 -- <FILE.md> [PRESENTATION_ID]
//!
//! Without a presentation id a new deck is created (copied from the
//! front matter `theme` when set). `IMAGE_BASE_URL` publishes local images
//! from a directory already served at that URL.

#[cfg(feature = "yup-oauth2")]
use anyhow::Context;

#[cfg(feature = "yup-oauth2")]
use md2gslides::{
    images::HostedFileRenderer, ConversionOptions, ImageRenderer, NoRenderer, SlideGenerator,
    SlidesClient, Target,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    #[cfg(feature = "yup-oauth2")]
    {
        dotenvy::dotenv().ok();

        let args: Vec<String> = std::env::args().collect();
        if args.len() < 2 {
            eprintln!("Usage: cargo run --example convert_markdown --features yup-oauth2 -- <FILE.md> [PRESENTATION_ID]");
            eprintln!(
                "Ensure GOOGLE_APPLICATION_CREDENTIALS is set in your environment or .env file."
            );
            return Ok(());
        }
        let markdown = std::fs::read_to_string(&args[1])
            .with_context(|| format!("reading {}", args[1]))?;
        let target = match args.get(2) {
            Some(id) => Target::Existing(id.clone()),
            None => Target::New,
        };

        let hosted = match std::env::var("IMAGE_BASE_URL") {
            Ok(base) => Some(HostedFileRenderer::new(&base)?),
            Err(_) => None,
        };
        let renderer: &dyn ImageRenderer = match &hosted {
            Some(hosted) => hosted,
            None => &NoRenderer,
        };

        let client = SlidesClient::from_service_account(reqwest::Client::new()).await?;
        let generator = SlideGenerator::new(client, ConversionOptions::default());
        let report = generator.generate(&markdown, target, renderer).await?;

        log::info!(
            "Wrote {} slides with {} requests",
            report.slides,
            report.requests
        );
        println!("{}", report.edit_url());
    }

    #[cfg(not(feature = "yup-oauth2"))]
    eprintln!("This example needs the yup-oauth2 feature.");

    Ok(())
}
