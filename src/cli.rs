use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image_fetcher::{config, Downloader, FetchResult};
use url::Url;

const SAMPLE_IMAGE_URLS: [&str; 4] = [
    "https://images.pexels.com/photos/2486168/pexels-photo-2486168.jpeg",
    "https://images.pexels.com/photos/417074/pexels-photo-417074.jpeg",
    "https://images.pexels.com/photos/933964/pexels-photo-933964.jpeg",
    "https://images.pexels.com/photos/206359/pexels-photo-206359.jpeg",
];

const IMAGE_SUFFIXES: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Fetch a single image from a direct URL into a local directory.
#[derive(Debug, Parser)]
#[command(name = "image-fetcher", version)]
#[command(about = "Mindfully collect images from the web", long_about = None)]
pub struct Cli {
    /// Direct image URL. Prompted for when omitted.
    pub url: Option<String>,

    /// Directory to store images in (overrides the config file).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Path to a config.toml (defaults to the XDG config location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug logs.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Runs one fetch and returns whether it succeeded.
    pub fn run(self) -> Result<bool> {
        let mut cfg = config::load(self.config.as_deref())?;
        if let Some(dir) = self.dir {
            cfg.directory = dir;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        print_banner();

        let downloader = Downloader::from_config(&cfg)
            .with_context(|| format!("create {}", cfg.directory.display()))?;
        println!("[OK] {} directory ready", downloader.directory().display());

        println!("\nIMPORTANT: Please provide a DIRECT link to an image file");
        println!("(not a webpage like pexels.com/search/)");

        let url = match self.url {
            Some(url) => url,
            None => prompt_for_url()?,
        };

        let parsed = match validate_url(&url) {
            Some(parsed) => parsed,
            None => {
                println!("[ERROR] Invalid URL format. Please include http:// or https://");
                return Ok(false);
            }
        };

        if looks_like_webpage(&parsed, &url) {
            println!("[WARNING] This looks like a webpage, not a direct image link!");
            println!("Please find a direct image URL by:");
            println!("1. Right-clicking on an image");
            println!("2. Selecting 'Copy image address' or 'Open image in new tab'");
            println!("3. Using that direct URL instead");
        }

        println!("Connecting to {}...", parsed.host_str().unwrap_or_default());

        let result = downloader.download(&url);
        if matches!(&result, Ok(download) if !download.is_image()) {
            println!("[WARNING] URL does not point to a standard image type");
        }

        Ok(render(&FetchResult::from(result)))
    }
}

fn print_banner() {
    println!("{}", "=".repeat(60));
    println!("Welcome to the Ubuntu Image Fetcher");
    println!("A tool for mindfully collecting images from the web");
    println!("{}", "=".repeat(60));
}

fn prompt_for_url() -> Result<String> {
    println!("\nExample direct image URLs:");
    for (i, url) in SAMPLE_IMAGE_URLS.iter().take(2).enumerate() {
        println!("{}. {}", i + 1, url);
    }

    print!("\nPlease enter the DIRECT image URL (or press Enter for demo): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let url = line.trim();
    if url.is_empty() {
        let demo = SAMPLE_IMAGE_URLS[0];
        println!("\nUsing demo URL: {}", demo);
        return Ok(demo.to_string());
    }

    Ok(url.to_string())
}

/// Accepts only URLs with both a scheme and a host.
fn validate_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .host_str()
        .is_some_and(|host| !host.is_empty())
        .then_some(parsed)
}

fn looks_like_webpage(parsed: &Url, url: &str) -> bool {
    let host = parsed.host_str().unwrap_or_default();
    let page_like_host = ["search", "www."].iter().any(|hint| host.contains(hint));
    let image_suffix = IMAGE_SUFFIXES.iter().any(|suffix| url.ends_with(suffix));

    page_like_host && !image_suffix
}

fn render(result: &FetchResult) -> bool {
    match result {
        FetchResult::Success(message) => {
            println!("[SUCCESS] {}", message);
            println!("\nConnection strengthened. Community enriched.");
            true
        }
        FetchResult::Failure(message) => {
            println!("[ERROR] {}", message);
            println!("\nWe apologize for the interruption in our connection.");
            false
        }
    }
}
