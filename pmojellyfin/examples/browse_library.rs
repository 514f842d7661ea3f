//! Walks a Jellyfin music library from the root down to the first album
//!
//! Usage:
//!   cargo run --example browse_library -- <config.yaml> [item_id]
//!
//! Without item id, the root listing is printed and the first library,
//! artist and album are expanded in turn. With an item id, that item is
//! browsed (or resolved when it is a track).

use pmojellyfin::constants::MEDIA_TYPE_AUDIO;
use pmojellyfin::{JellyfinConfig, JellyfinError, JellyfinSource};
use pmosource::BrowseMediaSource;
use std::env;

fn print_node(node: &BrowseMediaSource) {
    println!(
        "{} [{}] {}",
        node.title,
        node.media_class,
        node.identifier.as_deref().unwrap_or("-")
    );
    for child in node.children() {
        let flag = if child.can_play { "▶" } else { "+" };
        println!(
            "  {} {} ({})",
            flag,
            child.title,
            child.identifier.as_deref().unwrap_or("-")
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <config.yaml> [item_id]", args[0]);
        std::process::exit(1);
    }

    let config = JellyfinConfig::load(&args[1])?;
    let source = JellyfinSource::from_config(&config)?;

    if let Some(id) = args.get(2) {
        match source.browse(Some(id), &[MEDIA_TYPE_AUDIO]).await {
            Ok(node) => print_node(&node),
            Err(JellyfinError::UnsupportedItemType(_)) => {
                let media = source.resolve(id).await?;
                println!("{} ({})", media.url, media.mime_type);
            }
            Err(e) => return Err(e.into()),
        }
        return Ok(());
    }

    let mut node = source.browse(None, &[MEDIA_TYPE_AUDIO]).await?;
    print_node(&node);

    // Library, artist, album
    for _ in 0..3 {
        let Some(next) = node.children().first().and_then(|c| c.identifier.clone()) else {
            break;
        };
        println!();
        node = source.browse(Some(&next), &[MEDIA_TYPE_AUDIO]).await?;
        print_node(&node);
    }

    Ok(())
}
