use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use iioscan::hal::DeviceProfile;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iioscan")]
#[command(about = "Inspect IIO scan-element channel layouts")]
#[command(version)]
struct Cli {
    /// JSON device profile listing the channels to decode
    profile: PathBuf,

    /// Raw interleaved capture to decode with the profile's layout
    #[arg(short, long)]
    capture: Option<PathBuf>,

    /// Samples to print per channel
    #[arg(short, long, default_value_t = 8)]
    limit: usize,
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let cli = Cli::parse();

    let profile = DeviceProfile::load(&cli.profile)?;
    let registry = profile.build_registry()?;

    println!("Device {}", profile.name);
    println!("================================");
    for layout in registry.ordered_channels() {
        println!("{}\n", layout);
    }

    let Some(capture) = cli.capture else {
        return Ok(());
    };

    let buffer = fs::read(&capture).context(format!("Failed to read capture {:?}", capture))?;
    let decoded = registry.deinterleave(&buffer)?;
    info!(
        bytes = buffer.len(),
        frames = buffer.len() / registry.frame_byte_width()?,
        "decoded capture"
    );

    for channel in &decoded {
        let layout = registry.get_channel(&channel.name)?;
        let normalized = channel.normalized(&layout.format);
        println!("[{}] {}", channel.stream_index, channel.name);
        for (raw, scaled) in channel.values.iter().zip(&normalized).take(cli.limit) {
            println!("  {:>12}  {:+.6}", raw, scaled);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_plain_level() {
        assert_eq!(
            log_filter(Some("debug".to_string())).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("warn".to_string())).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
