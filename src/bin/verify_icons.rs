use anyhow::{Context, Result};
use funnel_icons::icon_gen::{check_icon, icon_filename, DEFAULT_SIZES};
use image::io::Reader as ImageReader;
use std::path::PathBuf;

fn main() -> Result<()> {
    let dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));

    println!("Checking funnel icons in: {}", dir.display());

    let mut failures = 0;
    for size in DEFAULT_SIZES {
        let filename = icon_filename(size);
        let path = dir.join(&filename);

        let img = ImageReader::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode {}", path.display()))?;

        match check_icon(&img.to_rgba8(), size) {
            Ok(()) => println!("  ✓ {filename} ({size}x{size})"),
            Err(err) => {
                println!("  ⚠ {filename}: {err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} icons failed verification", DEFAULT_SIZES.len());
    }

    println!("✓ All icons look right");
    Ok(())
}
