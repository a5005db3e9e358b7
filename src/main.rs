use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixelcam::models::{Settings, NO_PALETTE};
use pixelcam::rendering::{decode_png, encode_png, pixelate, PixelateOptions};
use pixelcam::services::{
    check_custom_name, parse_color, parse_color_list, resolve_active_palette,
    sync_custom_palettes, JsonFileStore, SettingsStore,
};
use retro_palette::{PaletteRegistry, Quantizer};

const DEFAULT_SETTINGS_FILE: &str = "pixelcam.json";

#[derive(Parser)]
#[command(name = "pixelcam")]
#[command(about = "Pixelcam - retro palette pixelation filter")]
struct Cli {
    /// Settings file (defaults to $PIXELCAM_SETTINGS, then ./pixelcam.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all palette names
    Palettes,
    /// Print the colors of a palette
    Show {
        /// Palette name
        name: String,
    },
    /// Find the nearest palette color to a color
    Nearest {
        /// Color as hex ("#ff8800") or decimal ("255,136,0")
        color: String,

        /// Palette to match against (defaults to the active palette)
        #[arg(short, long)]
        palette: Option<String>,
    },
    /// Add or replace a custom palette
    Add {
        /// Palette name
        name: String,

        /// Colors as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        colors: String,
    },
    /// Remove a custom palette
    Remove {
        /// Palette name
        name: String,
    },
    /// Select the active palette ("none" disables the palette filter)
    Select {
        /// Palette name
        name: String,
    },
    /// Change pixelation settings
    Set {
        /// Pixel block size
        #[arg(long)]
        pixel_size: Option<u32>,

        /// Output scale factor
        #[arg(long)]
        scale: Option<f32>,

        /// Exposure multiplier
        #[arg(long)]
        exposure: Option<f32>,
    },
    /// Pixelate a PNG image
    Pixelate {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Palette name (defaults to the active palette)
        #[arg(short, long)]
        palette: Option<String>,

        /// Pixel block size
        #[arg(long)]
        pixel_size: Option<u32>,

        /// Output scale factor
        #[arg(long)]
        scale: Option<f32>,

        /// Exposure multiplier
        #[arg(long)]
        exposure: Option<f32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelcam=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let settings_path = cli
        .settings
        .or_else(|| std::env::var("PIXELCAM_SETTINGS").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let store = JsonFileStore::new(settings_path);

    let settings = store.load_or_default();
    let registry = PaletteRegistry::new();
    sync_custom_palettes(&registry, &settings);

    match cli.command {
        Some(Commands::Palettes) => run_palettes_command(&registry, &settings),
        Some(Commands::Show { name }) => run_show_command(&registry, &name),
        Some(Commands::Nearest { color, palette }) => {
            run_nearest_command(&registry, &settings, &color, palette.as_deref())
        }
        Some(Commands::Add { name, colors }) => run_add_command(&store, &registry, &name, &colors),
        Some(Commands::Remove { name }) => run_remove_command(&store, &registry, &name),
        Some(Commands::Select { name }) => run_select_command(&store, &registry, &name),
        Some(Commands::Set {
            pixel_size,
            scale,
            exposure,
        }) => run_set_command(&store, pixel_size, scale, exposure),
        Some(Commands::Pixelate {
            input,
            output,
            palette,
            pixel_size,
            scale,
            exposure,
        }) => {
            let options = PixelateOptions {
                pixel_size: pixel_size.unwrap_or(settings.pixel_size),
                scale: scale.unwrap_or(settings.scale),
                exposure: exposure.unwrap_or(settings.exposure),
            };
            run_pixelate_command(&registry, &settings, &input, &output, palette, options)
        }
        None => {
            run_status_command(&store, &settings);
            Ok(())
        }
    }
}

/// List built-in and custom palette names
fn run_palettes_command(registry: &PaletteRegistry, settings: &Settings) -> anyhow::Result<()> {
    let active = settings.active_palette();
    for name in &registry.names() {
        let kind = if registry.is_builtin(name) {
            "built-in"
        } else {
            "custom"
        };
        let marker = if Some(name) == active { "*" } else { " " };
        println!("{marker} {name:<16} {kind}");
    }
    Ok(())
}

/// Print the colors of one palette
fn run_show_command(registry: &PaletteRegistry, name: &str) -> anyhow::Result<()> {
    let palette = registry.get(name)?;
    if palette.is_empty() {
        println!("{name}: (no colors)");
        return Ok(());
    }
    println!("{name}:");
    for color in &palette {
        println!("  {color}  ({}, {}, {})", color.r, color.g, color.b);
    }
    Ok(())
}

/// Print the nearest color of a palette
fn run_nearest_command(
    registry: &PaletteRegistry,
    settings: &Settings,
    color: &str,
    palette: Option<&str>,
) -> anyhow::Result<()> {
    let color = parse_color(color)?;
    let name = palette
        .or_else(|| settings.active_palette())
        .ok_or_else(|| anyhow::anyhow!("No palette given and no active palette selected"))?;

    let palette = registry.get(name)?;
    let (idx, dist) = palette.find_nearest(color)?;
    let nearest = palette[idx];
    println!(
        "{color} -> {nearest} (index {idx}, distance {:.2})",
        (dist as f64).sqrt()
    );
    Ok(())
}

/// Register a custom palette and persist it
fn run_add_command(
    store: &JsonFileStore,
    registry: &PaletteRegistry,
    name: &str,
    colors: &str,
) -> anyhow::Result<()> {
    check_custom_name(registry, name)?;
    let colors = parse_color_list(colors)?;
    let count = colors.len();
    registry.register(name, colors.clone())?;

    store.update(|s| {
        let entries: Vec<Vec<i64>> = colors
            .iter()
            .map(|c| c.to_bytes().into_iter().map(i64::from).collect())
            .collect();
        s.custom_palettes.insert(name.to_string(), entries);
    })?;

    tracing::info!(palette = %name, colors = count, "Custom palette saved");
    println!("Saved palette '{name}' ({count} colors)");
    Ok(())
}

/// Remove a custom palette and persist the change
fn run_remove_command(
    store: &JsonFileStore,
    registry: &PaletteRegistry,
    name: &str,
) -> anyhow::Result<()> {
    let removed = registry.remove(name)?;

    store.update(|s| {
        s.custom_palettes.remove(name);
        if s.selected_palette == name {
            s.selected_palette = NO_PALETTE.to_string();
        }
    })?;

    if removed {
        println!("Removed palette '{name}'");
    } else {
        println!("No custom palette named '{name}'");
    }
    Ok(())
}

/// Change the active palette
fn run_select_command(
    store: &JsonFileStore,
    registry: &PaletteRegistry,
    name: &str,
) -> anyhow::Result<()> {
    if name != NO_PALETTE {
        // Fail on unknown names rather than saving a dangling selection
        registry.get(name)?;
    }
    store.update(|s| s.selected_palette = name.to_string())?;
    println!("Active palette: {name}");
    Ok(())
}

/// Update pixelation settings
fn run_set_command(
    store: &JsonFileStore,
    pixel_size: Option<u32>,
    scale: Option<f32>,
    exposure: Option<f32>,
) -> anyhow::Result<()> {
    if pixel_size == Some(0) {
        anyhow::bail!("Pixel size must be at least 1");
    }
    if scale.is_some_and(|s| !s.is_finite() || s <= 0.0) {
        anyhow::bail!("Scale must be greater than 0");
    }
    if exposure.is_some_and(|e| !e.is_finite() || e < 0.0) {
        anyhow::bail!("Exposure must be 0 or more");
    }

    let settings = store.update(|s| {
        if let Some(v) = pixel_size {
            s.pixel_size = v;
        }
        if let Some(v) = scale {
            s.scale = v;
        }
        if let Some(v) = exposure {
            s.exposure = v;
        }
    })?;

    println!(
        "pixel size {}, scale {}, exposure {}",
        settings.pixel_size, settings.scale, settings.exposure
    );
    Ok(())
}

/// Pixelate a PNG file (no settings are modified)
fn run_pixelate_command(
    registry: &PaletteRegistry,
    settings: &Settings,
    input: &Path,
    output: &Path,
    palette: Option<String>,
    options: PixelateOptions,
) -> anyhow::Result<()> {
    let palette = match palette.as_deref() {
        Some(NO_PALETTE) => None,
        Some(name) => Some(registry.get(name)?),
        None => resolve_active_palette(registry, settings),
    };
    let quantizer = palette.map(Quantizer::new).transpose()?;

    let file = std::fs::File::open(input)?;
    let frame = decode_png(std::io::BufReader::new(file))?;
    let result = pixelate(&frame, quantizer.as_ref(), &options)?;
    let png_bytes = encode_png(&result)?;

    std::fs::write(output, &png_bytes)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = result.width(),
        height = result.height(),
        "Pixelated image"
    );
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        output.display(),
        result.width(),
        result.height(),
        png_bytes.len()
    );
    Ok(())
}

/// Display current settings
fn run_status_command(store: &JsonFileStore, settings: &Settings) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Pixelcam v{VERSION} - retro palette pixelation\n");

    let source = if store.path().exists() {
        "file"
    } else {
        "defaults (file not found)"
    };
    println!("Settings: {} [{source}]", store.path().display());
    println!("  Palette:    {}", settings.selected_palette);
    println!("  Pixel size: {}", settings.pixel_size);
    println!("  Scale:      {}", settings.scale);
    println!("  Exposure:   {}", settings.exposure);

    if !settings.custom_palettes.is_empty() {
        println!("\nCustom palettes:");
        for (name, entries) in &settings.custom_palettes {
            println!("  {name} ({} colors)", entries.len());
        }
    }

    println!("\nRun 'pixelcam --help' for commands.");
}
