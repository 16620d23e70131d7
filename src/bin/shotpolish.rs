use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shotpolish::{
    AspectRatio, Background, Compositor, CpuBackend, CpuBackendOpts, DirectorySink,
    FrameRegistry, FrameStyle, GRADIENTS, MESHES, PixelSize, SOLID_COLORS, SkinSpec,
    SourceImage, StyleState,
};

#[derive(Parser, Debug)]
#[command(name = "shotpolish", version, about = "Beautify screenshots")]
struct Cli {
    /// Extra font directory for address-bar and watermark text.
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    /// Do not load the host's installed fonts.
    #[arg(long, global = true)]
    no_system_fonts: bool,

    /// Register a bitmap skin from a skin JSON file (repeatable).
    #[arg(long = "skin", global = true)]
    skins: Vec<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a 1x preview PNG (never watermarked).
    Preview(PreviewArgs),
    /// Render at export scale and write `shotpolish-<millis>.png` into a directory.
    Export(ExportArgs),
    /// Print the resolved canvas geometry as JSON.
    Geometry(GeometryArgs),
    /// List background presets.
    Presets,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Style JSON; omitted fields take their defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Background preset, e.g. `"Ocean Breeze"`, `"mesh:Rose Mesh"`, `solid:3`.
    #[arg(long)]
    background: Option<String>,

    #[arg(long)]
    padding: Option<u32>,

    #[arg(long)]
    radius: Option<f64>,

    /// `auto` or `W:H`.
    #[arg(long)]
    ratio: Option<AspectRatio>,

    /// `none`, `browser_window`, `laptop`, `phone`, or a registered skin name.
    #[arg(long)]
    frame: Option<String>,

    /// Address-bar text for the browser frame.
    #[arg(long)]
    url: Option<String>,

    #[arg(long)]
    no_shadow: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Screenshot (PNG, JPEG, WebP, SVG, ...).
    #[arg(long)]
    image: PathBuf,

    #[command(flatten)]
    style: StyleArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long)]
    image: PathBuf,

    #[command(flatten)]
    style: StyleArgs,

    /// Directory the export is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Override `export_scale`.
    #[arg(long)]
    scale: Option<u32>,

    /// Export without the watermark.
    #[arg(long)]
    pro: bool,
}

#[derive(Args, Debug)]
struct GeometryArgs {
    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    #[command(flatten)]
    style: StyleArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let compositor = Compositor::new(load_registry(&cli.skins)?);
    let backend_opts = CpuBackendOpts {
        fonts_dir: cli.fonts_dir.clone(),
        system_fonts: !cli.no_system_fonts,
    };

    match cli.cmd {
        Command::Preview(args) => cmd_preview(&compositor, backend_opts, args),
        Command::Export(args) => cmd_export(&compositor, backend_opts, args),
        Command::Geometry(args) => cmd_geometry(&compositor, args),
        Command::Presets => {
            cmd_presets();
            Ok(())
        }
    }
}

fn load_registry(skins: &[PathBuf]) -> anyhow::Result<FrameRegistry> {
    let mut registry = FrameRegistry::with_builtins();
    for path in skins {
        let spec = SkinSpec::from_path(path)?;
        registry
            .register_skin(&spec)
            .with_context(|| format!("register skin '{}'", path.display()))?;
    }
    Ok(registry)
}

fn cmd_preview(
    compositor: &Compositor,
    opts: CpuBackendOpts,
    args: PreviewArgs,
) -> anyhow::Result<()> {
    let style = args.style.resolve()?;
    let image = load_image(&args.image)?;
    wait_for_skin(compositor, &style);

    let mut backend = CpuBackend::new(opts);
    let frame = compositor.preview(&style, Some(&image), &mut backend)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({}x{})", args.out.display(), frame.width, frame.height);
    Ok(())
}

fn cmd_export(
    compositor: &Compositor,
    opts: CpuBackendOpts,
    args: ExportArgs,
) -> anyhow::Result<()> {
    let mut style = args.style.resolve()?;
    if let Some(scale) = args.scale {
        style.export_scale = scale;
    }
    let image = load_image(&args.image)?;
    wait_for_skin(compositor, &style);

    let mut backend = CpuBackend::new(opts);
    let mut sink = DirectorySink::new(&args.out_dir);
    let file = shotpolish::export_to(
        compositor,
        &style,
        Some(&image),
        &args.pro,
        &mut backend,
        &mut sink,
    )?;

    let path = sink.last_written().unwrap_or(sink.dir());
    eprintln!(
        "wrote {} ({}x{}{})",
        path.display(),
        file.width,
        file.height,
        if file.watermarked { ", watermarked" } else { "" }
    );
    Ok(())
}

fn cmd_geometry(compositor: &Compositor, args: GeometryArgs) -> anyhow::Result<()> {
    let style = args.style.resolve()?;
    let size = PixelSize::new(args.width, args.height)?;
    let geom = compositor.geometry(&style, size)?;
    println!("{}", serde_json::to_string_pretty(&geom)?);
    Ok(())
}

fn cmd_presets() {
    for g in GRADIENTS {
        println!("gradient:{}", g.name);
    }
    for m in MESHES {
        println!("mesh:{}", m.name);
    }
    for (i, c) in SOLID_COLORS.iter().enumerate() {
        let [r, g, b, _] = c.to_rgba8();
        println!("solid:{i} #{r:02x}{g:02x}{b:02x}");
    }
}

impl StyleArgs {
    fn resolve(&self) -> anyhow::Result<StyleState> {
        let mut style = match &self.style {
            Some(path) => StyleState::from_path(path)?,
            None => StyleState::default(),
        };
        if let Some(name) = &self.background {
            style.background = Background::preset(name)?;
        }
        if let Some(padding) = self.padding {
            style.padding = padding;
        }
        if let Some(radius) = self.radius {
            style.radius = radius;
        }
        if let Some(ratio) = self.ratio {
            style.aspect_ratio = ratio;
        }
        if let Some(key) = &self.frame {
            let url = self
                .url
                .clone()
                .or_else(|| style.frame.url().map(str::to_owned));
            style.frame = frame_from_key(key, url);
        } else if let (Some(url), FrameStyle::BrowserWindow { url: current }) =
            (&self.url, &mut style.frame)
        {
            *current = url.clone();
        }
        if self.no_shadow {
            style.shadow.enabled = false;
        }
        style.validate()?;
        Ok(style)
    }
}

fn frame_from_key(key: &str, url: Option<String>) -> FrameStyle {
    match key {
        "none" => FrameStyle::None,
        "browser_window" | "browser" => FrameStyle::BrowserWindow {
            url: url.unwrap_or_else(|| "https://example.com".to_owned()),
        },
        "laptop" => FrameStyle::Laptop,
        "phone" => FrameStyle::Phone,
        other => FrameStyle::Skin {
            name: other.to_owned(),
        },
    }
}

fn load_image(path: &Path) -> anyhow::Result<SourceImage> {
    SourceImage::from_path(path).with_context(|| format!("load screenshot '{}'", path.display()))
}

/// Block until the selected skin's asset settles, for at most ten seconds.
fn wait_for_skin(compositor: &Compositor, style: &StyleState) {
    let FrameStyle::Skin { name } = &style.frame else {
        return;
    };
    let Some(slot) = compositor.registry().skin_asset(name) else {
        return;
    };
    if !slot.wait_timeout(std::time::Duration::from_secs(10)) {
        tracing::warn!(skin = %name, "skin asset still loading after 10s; frame will be skipped");
    }
}
