use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use framepress::{
    BatchInput, BatchSession, Corner, LogoAsset, SettingsPolicy, TARGET_FRAME, export_to_dir,
};

#[derive(Parser, Debug)]
#[command(name = "framepress", version)]
struct Cli {
    /// Input image files, edited and exported in the given order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Logo image (SVG or raster) stamped onto every frame.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output directory for the PNG (single image) or images.zip (batch).
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Keep native dimensions instead of the fixed crop frame.
    #[arg(long, default_value_t = false)]
    keep_original: bool,

    /// Darken the logo corner with a vignette.
    #[arg(long, default_value_t = false)]
    gradient: bool,

    /// Corner the logo (and vignette) anchors to.
    #[arg(long, value_enum, default_value_t = CornerArg::TopRight)]
    corner: CornerArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CornerArg {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<CornerArg> for Corner {
    fn from(arg: CornerArg) -> Self {
        match arg {
            CornerArg::TopLeft => Corner::TopLeft,
            CornerArg::TopRight => Corner::TopRight,
            CornerArg::BottomLeft => Corner::BottomLeft,
            CornerArg::BottomRight => Corner::BottomRight,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut inputs = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        inputs.push(
            BatchInput::read(path).with_context(|| format!("load input '{}'", path.display()))?,
        );
    }

    let policy = SettingsPolicy {
        keep_original: cli.keep_original,
        add_gradient: cli.gradient,
        logo_corner: cli.corner.into(),
    };
    let mut session = BatchSession::new(TARGET_FRAME, policy);
    session.load(inputs);

    if let Some(logo_path) = &cli.logo {
        session.attach_logo(LogoAsset::load_from_path(logo_path));
    }

    let written = export_to_dir(&mut session, &cli.out)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
