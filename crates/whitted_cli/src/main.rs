//! whitted - render a JSON scene (or the built-in demo) to a PNG file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use whitted_scene::{demo_scene, load_scene};
use whitted_tracer::{ImageBuffer, RenderConfig, Renderer, Scene};

#[derive(Parser, Debug)]
#[command(name = "whitted")]
#[command(about = "Recursive ray tracer with Phong shading, shadows and mirror reflections", long_about = None)]
struct Cli {
    /// Scene file (.json), or "demo" for the built-in scene
    #[arg(default_value = "demo")]
    scene: String,

    /// Output image (format from the extension)
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Cast shadow rays toward every light
    #[arg(long)]
    shadow: bool,

    /// Maximum reflection depth
    #[arg(long)]
    iterations: Option<u32>,

    /// Jittered samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the camera's image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the camera's image height
    #[arg(long)]
    height: Option<u32>,

    /// Use the BVH instead of testing every primitive
    #[arg(long)]
    bvh: bool,

    /// Render on the calling thread only
    #[arg(long)]
    single_thread: bool,

    /// Gamma-correct (gamma 2) when writing the image
    #[arg(long)]
    gamma: bool,
}

impl Cli {
    /// Layer command line flags over the settings that came with the scene.
    fn apply(&self, config: &mut RenderConfig) {
        if self.shadow {
            config.shadow = true;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if self.bvh {
            config.accelerate = true;
        }
        if self.single_thread {
            config.parallel = false;
        }
    }

    fn apply_resolution(&self, scene: &mut Scene) -> Result<()> {
        if self.width.is_none() && self.height.is_none() {
            return Ok(());
        }
        let camera = scene.camera_mut().context("scene has no camera")?;
        let width = self.width.unwrap_or(camera.width());
        let height = self.height.unwrap_or(camera.height());
        camera.set_resolution(width, height);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let (mut scene, mut config) = if cli.scene == "demo" {
        log::info!("Using built-in demo scene");
        demo_scene()
    } else {
        load_scene(&cli.scene).with_context(|| format!("failed to load scene {}", cli.scene))?
    };

    cli.apply(&mut config);
    cli.apply_resolution(&mut scene)?;

    let image = Renderer::new(config).render(&scene).context("render failed")?;

    save_image(&image, &cli.output, cli.gamma)?;
    log::info!("Saved {}", cli.output.display());

    Ok(())
}

fn save_image(image: &ImageBuffer, path: &Path, gamma: bool) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba(gamma))
        .context("pixel buffer does not match the image size")?;
    rgba.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
