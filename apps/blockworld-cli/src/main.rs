use anyhow::Context;
use blockworld_assets::TextureStore;
use blockworld_config::{Config, RenderingConfig};
use blockworld_render::{
    FboManager, FboSpec, FrameContext, PerspectiveCamera, RecordingGraphics, ShaderParameters,
    params,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Every texture the chunk pass looks up.
const ENGINE_TEXTURES: [&str; 8] = [
    "engine:terrain",
    "engine:terrainNormal",
    "engine:terrainHeight",
    "engine:waterStill",
    "engine:lavaStill",
    "engine:waterNormal",
    "engine:waterNormalAlt",
    "engine:effects",
];

#[derive(Parser)]
#[command(name = "blockworld-cli", about = "CLI tool for blockworld rendering setup")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Run one shader parameter pass and print the graphics calls it makes
    Trace(TraceArgs),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration as JSON
    Show {
        #[arg(short, long, default_value = "blockworld.json")]
        path: PathBuf,
    },
    /// Advance the debug rendering stage and save
    CycleStage {
        #[arg(short, long, default_value = "blockworld.json")]
        path: PathBuf,
        /// How many stages to advance
        #[arg(short, long, default_value = "1")]
        times: usize,
    },
}

#[derive(Args)]
struct TraceArgs {
    /// Shader program: chunk or combine
    program: String,
    #[arg(long)]
    normal_mapping: bool,
    #[arg(long)]
    parallax_mapping: bool,
    #[arg(long)]
    animate_water: bool,
    #[arg(long)]
    volumetric_fog: bool,
    #[arg(long)]
    ssao: bool,
    #[arg(long)]
    outline: bool,
    /// Override a property, e.g. --set waveSpeed=0.3
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,
    /// Uniform fog density reported by the world
    #[arg(long, default_value = "0.1")]
    world_fog: f32,
    /// Print calls as JSON
    #[arg(long)]
    json: bool,
}

impl TraceArgs {
    fn rendering(&self) -> RenderingConfig {
        let mut rendering = RenderingConfig::new();
        rendering.set_normal_mapping(self.normal_mapping);
        rendering.set_parallax_mapping(self.parallax_mapping);
        rendering.set_animate_water(self.animate_water);
        rendering.set_volumetric_fog(self.volumetric_fog);
        rendering.set_ssao(self.ssao);
        rendering.set_outline(self.outline);
        rendering
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("blockworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("config: {}", blockworld_config::crate_info());
            println!("assets: {}", blockworld_assets::crate_info());
            println!("render: {}", blockworld_render::crate_info());
        }
        Commands::Config { command } => run_config(command)?,
        Commands::Trace(args) => run_trace(&args)?,
    }

    Ok(())
}

fn run_config(command: ConfigCommand) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show { path } => {
            let config = Config::load_or_default(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::CycleStage { path, times } => {
            let mut config = Config::load_or_default(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            for _ in 0..times {
                config.system.cycle_debug_rendering_stage();
            }
            config
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            let stage = config.system.debug_rendering_stage();
            println!("debug rendering stage: {stage} ({})", stage.index());
        }
    }
    Ok(())
}

fn run_trace(args: &TraceArgs) -> anyhow::Result<()> {
    let mut program: Box<dyn ShaderParameters> = params::for_program(&args.program)?;
    for item in &args.overrides {
        let (name, value) = item
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got `{item}`"))?;
        let value: f32 = value
            .trim()
            .parse()
            .with_context(|| format!("bad value for {name}"))?;
        let stored = program.set_property(name.trim(), value)?;
        tracing::debug!(name, stored, "property override");
    }

    let mut textures = TextureStore::new();
    for (i, uri) in ENGINE_TEXTURES.iter().enumerate() {
        textures.register_solid(uri, [i as u8, 0, 0, 255])?;
    }

    let mut fbos = FboManager::new();
    fbos.create("sceneOpaque", 1280, 720, FboSpec::gbuffer());
    fbos.create("sceneReflected", 640, 360, FboSpec::color_only());
    fbos.create("sceneTransparent", 1280, 720, FboSpec::color_only());
    fbos.create("ssaoBlurred", 640, 360, FboSpec::color_only());
    fbos.create("sobel", 1280, 720, FboSpec::color_only());
    fbos.create("sceneSkyBand1", 320, 180, FboSpec::color_only());

    let rendering = args.rendering();
    let camera = PerspectiveCamera::default();
    let world_fog = args.world_fog;
    let fog = move |_: f32, _: f32| -> f32 { world_fog };
    let frame = FrameContext::new(&rendering, &textures, &fbos)
        .with_camera(camera.view())
        .with_fog(&fog);

    let mut gl = RecordingGraphics::new();
    let outcome = program.apply(&frame, &mut gl);
    tracing::info!(program = program.program_name(), ?outcome, "applied");

    if args.json {
        println!("{}", serde_json::to_string_pretty(gl.calls())?);
    } else {
        print!("{gl}");
    }
    Ok(())
}
