use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use huekit_color::{Color, WcagGrade, contrast_ratio};
use huekit_engine::{
    Adjustments, EngineConfig, GenerateRequest, HarmonyMethod, MAX_PALETTE_SIZE, MIN_PALETTE_SIZE,
    PaletteDocument, PaletteState, SHADE_LABELS, StylePalette, VisionDeficiency, analyze, generate,
    generate_shades, harmonize_gray, name_within, simulate_palette,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::{Value, json};

use crate::error::{CliError, Result};
use crate::logging::init_logging;
use crate::session::{parse_script, replay};

#[derive(Debug, Parser)]
#[command(
    name = "huekit",
    about = "Generate, inspect and replay color design-system palettes",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Engine configuration file (TOML, or JSON by extension).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for all randomness; overrides the configuration.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a harmony palette.
    Generate {
        /// Number of colors (2..=20).
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Harmony method (auto, mono, analogous, complement, split-complement, triad, tetrad).
        #[arg(short, long)]
        method: Option<HarmonyMethod>,
        /// Base color; random when omitted.
        #[arg(short, long)]
        base: Option<Color>,
    },

    /// Print the 20-step shade ramp of a color.
    Shades { color: Color },

    /// Derive a neutral gray for a brand color.
    Gray { brand: Color },

    /// Name colors by nearest reference color.
    Name {
        #[arg(required = true)]
        colors: Vec<Color>,
    },

    /// WCAG contrast between two colors.
    Contrast { foreground: Color, background: Color },

    /// Simulate a color-vision deficiency.
    Simulate {
        deficiency: VisionDeficiency,
        #[arg(required = true)]
        colors: Vec<Color>,
    },

    /// Apply hue/saturation/brightness/temperature adjustments.
    Adjust {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        hue: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        saturation: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        brightness: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        temperature: i32,
        #[arg(required = true)]
        colors: Vec<Color>,
    },

    /// Tag a palette document and report its contrast.
    Analyze { document: PathBuf },

    /// Replay a session script and print the resulting document.
    Session { script: PathBuf },
}

/// Rendered result of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub json: Value,
    pub text: String,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.log_json)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let json = cli.global.json;
    let report = execute(&cli)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report.json)?);
    } else {
        print!("{}", report.text);
    }
    Ok(())
}

fn load_config(global: &GlobalArgs) -> Result<EngineConfig> {
    let mut config = match &global.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if global.seed.is_some() {
        config.seed = global.seed;
    }
    Ok(config)
}

fn rng_for(config: &EngineConfig) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn swatch_lines(colors: &[Color], threshold: f64) -> String {
    let mut out = String::new();
    for (i, color) in colors.iter().enumerate() {
        let _ = writeln!(out, "{i:>2}  {color}  {}", name_within(*color, threshold));
    }
    out
}

/// Run a command without printing.
pub fn execute(cli: &Cli) -> Result<Report> {
    let config = load_config(&cli.global)?;
    let threshold = config.name_threshold;

    let report = match &cli.command {
        Commands::Generate {
            count,
            method,
            base,
        } => {
            let mut rng = rng_for(&config);
            let count = count.unwrap_or(config.default_count);
            if !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&count) {
                return Err(CliError::invalid(format!(
                    "count must be between {MIN_PALETTE_SIZE} and {MAX_PALETTE_SIZE}, got {count}"
                )));
            }
            let method = method.unwrap_or(config.default_method);
            let request = GenerateRequest::new(count, method).with_base(*base);
            let generated = generate(&request, &mut rng);
            Report {
                json: json!({
                    "palette": generated.palette,
                    "brandColor": generated.brand_color,
                    "method": generated.method,
                }),
                text: format!(
                    "method {}  brand {}\n{}",
                    generated.method,
                    generated.brand_color,
                    swatch_lines(&generated.palette, threshold)
                ),
            }
        }
        Commands::Shades { color } => {
            let ramp = generate_shades(*color);
            let mut text = String::new();
            for (label, shade) in SHADE_LABELS.iter().zip(ramp.iter()) {
                let _ = writeln!(text, "{label:>5}  {shade}");
            }
            let labelled: serde_json::Map<String, Value> = SHADE_LABELS
                .iter()
                .zip(ramp.iter())
                .map(|(label, shade)| ((*label).to_string(), json!(shade)))
                .collect();
            Report {
                json: Value::Object(labelled),
                text,
            }
        }
        Commands::Gray { brand } => {
            let mut rng = rng_for(&config);
            let gray = harmonize_gray(*brand, &mut rng);
            Report {
                json: json!({ "brandColor": brand, "grayColor": gray }),
                text: format!("{gray}\n"),
            }
        }
        Commands::Name { colors } => {
            let names: Vec<&str> = colors.iter().map(|c| name_within(*c, threshold)).collect();
            Report {
                json: json!(
                    colors
                        .iter()
                        .zip(&names)
                        .map(|(c, n)| json!({ "color": c, "name": n }))
                        .collect::<Vec<_>>()
                ),
                text: swatch_lines(colors, threshold),
            }
        }
        Commands::Contrast {
            foreground,
            background,
        } => {
            let ratio = contrast_ratio(*foreground, *background);
            let grade = WcagGrade::from_ratio(ratio);
            Report {
                json: json!({
                    "foreground": foreground,
                    "background": background,
                    "ratio": ratio,
                    "grade": grade,
                }),
                text: format!("{ratio:.2}:1  {}\n", grade.label()),
            }
        }
        Commands::Simulate { deficiency, colors } => {
            let simulated = simulate_palette(colors, *deficiency, |_| false);
            Report {
                json: json!({ "deficiency": deficiency, "palette": simulated }),
                text: swatch_lines(&simulated, threshold),
            }
        }
        Commands::Adjust {
            hue,
            saturation,
            brightness,
            temperature,
            colors,
        } => {
            let adjustments = Adjustments::new(*hue, *saturation, *brightness, *temperature);
            let adjusted = adjustments.apply_palette(colors, |_| false);
            Report {
                json: json!({ "adjustments": adjustments, "palette": adjusted }),
                text: swatch_lines(&adjusted, threshold),
            }
        }
        Commands::Analyze { document } => {
            let document = PaletteDocument::from_json_file(document)?;
            let tags = analyze(&document.explorer_palette);
            let style =
                StylePalette::derive(document.brand_color, document.gray_color, document.theme);
            let contrast = style.contrast_report(&document.explorer_palette);

            let mut text = String::new();
            let families: Vec<&str> = tags.primary.iter().map(|f| f.as_str()).collect();
            let styles: Vec<&str> = tags.styles.iter().map(|s| s.as_str()).collect();
            let _ = writeln!(text, "primary: {}", families.join(", "));
            let _ = writeln!(text, "styles:  {}", styles.join(", "));
            for swatch in &contrast.swatches {
                let _ = writeln!(
                    text,
                    "{}  on white {:>5.2} {:<8}  on black {:>5.2} {}",
                    swatch.color,
                    swatch.on_white.ratio,
                    swatch.on_white.grade.label(),
                    swatch.on_black.ratio,
                    swatch.on_black.grade.label()
                );
            }
            Report {
                json: json!({ "tags": tags, "style": style, "contrast": contrast }),
                text,
            }
        }
        Commands::Session { script } => {
            let source = std::fs::read_to_string(script)?;
            let commands = parse_script(script, &source)?;
            let mut state = PaletteState::new(config);
            let session = replay(&mut state, &commands)?;

            let mut text = session.document.to_json_pretty()?;
            text.push('\n');
            for note in &session.notifications {
                let _ = writeln!(text, "{note}");
            }
            Report {
                json: serde_json::to_value(&session)?,
                text,
            }
        }
    };
    Ok(report)
}
