mod render;

use clap::Parser;
use sdcmatch::io::load_gray_image;
use sdcmatch::{
    corners, generate_variants_with, BilinearResampler, Corners, Position, ResampleConfig,
    SearchConfig, SearchResult, Searcher, Sweep,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "SdcMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

/// Either an explicit list of values or a half-open `{start, stop, step}`
/// sweep.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValuesConfig {
    List(Vec<f32>),
    Sweep { start: f32, stop: f32, step: f32 },
}

impl ValuesConfig {
    fn values(&self) -> Result<Vec<f32>, sdcmatch::SdcError> {
        match self {
            ValuesConfig::List(values) => Ok(values.clone()),
            ValuesConfig::Sweep { start, stop, step } => {
                Ok(Sweep::new(*start, *stop, *step)?.to_vec())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AnnotateConfig {
    path: String,
    color: [u8; 3],
    thickness: u32,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            color: [255, 0, 0],
            thickness: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    scales: ValuesConfig,
    angles: ValuesConfig,
    threshold: f64,
    parallel: bool,
    fill_value: f32,
    annotate: Option<AnnotateConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            scales: ValuesConfig::List(vec![1.0]),
            angles: ValuesConfig::List(vec![0.0]),
            threshold: 0.01,
            parallel: false,
            fill_value: ResampleConfig::default().fill_value,
            annotate: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PointRecord {
    row: usize,
    col: usize,
}

impl From<Position> for PointRecord {
    fn from(value: Position) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Serialize)]
struct CornersRecord {
    top_left: PointRecord,
    top_right: PointRecord,
    bottom_left: PointRecord,
    bottom_right: PointRecord,
}

impl From<Corners> for CornersRecord {
    fn from(value: Corners) -> Self {
        Self {
            top_left: value.top_left.into(),
            top_right: value.top_right.into(),
            bottom_left: value.bottom_left.into(),
            bottom_right: value.bottom_right.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    width: usize,
    height: usize,
    score: f64,
    variant_index: usize,
    scale: f32,
    angle_deg: f32,
    corners: CornersRecord,
}

impl From<SearchResult> for MatchRecord {
    fn from(value: SearchResult) -> Self {
        Self {
            width: value.width,
            height: value.height,
            score: value.score,
            variant_index: value.variant_index,
            scale: value.scale,
            angle_deg: value.angle_deg,
            corners: corners(&value).into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    variants: usize,
    best: Option<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("sdcmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }

    let target = load_gray_image(&config.image_path)?;
    let template = load_gray_image(&config.template_path)?;
    let scales = config.scales.values()?;
    let angles = config.angles.values()?;

    let resampler = BilinearResampler::new().with_config(ResampleConfig {
        fill_value: config.fill_value,
    });
    let variants = generate_variants_with(&template, &scales, &angles, &resampler)?;
    tracing::info!(
        variants = variants.len(),
        target_width = target.width(),
        target_height = target.height(),
        "variants generated"
    );

    let searcher = Searcher::new().with_config(SearchConfig {
        threshold: config.threshold,
        parallel: config.parallel,
    });
    let result = searcher.search(&target, &variants)?;

    if let (Some(annotate), Some(result)) = (&config.annotate, &result) {
        if !annotate.path.is_empty() {
            let mut color = image::open(&config.image_path)?.to_rgb8();
            render::draw_border(&mut color, result, annotate.color, annotate.thickness);
            color.save(&annotate.path)?;
        }
    }

    let output = Output {
        variants: variants.len(),
        best: result.map(MatchRecord::from),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
