use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use hexnav::{
    timed, CubeCoord, GridConfig, HexGrid, PathConfig, PathResult,
    SearchStatus,
};
use log::{info, warn, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating hex grids and finding paths across them.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexnav")]
struct Opt {
    /// Path to a config file that defines the grid to be generated. Supported
    /// formats: JSON, TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to an existing .bin grid file to load
    #[structopt(short, long)]
    bin: Option<PathBuf>,

    /// Start tile for a path query, as `q,r,s` (or axial `q,r`). Must be
    /// given along with `--to`
    #[structopt(long, allow_hyphen_values = true)]
    from: Option<CubeCoord>,

    /// End tile for a path query, as `q,r,s` (or axial `q,r`). Must be given
    /// along with `--from`
    #[structopt(long, allow_hyphen_values = true)]
    to: Option<CubeCoord>,

    /// If given, outputs will be saved to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output in. Supported formats:
    ///
    /// bin - Binary representation of the grid that can be reloaded by this
    ///   CLI later. Use this for persisting & sharing grids
    ///
    /// cfg - The full config object used for the grid, in TOML format
    ///
    /// json - JSON representation of the grid. Similar to the binary format,
    ///   but much less compact
    ///
    /// path - The result of the path query, in JSON format. Requires `--from`
    ///   and `--to`
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the grid in a serialized binary format, which can be
    /// deserialized later to recover the grid
    Bin,
    /// Export the grid's full config in a human-readable file
    Cfg,
    /// Export the grid in a serialized JSON format. Similar to the bin
    /// format, but human readable
    Json,
    /// Export the path query result as JSON
    Path,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::Cfg => "toml",
            Self::Json | Self::Path => "json",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            Self::Bin | Self::Json => "grid",
            Self::Cfg => "config",
            Self::Path => "path",
        }
    }
}

/// A path query along with its result, for the `path` output format
#[derive(Debug, Serialize)]
struct PathReport {
    from: CubeCoord,
    to: CubeCoord,
    #[serde(flatten)]
    result: PathResult<CubeCoord>,
}

fn load_config(config_path: &Path) -> anyhow::Result<GridConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the grid (or path) in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    grid: &HexGrid,
    config: Option<&GridConfig>,
    path: Option<&PathReport>,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        grid: &HexGrid,
        config: Option<&GridConfig>,
        path: Option<&PathReport>,
    ) -> anyhow::Result<Vec<u8>> {
        match output_format {
            OutputFormat::Bin => grid.to_bin(),
            OutputFormat::Cfg => {
                let config = config.ok_or_else(|| {
                    anyhow!("cfg output requires a grid generated with --config")
                })?;
                Ok(toml::to_string_pretty(config)
                    .context("error serializing config")?
                    .into_bytes())
            }
            OutputFormat::Json => grid.to_json().map(String::into_bytes),
            OutputFormat::Path => {
                let path = path.ok_or_else(|| {
                    anyhow!("path output requires --from and --to")
                })?;
                serde_json::to_vec_pretty(path)
                    .context("error serializing path")
            }
        }
    }

    let output_file_path = output_dir
        .join(output_format.file_stem())
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, grid, config, path)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the path query, if one was requested
fn query_path(
    grid: &HexGrid,
    path_config: &PathConfig,
    from: Option<CubeCoord>,
    to: Option<CubeCoord>,
) -> anyhow::Result<Option<PathReport>> {
    let (from, to) = match (from, to) {
        (Some(from), Some(to)) => (from, to),
        (None, None) => return Ok(None),
        _ => bail!("--from and --to must be given together"),
    };

    let result = timed!(
        format!("Path query {} -> {}", from, to),
        log::Level::Info,
        grid.find_tile_path(from, to, path_config, None)
    );
    match result.status {
        SearchStatus::Success | SearchStatus::Partial => info!(
            "Path {} -> {} ({}): {} steps, cost {:.2}, {} nodes expanded",
            from,
            to,
            result.status,
            result.path.len(),
            result.cost,
            result.nodes_expanded
        ),
        status => warn!(
            "No path {} -> {} ({}), {} nodes expanded",
            from, to, status, result.nodes_expanded
        ),
    }

    Ok(Some(PathReport { from, to, result }))
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let (grid, config) = match &opt {
        Opt {
            config: Some(config_path),
            bin: None,
            ..
        } => {
            // Load grid config and use it to generate a new grid
            let config = load_config(config_path)?;
            let grid = HexGrid::generate(&config)?;
            (grid, Some(config))
        }
        Opt {
            config: None,
            bin: Some(input_path),
            ..
        } => {
            // Load existing grid from a file
            let file = OpenOptions::new()
                .read(true)
                .open(input_path)
                .with_context(|| {
                    format!("error opening grid file {:?}", input_path)
                })?;
            let grid = HexGrid::from_bin(file)?;
            info!("Loaded grid from {:?}", input_path);
            (grid, None)
        }
        _ => bail!(
            "must pass exactly one of --config (to generate a new grid) \
            or --bin (to load an existing grid)"
        ),
    };

    let path_config = config
        .as_ref()
        .map(|config| config.pathfinding)
        .unwrap_or_default();
    let path = query_path(&grid, &path_config, opt.from, opt.to)?;

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = &opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(output_dir)?;

        for output_format in &opt.output_formats {
            gen_output(
                output_dir,
                *output_format,
                &grid,
                config.as_ref(),
                path.as_ref(),
            )?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
