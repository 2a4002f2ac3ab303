use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use phenoscope::assets::indices::{available_by_group, SECTION_TITLE};
use phenoscope::config::Config;
use phenoscope::data::compare::{
    compare_assets, compare_plants, comparison_csv, comparison_file_name, default_selection,
    selection_warning,
};
use phenoscope::data::export::{export_with, EXPORT_FILE_NAME};
use phenoscope::data::loader::load_file;
use phenoscope::data::trend::TrendParam;
use phenoscope::state::DashboardState;
use phenoscope::error::CategoryParseError;
use phenoscope::{AssetCatalog, Category, Field, PlantDataset, ResolveError, SortDirection, SortSpec};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plant phenotyping table and asset tool", long_about = None)]
struct Cli {
    /// JSON settings file (page size, delimiter, quoting, default plant, asset root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of a plant's daily records
    Table(TableArgs),
    /// Write a plant's full sorted table as delimited text
    Export(ExportArgs),
    /// Resolve a plant's visualization asset to its locator
    Resolve(ResolveArgs),
    /// List the spectral heatmaps available for a plant, by group
    Indices(IndicesArgs),
    /// Compare one trend parameter, or one visual, across plants
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Plant dataset (.json or .csv)
    #[arg(long, default_value = "data/sample_plants.json")]
    data: PathBuf,

    /// Plant id; unknown ids show the default plant
    #[arg(long)]
    plant: Option<String>,
}

#[derive(Args, Debug)]
struct SortArgs {
    /// Column to sort by
    #[arg(long, value_enum, default_value_t = SortColumn::Day)]
    sort: SortColumn,

    /// Sort descending
    #[arg(long)]
    desc: bool,
}

#[derive(Args, Debug)]
struct TableArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    #[command(flatten)]
    sort: SortArgs,

    /// Case-insensitive search over every column
    #[arg(long, default_value = "")]
    search: String,

    /// 1-based page; out-of-range pages are clamped
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    #[command(flatten)]
    sort: SortArgs,

    /// Output path (`-` for stdout)
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct AssetArgs {
    /// Asset directory (`plant N/` folders) or catalog manifest (.json)
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[command(flatten)]
    assets: AssetArgs,

    /// Plant id
    #[arg(long)]
    plant: String,

    /// morphology, lidar or heatmap
    category: String,

    /// Spectral index name for heatmaps, e.g. NDVI
    index: Option<String>,
}

#[derive(Args, Debug)]
struct IndicesArgs {
    #[command(flatten)]
    assets: AssetArgs,

    /// Plant id
    #[arg(long)]
    plant: String,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Plant dataset (.json or .csv)
    #[arg(long, default_value = "data/sample_plants.json")]
    data: PathBuf,

    /// Plant ids to compare (defaults to the first two plants)
    #[arg(long, value_delimiter = ',')]
    plants: Vec<String>,

    /// Trend parameter
    #[arg(long, value_enum, default_value_t = TrendColumn::Height)]
    param: TrendColumn,

    /// Output path (`-` for stdout); defaults to comparative_<param>.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compare a visualization asset per plant instead of a trend
    #[arg(long, value_enum)]
    visual: Option<VisualColumn>,

    /// Spectral index for `--visual heatmap`, e.g. NDVI
    #[arg(long, requires = "visual")]
    index: Option<String>,

    #[command(flatten)]
    assets: AssetArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SortColumn {
    Day,
    Height,
    Biomass,
    LeafTemp,
    Humidity,
    GrowthRate,
}

impl From<SortColumn> for Field {
    fn from(col: SortColumn) -> Self {
        match col {
            SortColumn::Day => Field::Day,
            SortColumn::Height => Field::Height,
            SortColumn::Biomass => Field::Biomass,
            SortColumn::LeafTemp => Field::LeafTemp,
            SortColumn::Humidity => Field::Humidity,
            SortColumn::GrowthRate => Field::GrowthRate,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TrendColumn {
    Height,
    Biomass,
    LeafTemp,
    GrowthRate,
}

impl From<TrendColumn> for TrendParam {
    fn from(col: TrendColumn) -> Self {
        match col {
            TrendColumn::Height => TrendParam::Height,
            TrendColumn::Biomass => TrendParam::Biomass,
            TrendColumn::LeafTemp => TrendParam::LeafTemp,
            TrendColumn::GrowthRate => TrendParam::GrowthRate,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum VisualColumn {
    Morphology,
    Lidar,
    Heatmap,
}

impl VisualColumn {
    fn category(self, index: Option<&str>) -> Result<Category, CategoryParseError> {
        match self {
            VisualColumn::Morphology => Ok(Category::Morphology),
            VisualColumn::Lidar => Ok(Category::Lidar),
            VisualColumn::Heatmap => index
                .map(|i| Category::Heatmap(i.to_string()))
                .ok_or(CategoryParseError::MissingIndex),
        }
    }
}

impl SortArgs {
    fn spec(&self) -> SortSpec {
        let direction = if self.desc { SortDirection::Descending } else { SortDirection::Ascending };
        SortSpec::new(self.sort.into(), direction)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Table(args) => run_table(&config, args),
        Command::Export(args) => run_export(&config, args),
        Command::Resolve(args) => run_resolve(&config, args),
        Command::Indices(args) => run_indices(&config, args),
        Command::Compare(args) => run_compare(&config, args),
    }
}

fn open_dashboard(config: &Config, args: &DatasetArgs) -> Result<(PlantDataset, DashboardState)> {
    let dataset = load_file(&args.data)?;
    if dataset.is_empty() {
        bail!("{} contains no plants", args.data.display());
    }
    let preferred = args.plant.as_deref().or(config.default_plant.as_deref());
    let dashboard = DashboardState::new(&dataset, preferred, config.page_size);
    if let Some(requested) = &args.plant {
        if requested != &dashboard.selected_plant {
            log::warn!("unknown plant '{requested}', showing '{}'", dashboard.selected_plant);
        }
    }
    Ok((dataset, dashboard))
}

fn run_table(config: &Config, args: TableArgs) -> Result<()> {
    let (dataset, mut dashboard) = open_dashboard(config, &args.dataset)?;
    let records = dashboard.records(&dataset);

    dashboard.table.sort = args.sort.spec();
    dashboard.table.set_search(args.search);
    dashboard.table.observe_len(records.len());
    dashboard.table.set_page(args.page);
    let view = dashboard.table.view(records);

    let widths: Vec<usize> = Field::ALL
        .iter()
        .map(|&f| {
            view.visible_rows
                .iter()
                .map(|r| r.get(f).to_string().chars().count())
                .chain(std::iter::once(f.label().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = io::stdout().lock();
    let header: Vec<String> = Field::ALL
        .iter()
        .zip(&widths)
        .map(|(f, w)| format!("{:<w$}", f.label(), w = *w))
        .collect();
    writeln!(out, "{}", header.join("  "))?;
    for row in &view.visible_rows {
        let cells: Vec<String> = Field::ALL
            .iter()
            .zip(&widths)
            .map(|(&f, w)| format!("{:<w$}", row.get(f).to_string(), w = *w))
            .collect();
        writeln!(out, "{}", cells.join("  "))?;
    }
    writeln!(
        out,
        "Showing {}–{} of {} rows · Page {} of {}",
        view.first_row, view.last_row, view.total_filtered, view.clamped_page, view.total_pages
    )?;
    Ok(())
}

fn run_export(config: &Config, args: ExportArgs) -> Result<()> {
    let (dataset, dashboard) = open_dashboard(config, &args.dataset)?;
    let records = dashboard.records(&dataset);
    let text = export_with(records, args.sort.spec(), &config.export_options())?;
    write_output(&args.output, &text)?;
    log::info!("exported {} row(s) of {}", records.len(), dashboard.selected_plant);
    Ok(())
}

fn open_catalog(config: &Config, args: &AssetArgs) -> Result<AssetCatalog> {
    let root = args
        .assets
        .as_ref()
        .or(config.asset_root.as_ref())
        .ok_or_else(|| anyhow!("no asset location: pass --assets or set assetRoot in the config"))?;

    let catalog = if root.is_dir() {
        AssetCatalog::scan_dir(root, config.default_plant.as_deref())
    } else {
        AssetCatalog::load_manifest(root)
    }
    .with_context(|| format!("building asset catalog from {}", root.display()))?;

    log::info!("asset catalog: {} plant(s), default '{}'", catalog.len(), catalog.default_plant_id());
    Ok(catalog)
}

fn run_resolve(config: &Config, args: ResolveArgs) -> Result<()> {
    let catalog = open_catalog(config, &args.assets)?;
    let category = Category::parse(&args.category, args.index.as_deref())?;

    match catalog.resolve(&args.plant, &category) {
        Ok(resolution) => {
            if resolution.fell_back {
                log::warn!(
                    "plant '{}' has no {category}; using '{}'",
                    args.plant,
                    resolution.plant_id
                );
            }
            println!("{}", resolution.locator);
            Ok(())
        }
        Err(err) => {
            // A missing asset is a placeholder state, not a failure.
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}

fn run_indices(config: &Config, args: IndicesArgs) -> Result<()> {
    let catalog = open_catalog(config, &args.assets)?;
    let groups = available_by_group(&catalog, &args.plant);

    let mut out = io::stdout().lock();
    writeln!(out, "{SECTION_TITLE}")?;
    if groups.is_empty() {
        writeln!(out, "  (no heatmaps)")?;
    }
    for (group, indices) in groups {
        writeln!(out, "  {}: {}", group.label(), indices.join(", "))?;
    }
    Ok(())
}

fn run_compare(config: &Config, args: CompareArgs) -> Result<()> {
    let dataset = load_file(&args.data)?;
    let selected = if args.plants.is_empty() { default_selection(&dataset) } else { args.plants };
    if let Some(warning) = selection_warning(&selected) {
        eprintln!("{warning}");
        return Ok(());
    }

    if let Some(visual) = args.visual {
        let category = visual.category(args.index.as_deref())?;
        let catalog = open_catalog(config, &args.assets)?;
        let mut out = io::stdout().lock();
        for (plant_id, resolution) in compare_assets(&catalog, &selected, &category) {
            match resolution {
                Ok(found) => writeln!(out, "{plant_id}: {}", found.locator)?,
                Err(ResolveError::NotFound { .. }) => writeln!(out, "{plant_id}: No data available")?,
            }
        }
        return Ok(());
    }

    let param = TrendParam::from(args.param);
    let comparison = compare_plants(&dataset, &selected, param);
    // The legend goes to stderr so `-o -` stays plain CSV.
    for (name, color) in comparison.legend() {
        eprintln!("{color}  {name}");
    }

    let text = comparison_csv(&comparison)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(comparison_file_name(param)));
    write_output(&output, &text)
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")?;
        return Ok(());
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
