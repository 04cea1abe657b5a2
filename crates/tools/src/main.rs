use std::env;
use std::path::PathBuf;

use formats::SourcePaths;
use foundation::YearRange;
use runtime::{DEFAULT_YEARS, Dashboard};
use tools::{export_views, selection, summarize};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "summary" => cmd_summary(args),
        "export" => cmd_export(args),
        _ => Err(usage()),
    }
}

/// Source flags shared by every command; unset ones fall back to the
/// environment and then to `data/`.
#[derive(Default)]
struct SourceArgs {
    occurrences: Option<PathBuf>,
    species: Option<PathBuf>,
    regions: Option<PathBuf>,
}

impl SourceArgs {
    /// Consumes `args[*i]` (and its value) if it is a source flag.
    fn take(&mut self, args: &[String], i: &mut usize) -> Result<bool, String> {
        let slot = match args[*i].as_str() {
            "--occurrences" => &mut self.occurrences,
            "--species-table" => &mut self.species,
            "--regions" => &mut self.regions,
            _ => return Ok(false),
        };
        let flag = &args[*i];
        *i += 1;
        let value = args
            .get(*i)
            .ok_or_else(|| format!("{flag} requires a path"))?;
        *slot = Some(PathBuf::from(value));
        Ok(true)
    }

    fn resolve(self) -> SourcePaths {
        SourcePaths {
            occurrences: path_or_env(self.occurrences, "OCCURRENCES_PATH", "data/occurrences.csv"),
            species: path_or_env(self.species, "SPECIES_PATH", "data/species.csv"),
            regions: path_or_env(self.regions, "REGIONS_PATH", "data/regions.geojson"),
        }
    }

    fn load(self) -> Result<Dashboard, String> {
        Dashboard::load(&self.resolve(), 0).map_err(|e| e.to_string())
    }
}

fn path_or_env(flag: Option<PathBuf>, key: &str, default: &str) -> PathBuf {
    flag.or_else(|| env::var(key).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

fn cmd_summary(args: Vec<String>) -> Result<(), String> {
    // occurrences summary [--json] [source flags]
    let mut sources = SourceArgs::default();
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        if !sources.take(&args, &mut i)? {
            match args[i].as_str() {
                "--json" => json = true,
                other => return Err(format!("unknown arg: {other}\n\n{}", usage())),
            }
        }
        i += 1;
    }

    let dashboard = sources.load()?;
    let summary = summarize(&dashboard);

    if json {
        let payload = serde_json::to_string_pretty(&summary).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
        return Ok(());
    }

    println!("records:            {}", summary.records);
    println!("undated records:    {}", summary.undated_records);
    match summary.year_extent {
        Some(years) => println!("years:              {years}"),
        None => println!("years:              (none, slider uses {DEFAULT_YEARS})"),
    }
    println!("regions:            {}", summary.regions);
    println!("species columns:    {}", summary.species_columns.join(", "));
    println!("unmatched species:  {}", summary.join.unmatched_species);
    println!("outside regions:    {}", summary.join.outside_regions);
    println!();
    for (species, count) in &summary.species_counts {
        println!("{count:>8}  {species}");
    }
    Ok(())
}

fn cmd_export(args: Vec<String>) -> Result<(), String> {
    // occurrences export --out DIR [--species S] [--years A:B] [source flags]
    let mut sources = SourceArgs::default();
    let mut out_dir: Option<PathBuf> = None;
    let mut species: Option<String> = None;
    let mut years: Option<YearRange> = None;

    let mut i = 0;
    while i < args.len() {
        if sources.take(&args, &mut i)? {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("--out requires a directory".to_string());
                }
                out_dir = Some(PathBuf::from(&args[i]));
            }
            "--species" => {
                i += 1;
                if i >= args.len() {
                    return Err("--species requires a name".to_string());
                }
                species = Some(args[i].clone());
            }
            "--years" => {
                i += 1;
                if i >= args.len() {
                    return Err("--years requires MIN:MAX".to_string());
                }
                years = Some(args[i].parse().map_err(|e| format!("--years: {e}"))?);
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let out_dir = out_dir.ok_or_else(|| format!("export requires --out DIR\n\n{}", usage()))?;
    let dashboard = sources.load()?;
    let state = selection(&dashboard, species.as_deref(), years)?;

    for path in export_views(&dashboard, &state, &out_dir)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "occurrences".to_string());
    format!(
        "Usage:\n  {exe} summary [--json] [SOURCES]\n  {exe} export --out DIR [--species NAME] [--years MIN:MAX] [SOURCES]\n\nSources:\n  --occurrences PATH    occurrence table (env OCCURRENCES_PATH, default data/occurrences.csv)\n  --species-table PATH  species attributes (env SPECIES_PATH, default data/species.csv)\n  --regions PATH        region GeoJSON (env REGIONS_PATH, default data/regions.geojson)\n\nNotes:\n- `--species all` selects every species.\n- Year ranges are clamped to the years present in the data.\n- `export` writes map.geojson, table.json, chart.svg and chart.json; the table is not paginated.\n"
    )
}
