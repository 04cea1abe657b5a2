use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use formats::SourcePaths;

pub const DEFAULT_OCCURRENCES_PATH: &str = "data/occurrences.csv";
pub const DEFAULT_SPECIES_PATH: &str = "data/species.csv";
pub const DEFAULT_REGIONS_PATH: &str = "data/regions.geojson";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Flags win over environment variables, which win over the defaults.
#[derive(Debug, Default, Parser)]
#[command(
    name = "occurrence-dashboard",
    about = "Interactive species occurrence dashboard"
)]
pub struct Args {
    /// Occurrence table (CSV or TSV) [env: OCCURRENCES_PATH]
    #[arg(long)]
    pub occurrences: Option<PathBuf>,
    /// Species attribute table keyed by `species` [env: SPECIES_PATH]
    #[arg(long)]
    pub species: Option<PathBuf>,
    /// Region polygons as GeoJSON [env: REGIONS_PATH]
    #[arg(long)]
    pub regions: Option<PathBuf>,
    /// Listen address [env: DASHBOARD_ADDR]
    #[arg(long)]
    pub addr: Option<String>,
    /// Table rows per page [env: DASHBOARD_PAGE_SIZE]
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub sources: SourcePaths,
    pub addr: SocketAddr,
    pub page_size: usize,
}

impl Args {
    pub fn resolve(self) -> Result<DashboardConfig, String> {
        let addr = self
            .addr
            .or_else(|| env::var("DASHBOARD_ADDR").ok())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("invalid listen address {addr:?}: {e}"))?;

        Ok(DashboardConfig {
            sources: SourcePaths {
                occurrences: path_or_env(
                    self.occurrences,
                    "OCCURRENCES_PATH",
                    DEFAULT_OCCURRENCES_PATH,
                ),
                species: path_or_env(self.species, "SPECIES_PATH", DEFAULT_SPECIES_PATH),
                regions: path_or_env(self.regions, "REGIONS_PATH", DEFAULT_REGIONS_PATH),
            },
            addr,
            page_size: self
                .page_size
                .unwrap_or_else(|| env_var_usize("DASHBOARD_PAGE_SIZE", DEFAULT_PAGE_SIZE)),
        })
    }
}

fn path_or_env(flag: Option<PathBuf>, key: &str, default: &str) -> PathBuf {
    flag.or_else(|| env::var(key).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

fn env_var_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Args;

    #[test]
    fn flags_take_precedence() {
        let args = Args::parse_from([
            "occurrence-dashboard",
            "--occurrences",
            "/tmp/occ.tsv",
            "--species",
            "/tmp/sp.csv",
            "--regions",
            "/tmp/r.geojson",
            "--addr",
            "0.0.0.0:9000",
            "--page-size",
            "25",
        ]);
        let cfg = args.resolve().unwrap();
        assert_eq!(cfg.sources.occurrences, PathBuf::from("/tmp/occ.tsv"));
        assert_eq!(cfg.sources.species, PathBuf::from("/tmp/sp.csv"));
        assert_eq!(cfg.sources.regions, PathBuf::from("/tmp/r.geojson"));
        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.page_size, 25);
    }

    #[test]
    fn bad_address_is_rejected() {
        let args = Args {
            addr: Some("not-an-addr".to_string()),
            ..Args::default()
        };
        assert!(args.resolve().unwrap_err().contains("not-an-addr"));
    }
}
