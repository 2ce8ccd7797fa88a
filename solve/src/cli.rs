//! CLI command implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use harness::core::record::ResultRecord;
use harness::core::types::ProblemIdentity;
use harness::execute::Harness;
use harness::io::cache::ResultsCache;
use harness::io::config::{
    CONFIG_FILE, HarnessConfig, default_config_dir, load_config, write_config,
};
use harness::io::input::InputLoader;
use harness::io::store::{FileResultsStore, ResultsStore};
use harness::report::format_duration;
use tracing::{debug, info};

use crate::exit_codes;
use crate::registry::{find, solutions};

/// Loaded configuration plus the directory it came from.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: HarnessConfig,
    pub config_dir: PathBuf,
}

impl Settings {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = load_config(config_path).context("load config")?;
        let config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(config = %config_path.display(), "config loaded");
        Ok(Self { config, config_dir })
    }

    pub fn results_path(&self) -> PathBuf {
        self.config.results_path(&self.config_dir)
    }

    pub fn year(&self, year: Option<u16>) -> u16 {
        year.unwrap_or(self.config.default_year)
    }

    pub fn cache(&self) -> ResultsCache<FileResultsStore> {
        ResultsCache::new(FileResultsStore::new(self.results_path()))
    }
}

/// Explicit `--config` path, or the per-user default.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(default_config_dir()?.join(CONFIG_FILE)),
    }
}

/// Print every registered solution.
pub fn list_solutions() -> Result<i32> {
    for solution in solutions::<FileResultsStore>() {
        println!(
            "{} day {:>2} part {}  {}",
            solution.year, solution.day, solution.part, solution.title
        );
    }
    Ok(exit_codes::OK)
}

/// Run one registered solution through the harness.
pub fn run_solution(
    settings: &Settings,
    year: Option<u16>,
    day: u8,
    part: u8,
    quiet: bool,
) -> Result<i32> {
    let identity = ProblemIdentity::new(settings.year(year), day, part)?;
    let Some(solution) = find::<FileResultsStore>(identity) else {
        bail!("no solution registered for {identity}");
    };
    let print_progress = settings.config.print_progress && !quiet;
    let harness = Harness::new(
        InputLoader::new(&settings.config.data_dir),
        settings.cache(),
        print_progress,
    );

    info!(%identity, results = %settings.results_path().display(), "running solution");
    if (solution.run)(&harness, identity) {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::UNSOLVED)
    }
}

/// Print cached results, optionally filtered by year.
pub fn show_results(settings: &Settings, year: Option<u16>, json: bool) -> Result<i32> {
    let records = filtered_records(&settings.cache(), year)?;
    if json {
        let payload = serde_json::to_string_pretty(&records).context("serialize results")?;
        println!("{payload}");
        return Ok(exit_codes::OK);
    }
    if records.is_empty() {
        println!("no cached results");
    }
    for record in &records {
        println!("{}", render_record(record));
    }
    Ok(exit_codes::OK)
}

/// Record that a cached answer was submitted and accepted.
pub fn mark_submitted(settings: &Settings, year: Option<u16>, day: u8, part: u8) -> Result<i32> {
    let identity = ProblemIdentity::new(settings.year(year), day, part)?;
    if !settings.cache().mark_submitted(identity)? {
        bail!("no cached result for {identity}; run it first");
    }
    println!("{identity}: marked submitted");
    Ok(exit_codes::OK)
}

/// Write the default config unless one exists.
pub fn init_config(config_path: &Path, force: bool) -> Result<i32> {
    if config_path.exists() && !force {
        bail!(
            "config {} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_config(config_path, &HarnessConfig::default()).context("write config")?;
    println!("config written to {}", config_path.display());
    Ok(exit_codes::OK)
}

fn filtered_records<S: ResultsStore>(
    cache: &ResultsCache<S>,
    year: Option<u16>,
) -> Result<Vec<ResultRecord>> {
    let mut records = cache.records()?;
    if let Some(year) = year {
        records.retain(|record| record.identity.year == year);
    }
    records.sort_by_key(|record| record.identity);
    Ok(records)
}

fn render_record(record: &ResultRecord) -> String {
    let duration = Duration::try_from_secs_f64(record.duration_secs)
        .map(format_duration)
        .unwrap_or_else(|_| format!("{} s", record.duration_secs));
    let status = if record.submitted {
        "submitted"
    } else {
        "unsubmitted"
    };
    format!(
        "{}  {}  {}  {}  {}",
        record.identity,
        record.solution,
        duration,
        status,
        record.recorded_at.format("%Y-%m-%d %H:%M:%S")
    )
}
