/// The curation pipeline: discovery → classification → uncertainty
/// augmentation → grouping → per-group emission.
///
/// Each figure subdirectory of the data directory is processed
/// independently. Per-file problems (unrecognized names, malformed rows,
/// duplicate centrality bins) are logged, collected, and reported after the
/// pass; they never abort processing of the remaining files. Directory
/// entries are visited in sorted name order so discovery — and therefore
/// group emission order — is deterministic across runs.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::analysis::grouping::{Group, GroupSet};
use crate::classify::classify;
use crate::config::Config;
use crate::ingest::phenix;
use crate::model::{DataRow, FileRecord, Metadata, ReformError};
use crate::table;
use crate::uncertainty::{self, format_significant};

/// Marker written in the Sys. Err column when the uncertainty table has no
/// entry for a row's cell. Distinguishes "unavailable" from a computed zero.
pub const UNAVAILABLE_MARKER: &str = "n/a";

// ---------------------------------------------------------------------------
// Run summaries
// ---------------------------------------------------------------------------

/// Outcome of one reform pass over the whole data directory.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_seen: usize,
    pub files_reformed: usize,
    pub groups_written: usize,
    /// Per-file failures, in discovery order: (filename, error).
    pub failures: Vec<(String, ReformError)>,
}

impl RunSummary {
    fn absorb(&mut self, other: RunSummary) {
        self.files_seen += other.files_seen;
        self.files_reformed += other.files_reformed;
        self.groups_written += other.groups_written;
        self.failures.extend(other.failures);
    }
}

// ---------------------------------------------------------------------------
// Content parsing
// ---------------------------------------------------------------------------

/// Parse file content into data rows.
///
/// Rows are whitespace-delimited `momentum value stat_error` triples, one
/// per line, no header. Momentum and value must parse as floats; the
/// statistical error is opaque and kept verbatim, as are the original
/// momentum and value fields.
pub fn parse_data_rows(content: &str, filename: &str) -> Result<Vec<DataRow>, ReformError> {
    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |reason: &str| ReformError::MalformedRow {
            filename: filename.to_string(),
            line: index + 1,
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(malformed(&format!("expected 3 columns, found {}", fields.len())));
        }
        let momentum: f64 = fields[0]
            .parse()
            .map_err(|_| malformed("momentum is not a number"))?;
        let value: f64 = fields[1]
            .parse()
            .map_err(|_| malformed("value is not a number"))?;
        rows.push(DataRow {
            momentum,
            value,
            fields: [
                fields[0].to_string(),
                fields[1].to_string(),
                fields[2].to_string(),
            ],
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Uncertainty augmentation and rendering
// ---------------------------------------------------------------------------

/// The derived Sys. Err field for one row: the systematic uncertainty to 6
/// significant figures, or the explicit unavailable marker.
fn sys_err_field(metadata: &Metadata, row: &DataRow) -> String {
    match uncertainty::lookup(
        metadata.collision_system,
        metadata.species,
        metadata.charge,
        row.momentum,
        row.value,
    ) {
        Ok(su) => format_significant(su, 6),
        Err(_) => UNAVAILABLE_MARKER.to_string(),
    }
}

/// Render one group member as an aligned table with the derived column
/// appended. The original three fields pass through verbatim.
fn render_member(record: &FileRecord) -> String {
    let header = vec![
        "pT".to_string(),
        record.metadata.value_type.header().to_string(),
        "Stat. Err".to_string(),
        "Sys. Err".to_string(),
    ];
    let rows: Vec<Vec<String>> = record
        .rows
        .iter()
        .map(|row| {
            let mut out: Vec<String> = row.fields.to_vec();
            out.push(sys_err_field(&record.metadata, row));
            out
        })
        .collect();
    table::render(&header, &rows)
}

/// Render a whole group: for each member in order, a centrality header
/// line, the member's table, then a blank separator line.
pub fn render_group(group: &Group) -> String {
    let mut out = String::new();
    for member in &group.members {
        out.push_str(&format!(
            "Centrality {}-{}%\n",
            member.metadata.centrality_low, member.metadata.centrality_high
        ));
        out.push_str(&render_member(member));
        out.push_str("\n\n");
    }
    out
}

// ---------------------------------------------------------------------------
// Directory passes
// ---------------------------------------------------------------------------

/// Reform every data file in `in_dir` into per-group files under `out_dir`.
pub fn reform_directory(in_dir: &Path, out_dir: &Path) -> Result<RunSummary, ReformError> {
    let mut summary = RunSummary::default();
    let mut set = GroupSet::new();

    for filename in sorted_file_names(in_dir)? {
        summary.files_seen += 1;
        match load_record(in_dir, &filename) {
            Ok(record) => match set.insert(record) {
                Ok(()) => summary.files_reformed += 1,
                Err(err) => {
                    warn!("skipping {filename}: {err}");
                    summary.failures.push((filename, err));
                }
            },
            Err(err) => {
                warn!("skipping {filename}: {err}");
                summary.failures.push((filename, err));
            }
        }
    }

    fs::create_dir_all(out_dir)?;
    for group in set.into_groups() {
        let out_path = out_dir.join(format!("{}.txt", group.label));
        fs::write(&out_path, render_group(&group))?;
        summary.groups_written += 1;
    }
    info!(
        "{} group files created in {} from {} data files",
        summary.groups_written,
        out_dir.display(),
        summary.files_reformed
    );
    Ok(summary)
}

/// Classify a file and parse its contents into a record.
fn load_record(dir: &Path, filename: &str) -> Result<FileRecord, ReformError> {
    let metadata = classify(filename)?;
    let content = fs::read_to_string(dir.join(filename))?;
    let rows = parse_data_rows(&content, filename)?;
    Ok(FileRecord {
        raw_name: filename.to_string(),
        metadata,
        rows,
    })
}

/// File names directly inside `dir`, sorted for deterministic discovery.
fn sorted_file_names(dir: &Path) -> Result<Vec<String>, ReformError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Subdirectory names of `dir`, sorted.
fn sorted_subdirs(dir: &Path) -> Result<Vec<String>, ReformError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

// ---------------------------------------------------------------------------
// Whole-run entry points
// ---------------------------------------------------------------------------

/// Download every configured figure directory into the data directory.
pub fn fetch(config: &Config) -> Result<usize, ReformError> {
    let client = phenix::build_client()?;
    let data_dir = Path::new(&config.data_dir);
    let mut total = 0;
    for figure in &config.figures {
        let url = format!("{}{}", config.base_url, figure);
        let filenames = phenix::scrape_filenames(&client, &url)?;
        info!("{} files listed in {figure}", filenames.len());
        total += phenix::download_files(&client, &url, &data_dir.join(figure), &filenames)?;
    }
    Ok(total)
}

/// Reform every figure subdirectory of the data directory, mirroring the
/// layout under the output directory.
pub fn reform(config: &Config) -> Result<RunSummary, ReformError> {
    let data_dir = Path::new(&config.data_dir);
    let out_dir = Path::new(&config.out_dir);
    let mut summary = RunSummary::default();
    for subdir in sorted_subdirs(data_dir)? {
        info!("reforming {}", data_dir.join(&subdir).display());
        summary.absorb(reform_directory(
            &data_dir.join(&subdir),
            &out_dir.join(&subdir),
        )?);
    }
    Ok(summary)
}
