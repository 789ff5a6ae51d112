//! End-to-end pipeline tests over a scratch data directory.
//!
//! These build a `data/`-shaped tree in a tempdir, run the reform pass, and
//! check the emitted group files: section ordering, the derived Sys. Err
//! column, explicit n/a propagation, and per-file failure collection.

use std::fs;
use std::path::Path;

use phenix_reform::config::Config;
use phenix_reform::model::ReformError;
use phenix_reform::reform;

fn scratch_config(root: &Path) -> Config {
    Config {
        data_dir: root.join("data").display().to_string(),
        out_dir: root.join("data_org").display().to_string(),
        ..Config::default()
    }
}

fn write_figure_file(root: &Path, figure: &str, name: &str, content: &str) {
    let dir = root.join("data").join(figure);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_reform_groups_and_orders_centrality_sections() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    // Discovery order is sorted, so cent0010 is seen before cent0100; the
    // inclusive bin must still end up first in the output.
    write_figure_file(root, "Figure4", "raa_pospion_AuAu_cent0010.txt", "1.25 0.5 0.01\n");
    write_figure_file(root, "Figure4", "raa_pospion_AuAu_cent0100.txt", "6.0 0.25 0.004\n");
    write_figure_file(root, "Figure4", "raa_pospion_AuAu_cent1020.txt", "3.5 0.4 0.008\n");

    let summary = reform::reform(&scratch_config(root)).unwrap();
    assert_eq!(summary.files_seen, 3);
    assert_eq!(summary.files_reformed, 3);
    assert_eq!(summary.groups_written, 1);
    assert!(summary.failures.is_empty());

    let out = fs::read_to_string(root.join("data_org/Figure4/raa_pospion_AuAu.txt")).unwrap();
    let full = out.find("Centrality 0-100%").unwrap();
    let first_bin = out.find("Centrality 0-10%").unwrap();
    let second_bin = out.find("Centrality 10-20%").unwrap();
    assert!(full < first_bin && first_bin < second_bin);

    // AuAu pion positive: row 2 at pT 6 is 0.14 -> 0.14 * 0.25 = 0.035;
    // row 0 at pT 1.25 is 0.09 -> 0.045; row 1 at pT 3.5 is 0.10 -> 0.04.
    assert!(out.contains("0.035"));
    assert!(out.contains("0.045"));
    assert!(out.contains("0.04"));
    assert!(out.contains("RAA"));
    assert!(out.contains("Sys. Err"));
}

#[test]
fn test_unavailable_uncertainty_is_marked_not_zeroed() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    // AuAu kaons above 5 GeV/c have no table entry.
    write_figure_file(
        root,
        "Figure4",
        "poskaon_AuAu_cent0100.txt",
        "2.0 1.0 0.1\n6.0 1.0 0.1\n",
    );

    let summary = reform::reform(&scratch_config(root)).unwrap();
    assert_eq!(summary.files_reformed, 1);

    let out = fs::read_to_string(root.join("data_org/Figure4/poskaon_AuAu.txt")).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    // Section header, table header, two data rows, blank separator.
    assert_eq!(lines[0], "Centrality 0-100%");
    assert!(lines[1].starts_with("pT"));
    assert!(lines[2].contains("0.11"), "low-pT kaon row should compute: {}", lines[2]);
    assert!(lines[3].contains("n/a"), "high-pT kaon row should be n/a: {}", lines[3]);
    assert!(!lines[3].contains("0.14"));
}

#[test]
fn test_unrecognized_files_are_skipped_and_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_figure_file(root, "Figure11", "pospion_dAu_cent0020.txt", "1.0 2.0 0.1\n");
    write_figure_file(root, "Figure11", "readme.txt", "not data\n");

    let summary = reform::reform(&scratch_config(root)).unwrap();
    assert_eq!(summary.files_seen, 2);
    assert_eq!(summary.files_reformed, 1);
    assert_eq!(summary.failures.len(), 1);
    let (name, err) = &summary.failures[0];
    assert_eq!(name, "readme.txt");
    assert!(matches!(err, ReformError::UnrecognizedFilename(_)));

    // The good file still made it out.
    assert!(root.join("data_org/Figure11/pospion_dAu.txt").exists());
}

#[test]
fn test_duplicate_centrality_keeps_first_and_reports_second() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    // Same physical group and bounds under two spellings: charge defaults
    // to positive, so these collide.
    write_figure_file(root, "Figure12", "pion_AuAu_cent0010.txt", "1.0 2.0 0.1\n");
    write_figure_file(root, "Figure12", "pospion_AuAu_cent0010.txt", "1.0 3.0 0.2\n");

    let summary = reform::reform(&scratch_config(root)).unwrap();
    assert_eq!(summary.files_reformed, 1);
    assert_eq!(summary.failures.len(), 1);
    assert!(matches!(
        summary.failures[0].1,
        ReformError::DuplicateCentrality { low: 0, high: 10, .. }
    ));

    // First-seen (sorted order: "pion_..." before "pospion_...") survives.
    let out = fs::read_to_string(root.join("data_org/Figure12/pion_AuAu.txt")).unwrap();
    assert!(out.contains("2.0"));
    assert!(!out.contains("3.0"));
}

#[test]
fn test_malformed_rows_fail_that_file_only() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_figure_file(root, "Figure4", "negprot_dAu_cent0100.txt", "1.0 2.0 0.1\n");
    write_figure_file(root, "Figure4", "posprot_dAu_cent0100.txt", "1.0 oops 0.1\n");

    let summary = reform::reform(&scratch_config(root)).unwrap();
    assert_eq!(summary.files_reformed, 1);
    assert_eq!(summary.failures.len(), 1);
    assert!(matches!(
        summary.failures[0].1,
        ReformError::MalformedRow { line: 1, .. }
    ));
    assert!(root.join("data_org/Figure4/negprot_dAu.txt").exists());
    assert!(!root.join("data_org/Figure4/posprot_dAu.txt").exists());
}

#[test]
fn test_figures_are_processed_independently() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    // The same group label in two figures must not cross-contaminate.
    write_figure_file(root, "Figure4", "pospion_AuAu_cent0100.txt", "1.0 2.0 0.1\n");
    write_figure_file(root, "Figure11", "pospion_AuAu_cent0100.txt", "1.0 4.0 0.2\n");

    let summary = reform::reform(&scratch_config(root)).unwrap();
    assert_eq!(summary.groups_written, 2);

    let four = fs::read_to_string(root.join("data_org/Figure4/pospion_AuAu.txt")).unwrap();
    let eleven = fs::read_to_string(root.join("data_org/Figure11/pospion_AuAu.txt")).unwrap();
    assert!(four.contains("2.0") && !four.contains("4.0"));
    assert!(eleven.contains("4.0") && !eleven.contains("2.0"));
}
