use std::path::Path;

use anyhow::bail;
use log::warn;

use phenix_reform::config::Config;
use phenix_reform::reform;

/// Thin driver: `fetch` downloads the source files, `reform` regroups what
/// is on disk, and no argument does both in order.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load(Path::new("reform.toml"))?;
    let mode = std::env::args().nth(1);
    match mode.as_deref() {
        Some("fetch") => {
            run_fetch(&config)?;
        }
        Some("reform") => {
            run_reform(&config)?;
        }
        None => {
            run_fetch(&config)?;
            run_reform(&config)?;
        }
        Some(other) => bail!("unknown command '{other}' (expected 'fetch' or 'reform')"),
    }
    Ok(())
}

fn run_fetch(config: &Config) -> anyhow::Result<()> {
    let count = reform::fetch(config)?;
    println!("Downloaded {count} files to {}/", config.data_dir);
    Ok(())
}

fn run_reform(config: &Config) -> anyhow::Result<()> {
    let summary = reform::reform(config)?;
    println!(
        "Reformed {}/{} files into {} group files under {}/",
        summary.files_reformed, summary.files_seen, summary.groups_written, config.out_dir
    );
    if !summary.failures.is_empty() {
        warn!("{} files were skipped:", summary.failures.len());
        for (filename, err) in &summary.failures {
            warn!("  {filename}: {err}");
        }
    }
    Ok(())
}
