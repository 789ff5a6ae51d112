/// PHENIX data-directory client.
///
/// Source files are published as plain `.txt` files behind an HTML directory
/// listing, one listing per figure of the ppg146 paper:
/// https://www.phenix.bnl.gov/phenix/WWW/info/data/ppg146/
///
/// Retrieval is a simple blocking fetch-and-save: scrape the listing for
/// `.txt` links, then download each file once. No retry logic beyond the
/// client timeout.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};

use crate::model::ReformError;

/// Base URL of the ppg146 data directories.
pub const PHENIX_BASE_URL: &str = "https://www.phenix.bnl.gov/phenix/WWW/info/data/ppg146/";

/// Build the blocking HTTP client used for all retrievals.
///
/// The PHENIX web server presents a certificate from a lab-internal CA that
/// is not in the default trust store, so certificate verification must be
/// disabled to reach it at all.
pub fn build_client() -> Result<reqwest::blocking::Client, ReformError> {
    let client = reqwest::blocking::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

/// Fetch a directory listing and return the data filenames it links to,
/// in listing order.
pub fn scrape_filenames(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<String>, ReformError> {
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(ReformError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let body = response.text()?;
    let files = extract_txt_links(&body);
    debug!("{} data files listed at {}", files.len(), url);
    Ok(files)
}

/// Pull the `.txt` link targets out of a directory-listing page.
///
/// The listing is a file-index table whose data rows each link one file.
/// Only bare `.txt` targets count; anything with a path component (parent
/// links, subdirectories, absolute URLs) is navigation, not data.
pub fn extract_txt_links(html: &str) -> Vec<String> {
    let mut files = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("href=\"") {
        rest = &rest[start + "href=\"".len()..];
        let Some(end) = rest.find('"') else { break };
        let target = &rest[..end];
        rest = &rest[end..];
        if target.ends_with(".txt")
            && !target.contains('/')
            && !target.contains('?')
            && !files.iter().any(|f| f == target)
        {
            files.push(target.to_string());
        }
    }
    files
}

/// Download the listed files from `base_url` into `out_dir`, creating the
/// directory if needed. Returns the number of files written.
pub fn download_files(
    client: &reqwest::blocking::Client,
    base_url: &str,
    out_dir: &Path,
    filenames: &[String],
) -> Result<usize, ReformError> {
    fs::create_dir_all(out_dir)?;
    let mut count = 0;
    for filename in filenames {
        let url = format!("{base_url}{filename}");
        let response = client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(ReformError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }
        fs::write(out_dir.join(filename), response.text()?)?;
        count += 1;
        debug!("downloaded {filename} ({count}/{})", filenames.len());
    }
    info!("downloaded {count} files to {}", out_dir.display());
    Ok(count)
}
