//! Writing the two export files of a line job.
//!
//! Each job produces a JSON dump of the model and a diagram file, named
//! `<product>_<line>_<YYYYMMDD>_<epochMillis>.<ext>`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::model::RailwayModel;
use crate::oudia;

/// Extension of the JSON export.
pub const JSON_EXT: &str = "json";

/// Extension of the diagram export.
pub const DIAGRAM_EXT: &str = "oud2";

/// A year, month and day in that order, with any separators: `2024年3月16日`,
/// `2024/03/16`, `20240316`.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\D*?(\d{1,2})\D*?(\d{1,2})(?:\D|$)").expect("date pattern is valid")
});

/// Errors writing export files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paths of the files written for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub diagram: PathBuf,
}

/// Render the model as JSON.
pub fn to_json(model: &RailwayModel, pretty: bool) -> Result<String, ExportError> {
    let json = if pretty {
        serde_json::to_string_pretty(model)?
    } else {
        serde_json::to_string(model)?
    };
    Ok(json)
}

/// Extract `YYYYMMDD` from a revision date string.
///
/// ```
/// use eki_navigator::export::revision_stamp;
///
/// assert_eq!(revision_stamp("2024年3月16日改正").as_deref(), Some("20240316"));
/// assert_eq!(revision_stamp("no date"), None);
/// ```
pub fn revision_stamp(revision: &str) -> Option<String> {
    let caps = DATE_PATTERN.captures(revision)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%Y%m%d").to_string())
}

/// Build an output file name.
///
/// Path separators in the line name are replaced so the name stays a
/// single path component.
pub fn output_file_name(
    product: &str,
    line_name: &str,
    stamp: &str,
    epoch_millis: i64,
    ext: &str,
) -> String {
    let line_name = line_name.replace(['/', '\\'], "_");
    format!("{product}_{line_name}_{stamp}_{epoch_millis}.{ext}")
}

/// Write the JSON and diagram exports of a model.
///
/// The date in the file names comes from the model's revision date, or
/// from `now` when the revision has no recognisable date. Both files are
/// written or neither: if the diagram cannot be written, the JSON file
/// already written is removed.
pub fn write_outputs(
    model: &RailwayModel,
    config: &ExportConfig,
    now: DateTime<Local>,
) -> Result<OutputPaths, ExportError> {
    let stamp = model
        .railway_data
        .created
        .as_deref()
        .and_then(revision_stamp)
        .unwrap_or_else(|| now.format("%Y%m%d").to_string());
    let millis = now.timestamp_millis();
    let name = |ext| {
        output_file_name(
            &config.product,
            &model.railway_data.name,
            &stamp,
            millis,
            ext,
        )
    };

    let json = to_json(model, config.pretty_json)?;
    let diagram = oudia::serialize(model);

    let json_path = config.out_dir.join(name(JSON_EXT));
    let diagram_path = config.out_dir.join(name(DIAGRAM_EXT));
    write_file(&json_path, &json)?;
    if let Err(e) = write_file(&diagram_path, &diagram) {
        if let Err(cleanup) = std::fs::remove_file(&json_path) {
            warn!(path = %json_path.display(), error = %cleanup, "could not remove partial export");
        }
        return Err(e);
    }

    info!(
        json = %json_path.display(),
        diagram = %diagram_path.display(),
        "wrote exports"
    );
    Ok(OutputPaths {
        json: json_path,
        diagram: diagram_path,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
