use super::extension::extension_for;
use super::writer::write_atomic;
use crate::error::SkipReason;
use crate::fetch::{Status, SubmissionSource, SubmissionSummary};
use crate::utils::compute_content_digest;
use log::{debug, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What a successful materialization did to the solution file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
  Created,
  Updated,
  /// The file already held exactly this code; nothing was written.
  Unchanged,
}

/// A solution file produced from one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
  pub path: PathBuf,
  pub change: Change,
}

/// Turns accepted submission summaries into solution files.
///
/// Every file lives directly in the solutions directory and is named
/// `{title_slug}.{extension}`. A later submission for the same problem
/// overwrites the earlier file.
pub struct Materializer<'a> {
  source: &'a dyn SubmissionSource,
  solutions_dir: PathBuf,
}

impl<'a> Materializer<'a> {
  pub fn new(source: &'a dyn SubmissionSource, solutions_dir: impl Into<PathBuf>) -> Self {
    Materializer {
      source,
      solutions_dir: solutions_dir.into(),
    }
  }

  /// Resolves one summary into a written solution file.
  ///
  /// Summaries with a non-accepted status, or with a slug that is not a plain
  /// file name, are skipped without fetching their detail. Detail fetch and
  /// write failures are logged and returned as a [`SkipReason`]; none of them
  /// affects other submissions.
  ///
  /// # Arguments
  ///
  /// * `summary` - The submission to materialize.
  ///
  /// # Returns
  ///
  /// * `Ok(Materialized)` - The destination path and whether it was created, updated or left as is.
  /// * `Err(SkipReason)` - Why no file was produced.
  pub async fn materialize(&self, summary: &SubmissionSummary) -> Result<Materialized, SkipReason> {
    if let Some(status @ Status::Other(_)) = &summary.status {
      debug!("Skipping {} ({}): {}", summary.title_slug, summary.id, status);
      return Err(SkipReason::NotAccepted(status.to_string()));
    }
    if !is_plain_slug(&summary.title_slug) {
      warn!("Skipped submission {}: unusable title slug {:?}", summary.id, summary.title_slug);
      return Err(SkipReason::UnsafeSlug(summary.title_slug.clone()));
    }

    let detail = self.source.fetch_detail(&summary.id).await.map_err(|e| {
      warn!("Skipped {}: could not fetch submission {}: {}", summary.title_slug, summary.id, e);
      SkipReason::DetailFetchFailed(e)
    })?;

    let ext = extension_for(&detail.lang);
    let path = self.solutions_dir.join(format!("{}.{}", summary.title_slug, ext));

    let change = self
      .write_solution(&path, detail.code.as_bytes())
      .await
      .map_err(|source| {
        warn!("Skipped {}: could not write {}: {}", summary.title_slug, path.display(), source);
        SkipReason::WriteFailed {
          path: path.clone(),
          source,
        }
      })?;

    match change {
      Change::Unchanged => debug!("{} is up to date", path.display()),
      _ => info!("Saved {} ({:?})", path.display(), change),
    }
    Ok(Materialized { path, change })
  }

  async fn write_solution(&self, path: &Path, code: &[u8]) -> io::Result<Change> {
    fs::create_dir_all(&self.solutions_dir).await?;

    let change = match fs::read(path).await {
      Ok(existing) if compute_content_digest(&existing) == compute_content_digest(code) => {
        return Ok(Change::Unchanged);
      }
      Ok(_) => Change::Updated,
      Err(e) if e.kind() == io::ErrorKind::NotFound => Change::Created,
      Err(e) => return Err(e),
    };

    write_atomic(path, code).await?;
    Ok(change)
  }
}

/// A slug must name a file directly inside the solutions directory.
fn is_plain_slug(slug: &str) -> bool {
  !slug.trim().is_empty()
    && !slug.contains(['/', '\\', '\0'])
    && !slug.contains("..")
    && !Path::new(slug).is_absolute()
}
