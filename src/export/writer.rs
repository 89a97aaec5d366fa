use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes `contents` to `path`, replacing any existing file in one step.
///
/// The data goes to a hidden temporary file next to the destination, which is
/// then renamed over it. A reader of `path` sees either the old file or the
/// complete new one, never a partial write. The temporary file is removed if
/// the write or the rename fails.
///
/// # Returns
///
/// * `Ok(())` - The destination now holds `contents`.
/// * `Err(io::Error)` - The temporary file could not be written or renamed.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
  let tmp = temp_path_for(path)?;

  let result = async {
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await
  }
  .await;

  if result.is_err() {
    let _ = fs::remove_file(&tmp).await;
  }
  result
}

/// `dir/.name.tmp` for `dir/name`.
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
  let name = path.file_name().ok_or_else(|| {
    io::Error::new(
      io::ErrorKind::InvalidInput,
      format!("{} has no file name", path.display()),
    )
  })?;
  let mut tmp_name = std::ffi::OsString::from(".");
  tmp_name.push(name);
  tmp_name.push(".tmp");
  Ok(path.with_file_name(tmp_name))
}
