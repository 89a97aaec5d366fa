/// Extension used when the judge reports a language missing from [`EXTENSIONS`].
pub const FALLBACK_EXTENSION: &str = "txt";

/// Lowercase judge language tag to file extension.
const EXTENSIONS: &[(&str, &str)] = &[
  ("python3", "py"),
  ("python", "py"),
  ("java", "java"),
  ("cpp", "cpp"),
  ("c", "c"),
  ("csharp", "cs"),
  ("javascript", "js"),
  ("typescript", "ts"),
  ("go", "go"),
  ("golang", "go"),
  ("ruby", "rb"),
  ("swift", "swift"),
  ("kotlin", "kt"),
  ("scala", "scala"),
  ("php", "php"),
  ("mysql", "sql"),
  ("mssql", "sql"),
  ("oraclesql", "sql"),
  ("postgresql", "sql"),
  ("bash", "sh"),
];

/// Resolves the file extension for a judge-reported language.
///
/// Matching ignores case and surrounding whitespace. Unknown languages map to
/// [`FALLBACK_EXTENSION`], so every submission gets a file.
///
/// # Examples
///
/// ```
/// use leetcode_sync::export::extension_for;
/// assert_eq!(extension_for("Python3"), "py");
/// assert_eq!(extension_for("rust"), "txt");
/// ```
pub fn extension_for(lang: &str) -> &'static str {
  let lang = lang.trim().to_lowercase();
  EXTENSIONS
    .iter()
    .find(|(tag, _)| *tag == lang)
    .map(|(_, ext)| *ext)
    .unwrap_or(FALLBACK_EXTENSION)
}
