// prefix.rs - Output filename prefixes

use std::path::Path;

/// Appended to the input stem when no prefix is given
pub const DEFAULT_PREFIX_TAG: &str = "_mutinfo";

/// Derive the output prefix from the alignment path: drop a trailing `.gz`,
/// then the remaining extension, then append `_mutinfo`.
/// Directory components are kept so outputs land next to the input.
pub fn default_prefix(msa_path: &str) -> String {
    let mut stem = Path::new(msa_path).to_path_buf();
    let is_gz = stem
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);
    if is_gz {
        stem.set_extension("");
    }
    stem.set_extension("");
    format!("{}{}", stem.to_string_lossy(), DEFAULT_PREFIX_TAG)
}

/// Path of the artifact for one task: `prefix + suffix + extension`
pub fn artifact_path(prefix: &str, suffix: &str, extension: &str) -> String {
    format!("{}{}{}", prefix, suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        assert_eq!(default_prefix("piwi_refined.slx"), "piwi_refined_mutinfo");
        assert_eq!(default_prefix("piwi_refined.slx.gz"), "piwi_refined_mutinfo");
        assert_eq!(default_prefix("piwi_refined.slx.GZ"), "piwi_refined_mutinfo");
        assert_eq!(default_prefix("data/pf00001"), "data/pf00001_mutinfo");
        assert_eq!(default_prefix("runs.v2/piwi.fasta"), "runs.v2/piwi_mutinfo");
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(artifact_path("piwi_mutinfo", "", ".txt"), "piwi_mutinfo.txt");
        assert_eq!(
            artifact_path("piwi_mutinfo", "_corr_apc", ".svg"),
            "piwi_mutinfo_corr_apc.svg"
        );
    }
}
