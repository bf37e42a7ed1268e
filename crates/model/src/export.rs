//! Export quota records and download naming.

use serde::{Deserialize, Serialize};

use crate::{ExportFormat, LawId};

/// Export allowance for the caller's tier, from `GET /laws/{id}/export/quota/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportQuota {
    pub tier: String,
    pub used: u64,
    pub limit: u64,
    pub remaining: u64,
    #[serde(default)]
    pub formats_available: Vec<ExportFormat>,
}

impl ExportQuota {
    /// Returns `true` if the tier may export in `format`.
    pub fn allows(&self, format: &ExportFormat) -> bool {
        self.formats_available.contains(format)
    }

    /// Returns `true` when no exports remain in the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// File name for a downloaded export: the law id with path separators
/// replaced by `_`, plus the format's extension.
///
/// ```
/// use model::{export_filename, ExportFormat, LawId};
///
/// let id = LawId::new("es/ley/2015/39").unwrap();
/// let format = ExportFormat::new("latex").unwrap();
/// assert_eq!(export_filename(&id, &format), "es_ley_2015_39.tex");
/// ```
pub fn export_filename(law_id: &LawId, format: &ExportFormat) -> String {
    let stem: String = law_id
        .as_str()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_passes_through_non_latex_formats() {
        let id = LawId::new("BOE-A-1978-31229").unwrap();
        let pdf = ExportFormat::new("pdf").unwrap();
        assert_eq!(export_filename(&id, &pdf), "BOE-A-1978-31229.pdf");
    }

    #[test]
    fn test_quota_allows_only_listed_formats() {
        let quota: ExportQuota = serde_json::from_str(
            r#"{"tier":"free","used":3,"limit":3,"remaining":0,"formats_available":["pdf","markdown"]}"#,
        )
        .unwrap();

        assert!(quota.allows(&ExportFormat::new("pdf").unwrap()));
        assert!(!quota.allows(&ExportFormat::new("latex").unwrap()));
        assert!(quota.is_exhausted());
    }
}
