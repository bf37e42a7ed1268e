use std::sync::Arc;

use model::{export_filename, ApiError, ExportFormat, ExportQuota, LawId, Query};
use tracing::debug;

use crate::{RawResponse, RequestEngine};

/// A law export ready to be read, streamed or saved.
#[derive(Debug)]
pub struct ExportDownload {
    /// Suggested file name, derived from the law id and format.
    pub filename: String,
    pub format: ExportFormat,
    pub response: RawResponse,
}

/// Law export downloads and quota.
#[derive(Debug, Clone)]
pub struct Export {
    engine: Arc<RequestEngine>,
}

impl Export {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// Starts downloading `law_id` in `format` (`GET /laws/{id}/export/{format}/`).
    ///
    /// The body is left unread; see [`RawResponse`] for ways to consume it.
    pub async fn download(
        &self,
        law_id: &LawId,
        format: &ExportFormat,
    ) -> Result<ExportDownload, ApiError> {
        let path = format!(
            "/laws/{}/export/{}/",
            law_id.to_path_segment(),
            urlencoding::encode(format.as_str())
        );
        let response = self.engine.get_raw(&path, &Query::new()).await?;
        let filename = export_filename(law_id, format);
        debug!(law_id = %law_id, format = %format, filename = %filename, "export ready");

        Ok(ExportDownload {
            filename,
            format: format.clone(),
            response,
        })
    }

    /// Export allowance for `law_id` (`GET /laws/{id}/export/quota/`).
    pub async fn quota(&self, law_id: &LawId) -> Result<ExportQuota, ApiError> {
        let path = format!("/laws/{}/export/quota/", law_id.to_path_segment());
        self.engine.get_json(&path, &Query::new()).await
    }
}
