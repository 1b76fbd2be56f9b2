use crate::form::PartForm;
use crate::UploadResult;
use async_trait::async_trait;
use reqwest::IntoUrl;
use std::time::Duration;
use url::Url;

pub const UPLOAD_ROUTE: &str = "api/UploadFile";

/// Which variant of the upload endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `api/UploadFile`, single-shot uploads and data parts
    Upload,
    /// `api/UploadFile?done`, the completion call of a session
    Done,
}

/// Sends one encoded part and hands back the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, form: PartForm) -> UploadResult<String>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: impl IntoUrl, timeout: Duration) -> UploadResult<Self> {
        let mut base_url = base_url.into_url()?;

        // join() would replace the last segment otherwise
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn get_base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> UploadResult<Url> {
        let mut url = self.base_url.join(UPLOAD_ROUTE)?;

        if endpoint == Endpoint::Done {
            url.set_query(Some("done"));
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: Endpoint, form: PartForm) -> UploadResult<String> {
        let url = self.endpoint_url(endpoint)?;

        let req = self
            .client
            .post(url)
            .multipart(form.into_multipart()?)
            .build()?;

        Ok(self.client.execute(req).await?.text().await?)
    }
}
