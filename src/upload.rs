use crate::chunk::Chunk;
use crate::client::{Endpoint, HttpTransport, Transport};
use crate::config::UploadConfig;
use crate::file::FileReader;
use crate::form::{encode_part, PartForm, UploadTarget};
use crate::json::PartStatus;
use crate::reply::{resolve_reference, RemoteReply};
use crate::session::UploadSession;
use crate::{UploadError, UploadResult};
use futures::StreamExt;
use log::{debug, info, warn};
use serde_json::Value;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Drives an upload from a local file to the media host.
///
/// Files up to `chunk_size` bytes go up in one request. Larger files are sent
/// as a session of ordered parts followed by a completion call. Each request is
/// awaited before the next chunk is read, so a session never has more than one
/// request in flight.
#[derive(Clone, Debug)]
pub struct Uploader<T = HttpTransport> {
    transport: T,
    chunk_size: u64,
}

impl Uploader<HttpTransport> {
    pub fn new(config: &UploadConfig) -> UploadResult<Self> {
        let transport = HttpTransport::new(config.base_url.as_str(), config.timeout)?;

        Self::with_transport(transport, config.chunk_size)
    }
}

impl<T: Transport> Uploader<T> {
    pub fn with_transport(transport: T, chunk_size: u64) -> UploadResult<Self> {
        if chunk_size == 0 {
            return Err(UploadError::InvalidChunkSize);
        }

        Ok(Self {
            transport,
            chunk_size,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub async fn upload(
        &self,
        target: &UploadTarget,
        path: impl AsRef<Path>,
    ) -> UploadResult<RemoteReply> {
        self.upload_with_cancel(target, path, CancellationToken::new())
            .await
    }

    /// Uploads and normalizes the reply into a playback reference.
    pub async fn upload_reference(
        &self,
        target: &UploadTarget,
        path: impl AsRef<Path>,
    ) -> UploadResult<String> {
        let reply = self.upload(target, path).await?;

        resolve_reference(&reply)
    }

    pub async fn upload_with_cancel(
        &self,
        target: &UploadTarget,
        path: impl AsRef<Path>,
        cancel: CancellationToken,
    ) -> UploadResult<RemoteReply> {
        let path = path.as_ref();

        if !tokio::fs::metadata(path).await?.is_file() {
            return Err(UploadError::NotAFile(path.to_path_buf()));
        }

        let file_name = match target.display_name() {
            Some(name) => name.to_owned(),
            None => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let reader = FileReader::open(path, self.chunk_size).await?;

        if reader.size() <= self.chunk_size {
            debug!(
                "{}: {} bytes, single-shot upload",
                path.display(),
                reader.size()
            );
            self.single_shot(target, &file_name, reader, &cancel).await
        } else {
            debug!(
                "{}: {} bytes, {} parts",
                path.display(),
                reader.size(),
                reader.chunk_count()
            );
            self.sequenced(target, &file_name, reader, &cancel).await
        }
    }

    async fn single_shot(
        &self,
        target: &UploadTarget,
        file_name: &str,
        mut reader: FileReader,
        cancel: &CancellationToken,
    ) -> UploadResult<RemoteReply> {
        if cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let data = match reader.read_chunk().await {
            Some(chunk) => chunk?.data,
            None => Vec::new(),
        };

        let form = encode_part(target, file_name, Some(data), None);
        let body = self.send(Endpoint::Upload, form, cancel).await?;

        let value: Value = serde_json::from_str(&body)?;

        if value.get("success") == Some(&Value::Bool(false)) {
            let status: PartStatus = serde_json::from_value(value)?;
            warn!("{} rejected: {:?}", file_name, status.message);
            return Err(UploadError::Rejected {
                part: 0,
                message: status.message.unwrap_or(body),
            });
        }

        info!("{} uploaded, response: {}.", file_name, value);

        Ok(RemoteReply::Json(value))
    }

    async fn sequenced(
        &self,
        target: &UploadTarget,
        file_name: &str,
        reader: FileReader,
        cancel: &CancellationToken,
    ) -> UploadResult<RemoteReply> {
        let session = UploadSession::new(reader.size(), self.chunk_size);

        let chunks = reader.into_stream();
        futures::pin_mut!(chunks);

        loop {
            if cancel.is_cancelled() {
                return Err(UploadError::Cancelled);
            }

            let Chunk { index, data } = match chunks.next().await {
                Some(chunk) => chunk?,
                None => break,
            };
            let len = data.len();

            let meta = session.part(index);
            let form = encode_part(target, file_name, Some(data), Some(&meta));
            let body = self.send(Endpoint::Upload, form, cancel).await?;

            let status: PartStatus = serde_json::from_str(&body)?;
            if !status.success {
                warn!(
                    "{}.part{} rejected, response: {}.",
                    session.id(),
                    index,
                    body
                );
                return Err(UploadError::Rejected {
                    part: index,
                    message: status.message.unwrap_or(body),
                });
            }

            info!(
                "{}.part{} ({} bytes) uploaded, response: {}.",
                session.id(),
                index,
                len,
                body
            );
        }

        let form = encode_part(target, file_name, None, Some(&session.completion()));
        let body = self.send(Endpoint::Done, form, cancel).await?;

        info!(
            "{} completed ({} parts), response: {}.",
            session.id(),
            session.part_count(),
            body
        );

        Ok(RemoteReply::Text(body))
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        form: PartForm,
        cancel: &CancellationToken,
    ) -> UploadResult<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UploadError::Cancelled),
            result = self.transport.send(endpoint, form) => result,
        }
    }
}

/// Uploads `path` to `destination` with the default configuration and returns
/// the playback reference.
pub async fn upload(
    token: &str,
    path: impl AsRef<Path>,
    destination: &str,
    display_name: Option<&str>,
) -> UploadResult<String> {
    let mut target = UploadTarget::new(token, destination);
    if let Some(name) = display_name {
        target = target.with_display_name(name);
    }

    Uploader::new(&UploadConfig::default())?
        .upload_reference(&target, path)
        .await
}
