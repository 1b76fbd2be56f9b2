//! Uploading audio files to an IVR media host.
//!
//! Small files are posted in one request. Files larger than the chunk size are
//! split into ordered parts tagged with a session id and reassembled remotely
//! after a final completion call.

mod audio;
mod chunk;
mod client;
mod config;
mod error;
mod file;
mod form;
mod json;
mod reply;
mod session;
mod upload;

pub use audio::IVR_ROOT;
pub use chunk::{part_count, Chunk};
pub use client::{Endpoint, HttpTransport, Transport, UPLOAD_ROUTE};
pub use config::{UploadConfig, DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT};
pub use error::{UploadError, UploadResult};
pub use file::FileReader;
pub use form::{encode_part, FilePart, PartForm, UploadTarget, FILE_FIELD, PART_FILE_FIELD};
pub use json::PartStatus;
pub use reply::{extract_reference, parse_reply, resolve_reference, ParsedReply, RemoteReply};
pub use session::{PartMeta, UploadSession};
pub use upload::{upload, Uploader};

pub use tokio_util::sync::CancellationToken;
