use crate::client::Transport;
use crate::form::UploadTarget;
use crate::reply::resolve_reference;
use crate::upload::Uploader;
use crate::UploadResult;
use log::debug;

/// Root folder of IVR extensions on the media host.
pub const IVR_ROOT: &str = "ivr";

impl<T: Transport> Uploader<T> {
    /// Uploads synthesized audio into the extension folder `ivr/<folder>` and
    /// returns its playback reference.
    ///
    /// The bytes are staged in a temporary `temp_*.<extension>` file that is
    /// removed when this returns, whether the upload succeeded or not.
    pub async fn upload_audio(
        &self,
        token: &str,
        audio: &[u8],
        folder: &str,
        extension: &str,
    ) -> UploadResult<String> {
        let temp = tempfile::Builder::new()
            .prefix("temp_")
            .suffix(&format!(".{}", extension))
            .tempfile()?;

        tokio::fs::write(temp.path(), audio).await?;

        let target = UploadTarget::new(token, format!("{}/{}", IVR_ROOT, folder));
        let reply = self.upload(&target, temp.path()).await?;

        debug!("{} -> {}", temp.path().display(), reply);

        resolve_reference(&reply)
    }
}
