use crate::session::PartMeta;
use crate::UploadResult;
use reqwest::multipart::{Form, Part};

/// Field carrying the whole file on a single-shot upload.
pub const FILE_FIELD: &str = "file";
/// Field carrying the chunk bytes of a sequenced part.
pub const PART_FILE_FIELD: &str = "qqfile";

const UPLOADER: &str = "yemot-admin";
const OCTET_STREAM: &str = "application/octet-stream";

/// Where an upload goes and who is allowed to put it there.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    token: String,
    path: String,
    display_name: Option<String>,
}

impl UploadTarget {
    pub fn new(token: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            path: path.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Transport-neutral multipart body for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartForm {
    fields: Vec<(&'static str, String)>,
    file: Option<FilePart>,
}

impl PartForm {
    fn text(mut self, name: &'static str, value: impl ToString) -> Self {
        self.fields.push((name, value.to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn file(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }

    pub fn into_multipart(self) -> UploadResult<Form> {
        let mut form = Form::new();

        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        if let Some(FilePart {
            field,
            file_name,
            data,
        }) = self.file
        {
            let part = Part::bytes(data)
                .file_name(file_name)
                .mime_str(OCTET_STREAM)?;
            form = form.part(field, part);
        }

        Ok(form)
    }
}

/// Builds the body for a single-shot upload (`meta == None`), a data part, or
/// the completion call of a session.
pub fn encode_part(
    target: &UploadTarget,
    file_name: &str,
    bytes: Option<Vec<u8>>,
    meta: Option<&PartMeta>,
) -> PartForm {
    let mut form = PartForm::default()
        .text("token", target.token())
        .text("path", target.path())
        .text("convertAudio", 1)
        .text("autoNumbering", 1);

    if let Some(meta) = meta {
        form = form
            .text("uploader", UPLOADER)
            .text("qquuid", meta.id)
            .text("qqfilename", file_name)
            .text("qqtotalfilesize", meta.file_size)
            .text("qqtotalparts", meta.part_count);

        // the completion call carries no payload
        if meta.is_data() {
            let len = bytes.as_ref().map_or(0, Vec::len);
            form = form
                .text("qqpartbyteoffset", meta.byte_offset())
                .text("qqpartindex", meta.part)
                .text("qqchunksize", len);
        }
    }

    if let Some(data) = bytes {
        form.file = Some(FilePart {
            field: if meta.is_some() {
                PART_FILE_FIELD
            } else {
                FILE_FIELD
            },
            file_name: file_name.to_owned(),
            data,
        });
    }

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UploadSession;

    fn target() -> UploadTarget {
        UploadTarget::new("0771234567:1234", "ivr/1")
    }

    #[test]
    fn single_shot_has_no_session_fields() {
        let form = encode_part(&target(), "hello.mp3", Some(vec![1; 10]), None);

        assert_eq!(form.get("token"), Some("0771234567:1234"));
        assert_eq!(form.get("path"), Some("ivr/1"));
        assert_eq!(form.get("convertAudio"), Some("1"));
        assert_eq!(form.get("autoNumbering"), Some("1"));
        assert!(form.get("qquuid").is_none());
        assert!(form.get("qqpartindex").is_none());

        let file = form.file().unwrap();
        assert_eq!(file.field, FILE_FIELD);
        assert_eq!(file.file_name, "hello.mp3");
        assert_eq!(file.data.len(), 10);
    }

    #[test]
    fn data_part_carries_offset_index_and_length() {
        let session = UploadSession::new(10, 4);
        let meta = session.part(2);
        let form = encode_part(&target(), "big.wav", Some(vec![0; 2]), Some(&meta));

        assert_eq!(form.get("uploader"), Some("yemot-admin"));
        assert_eq!(form.get("qquuid"), Some(session.id().to_string().as_str()));
        assert_eq!(form.get("qqfilename"), Some("big.wav"));
        assert_eq!(form.get("qqtotalfilesize"), Some("10"));
        assert_eq!(form.get("qqtotalparts"), Some("3"));
        assert_eq!(form.get("qqpartbyteoffset"), Some("8"));
        assert_eq!(form.get("qqpartindex"), Some("2"));
        assert_eq!(form.get("qqchunksize"), Some("2"));
        assert_eq!(form.get("token"), Some("0771234567:1234"));
        assert_eq!(form.file().unwrap().field, PART_FILE_FIELD);
    }

    #[test]
    fn completion_call_has_no_payload() {
        let session = UploadSession::new(10, 4);
        let form = encode_part(&target(), "big.wav", None, Some(&session.completion()));

        assert_eq!(form.get("qqtotalparts"), Some("3"));
        assert!(form.get("qqpartindex").is_none());
        assert!(form.get("qqpartbyteoffset").is_none());
        assert!(form.get("qqchunksize").is_none());
        assert!(form.file().is_none());
    }

    #[test]
    fn converts_into_reqwest_form() {
        let form = encode_part(&target(), "a.mp3", Some(vec![1, 2, 3]), None);
        assert!(form.into_multipart().is_ok());
    }
}
