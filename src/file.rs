use crate::chunk::{Chunk, ChunkIterator};
use crate::{UploadError, UploadResult};
use futures::stream::{self, Stream};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Lazily reads a file in fixed-size chunks.
///
/// The handle is opened once in [`FileReader::open`] and dropped as soon as the
/// last chunk has been read, after a read error, or when the reader itself is
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct FileReader {
    size_iter: ChunkIterator,
    size: u64,
    file: Option<File>,
}

impl FileReader {
    pub async fn open<P: AsRef<Path>>(path: P, chunk_size: u64) -> UploadResult<Self> {
        if chunk_size == 0 {
            return Err(UploadError::InvalidChunkSize);
        }

        let file = File::open(&path).await?;

        let size = file.metadata().await?.len();

        let size_iter = ChunkIterator::new(size, chunk_size);

        // nothing to read, release the handle right away
        let file = if size_iter.chunk_count() == 0 {
            None
        } else {
            Some(file)
        };

        Ok(Self {
            size_iter,
            size,
            file,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn chunk_count(&self) -> usize {
        self.size_iter.chunk_count()
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    pub async fn read_chunk(&mut self) -> Option<UploadResult<Chunk>> {
        let (index, range) = match self.size_iter.next() {
            Some(pos) => pos,
            None => {
                self.file = None;
                return None;
            }
        };

        let file = self.file.as_mut()?;

        let mut data = vec![0; (range.end - range.start) as usize];
        match file.read_exact(&mut data).await {
            Ok(_) => {
                if index + 1 == self.size_iter.chunk_count() {
                    self.file = None;
                }
                Some(Ok(Chunk { index, data }))
            }
            Err(e) => {
                self.file = None;
                Some(Err(e.into()))
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = UploadResult<Chunk>> {
        stream::unfold(self, |mut reader| async move {
            reader.read_chunk().await.map(|item| (item, reader))
        })
    }
}
