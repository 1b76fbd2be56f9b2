use crate::chunk::part_count;
use uuid::Uuid;

/// A sequenced upload of one large file.
///
/// The remote side groups parts by `id` and reassembles them once the
/// completion call arrives.
#[derive(Debug, Clone)]
pub struct UploadSession {
    id: Uuid,
    file_size: u64,
    chunk_size: u64,
    part_count: usize,
}

/// Metadata for one request of an [`UploadSession`].
///
/// `part < part_count` marks a data-bearing part, `part == part_count` the
/// completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartMeta {
    pub id: Uuid,
    pub file_size: u64,
    pub part_count: usize,
    pub part: usize,
    chunk_size: u64,
}

impl UploadSession {
    pub fn new(file_size: u64, chunk_size: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_size,
            chunk_size,
            part_count: part_count(file_size, chunk_size),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn part_count(&self) -> usize {
        self.part_count
    }

    pub fn part(&self, part: usize) -> PartMeta {
        PartMeta {
            id: self.id,
            file_size: self.file_size,
            part_count: self.part_count,
            part,
            chunk_size: self.chunk_size,
        }
    }

    pub fn completion(&self) -> PartMeta {
        self.part(self.part_count)
    }
}

impl PartMeta {
    pub fn is_data(&self) -> bool {
        self.part < self.part_count
    }

    pub fn byte_offset(&self) -> u64 {
        self.part as u64 * self.chunk_size
    }
}
