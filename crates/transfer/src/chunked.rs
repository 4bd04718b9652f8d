use std::path::Path;

use futures_util::Stream;
use tokio::io::AsyncReadExt;

use crate::progress::{ProgressCounter, UploadProgress};
use crate::{DEFAULT_CHUNK_SIZE, TransferError};

/// Reads a file in fixed-size chunks, counting bytes as they are handed out.
pub struct FileStream {
    file: tokio::fs::File,
    chunk_size: usize,
    counter: ProgressCounter,
    file_size: u64,
}

impl FileStream {
    /// Opens `path` for chunked reading.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] is used.
    pub async fn open(path: &Path, chunk_size: usize) -> Result<Self, TransferError> {
        let file = tokio::fs::File::open(path).await?;
        let file_size = file.metadata().await?.len();
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Ok(Self {
            file,
            chunk_size,
            counter: ProgressCounter::new(file_size),
            file_size,
        })
    }

    /// Total file size in bytes, as seen when the file was opened.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Progress after the last chunk handed out.
    pub fn progress(&self) -> UploadProgress {
        self.counter.current()
    }

    /// Reads the next chunk. Returns `None` at EOF.
    pub async fn next_chunk(&mut self) -> std::io::Result<Option<(Vec<u8>, UploadProgress)>> {
        let remaining = self.file_size.saturating_sub(self.counter.current().loaded);
        if remaining == 0 {
            return Ok(None);
        }

        let read_size = remaining.min(self.chunk_size as u64) as usize;
        let mut buf = vec![0u8; read_size];
        let n = self.file.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);

        let progress = self.counter.advance(n as u64);
        Ok(Some((buf, progress)))
    }

    /// Turns the reader into a byte stream suitable for a streaming request
    /// body. `on_progress` runs once per chunk, after it is read.
    pub fn into_stream<F>(
        self,
        on_progress: F,
    ) -> impl Stream<Item = std::io::Result<Vec<u8>>> + Send + 'static
    where
        F: FnMut(UploadProgress) + Send + 'static,
    {
        futures_util::stream::try_unfold(
            (self, on_progress),
            |(mut reader, mut on_progress)| async move {
                let next: std::io::Result<_> = match reader.next_chunk().await? {
                    Some((chunk, progress)) => {
                        on_progress(progress);
                        Ok(Some((chunk, (reader, on_progress))))
                    }
                    None => Ok(None),
                };
                next
            },
        )
    }
}
