use crate::errors::EngineError;

/// Dense embedding table: one contiguous f32 buffer holding a fixed-width
/// vector per vocabulary entry. The vector for index `i` occupies the
/// half-open slice `[i * dimension, (i + 1) * dimension)`.
///
/// Read-only after construction; shared by all similarity queries of a
/// session
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    dimension: usize,
    values: Vec<f32>,
}

impl EmbeddingTable {
    /// Decodes a flat little-endian f32 buffer for `words` vocabulary
    /// entries of `dimension` width.
    ///
    /// The decoded element count must equal `words * dimension` exactly.
    /// Anything else, including trailing bytes that do not form a whole
    /// float, fails with a DataIntegrity error rather than being truncated
    /// or padded: a silently misaligned buffer would make every subsequent
    /// query read garbage vectors
    pub fn from_le_bytes(
        bytes: &[u8],
        words: usize,
        dimension: usize,
    ) -> Result<Self, EngineError> {
        let expected = words * dimension;
        let mut chunks = bytes.chunks_exact(4);
        let values: Vec<f32> = chunks
            .by_ref()
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        if values.len() != expected || !chunks.remainder().is_empty() {
            return Err(EngineError::DataIntegrity {
                actual: values.len(),
                expected,
                words,
                dimension,
            });
        }
        Ok(Self { dimension, values })
    }

    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.values.get(start..end)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors held
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            return 0;
        }
        self.values.len() / self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
