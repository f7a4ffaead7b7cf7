use ahash::AHashMap;
use kotomap_types::point::Point;
use kotomap_types::resource::ResourceKind;

use crate::errors::EngineError;

/// Word → 2-D point table used purely for plotting. Keys are independent of
/// the vocabulary: a word may have a coordinate without an embedding and
/// vice versa
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    points: AHashMap<String, Point>,
    dropped_rows: usize,
}

impl CoordinateTable {
    /// Parses line-oriented `word,x,y` text. The first line is a header and
    /// is skipped; blank lines are ignored. Rows whose coordinates fail to
    /// parse as finite numbers are dropped without error; the count of
    /// dropped rows is kept for diagnostics only
    pub fn from_csv(bytes: &[u8]) -> Result<Self, EngineError> {
        let text = std::str::from_utf8(bytes).map_err(|error| EngineError::ResourceLoad {
            resource: ResourceKind::Coordinates,
            reason: error.to_string(),
        })?;

        let mut points = AHashMap::new();
        let mut dropped_rows = 0;
        for line in text.lines().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse_row(line) {
                Some((word, point)) => {
                    points.insert(word, point);
                }
                None => dropped_rows += 1,
            }
        }
        if dropped_rows > 0 {
            tracing::debug!(dropped_rows, "dropped malformed coordinate rows");
        }
        Ok(Self {
            points,
            dropped_rows,
        })
    }

    fn parse_row(line: &str) -> Option<(String, Point)> {
        let mut fields = line.splitn(3, ',');
        let word = fields.next()?.trim();
        let x: f32 = fields.next()?.trim().parse().ok()?;
        let y: f32 = fields.next()?.trim().parse().ok()?;
        if word.is_empty() || !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some((word.to_string(), Point::new(x, y)))
    }

    pub fn get(&self, word: &str) -> Option<Point> {
        self.points.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.points.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}
