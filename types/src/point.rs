use serde::Deserialize;
use serde::Serialize;

/// A 2-D coordinate as stored in the coordinate table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One entry of the plotted word set: a word together with the coordinate it
/// is drawn at. The position of an entry within the plotted set is the
/// selection index the charting surface reports back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotEntry {
    pub word: String,
    pub point: Point,
}

impl PlotEntry {
    pub fn new(word: String, point: Point) -> Self {
        Self { word, point }
    }
}

/// A ranked similarity result for one candidate word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub score: f32,
}
