//! Map sources and the plain-text map format.
//!
//! # Text format
//!
//! Whitespace-separated numbers; each street name occupies its own line and
//! may contain spaces.
//!
//! ```text
//! 4 3                     <intersection count> <street count>
//! College Ave             <street name>
//! 2                       <block count>
//! 1 2 12.5                <block number> <point count> <road width>
//! 0 0                     <x> <y>, point-count times
//! 10 0
//! 2 3 12.5
//! 10 0
//! 15 2
//! 20 0
//! Hamilton St
//! ...
//! ```
//!
//! The declared intersection count is a capacity hint only; the real count
//! comes from deduplicating block endpoints.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use rn_core::Coordinate;

use crate::model::{RawBlock, RawBlockRecord, RawStreet};
use crate::{GraphError, GraphResult};

/// Upper bound on storage reserved up front from a count read off the input.
/// Larger counts still load; the vectors simply grow as records arrive.
pub(crate) const PREALLOC_LIMIT: usize = 1024;

// ── MapData ───────────────────────────────────────────────────────────────────

/// A fully loaded map, ready for graph construction.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapData {
    /// Intersection count declared by the source, used to pre-size storage.
    pub intersection_hint: usize,
    pub streets:           Vec<RawStreet>,
}

impl MapData {
    pub fn new(streets: Vec<RawStreet>) -> Self {
        Self { intersection_hint: 0, streets }
    }

    pub fn block_count(&self) -> usize {
        self.streets.iter().map(|s| s.blocks.len()).sum()
    }

    /// One record per physical block, in street then block order.
    pub fn raw_blocks(&self) -> Vec<RawBlockRecord> {
        self.streets
            .iter()
            .flat_map(|street| {
                street.blocks.iter().map(move |b| RawBlockRecord {
                    street_name:  street.name.clone(),
                    block_number: b.number,
                    road_width:   b.road_width,
                    points:       b.points.clone(),
                })
            })
            .collect()
    }
}

// ── BlockSource ───────────────────────────────────────────────────────────────

/// Supplier of raw street records.
///
/// Graph construction only depends on this trait, so maps can come from the
/// text format, from code, or from any other loader.
pub trait BlockSource {
    fn load_streets(&mut self) -> GraphResult<MapData>;
}

impl BlockSource for MapData {
    fn load_streets(&mut self) -> GraphResult<MapData> {
        Ok(self.clone())
    }
}

impl BlockSource for Vec<RawStreet> {
    fn load_streets(&mut self) -> GraphResult<MapData> {
        Ok(MapData::new(self.clone()))
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a map from a text file.
pub fn load_map_file(path: &Path) -> GraphResult<MapData> {
    let file = File::open(path)?;
    load_map_reader(BufReader::new(file))
}

/// Like [`load_map_file`] but accepts any `BufRead` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_map_reader<R: BufRead>(reader: R) -> GraphResult<MapData> {
    MapReader::new(reader).load_streets()
}

// ── MapReader ─────────────────────────────────────────────────────────────────

/// Text-format [`BlockSource`].
pub struct MapReader<R> {
    lines:   Lines<R>,
    line_no: usize,
    tokens:  VecDeque<String>,
}

impl<R: BufRead> MapReader<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0, tokens: VecDeque::new() }
    }

    fn error(&self, message: impl Into<String>) -> GraphError {
        GraphError::Parse { line: self.line_no, message: message.into() }
    }

    /// Next non-blank line, trimmed.  `None` at end of input.
    fn next_nonblank_line(&mut self) -> GraphResult<Option<String>> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
        Ok(None)
    }

    fn next_token(&mut self, what: &str) -> GraphResult<String> {
        while self.tokens.is_empty() {
            match self.next_nonblank_line()? {
                Some(line) => self.tokens.extend(line.split_whitespace().map(str::to_owned)),
                None => return Err(self.error(format!("unexpected end of input, expected {what}"))),
            }
        }
        self.tokens
            .pop_front()
            .ok_or_else(|| self.error(format!("expected {what}")))
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> GraphResult<T> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid {what} {token:?}")))
    }

    /// A whole line of text.  Numbers left on the previous line are an error.
    fn read_name(&mut self) -> GraphResult<String> {
        if let Some(extra) = self.tokens.front() {
            return Err(self.error(format!("unexpected trailing token {extra:?}")));
        }
        self.next_nonblank_line()?
            .ok_or_else(|| self.error("unexpected end of input, expected street name"))
    }

    fn read_block(&mut self) -> GraphResult<RawBlock> {
        let number: u32 = self.parse("block number")?;
        let point_count: usize = self.parse("point count")?;
        let road_width: f64 = self.parse("road width")?;
        let mut points = Vec::with_capacity(point_count.min(PREALLOC_LIMIT));
        for _ in 0..point_count {
            let x: i32 = self.parse("x coordinate")?;
            let y: i32 = self.parse("y coordinate")?;
            points.push(Coordinate::new(x, y));
        }
        Ok(RawBlock { number, road_width, points })
    }
}

impl<R: BufRead> BlockSource for MapReader<R> {
    fn load_streets(&mut self) -> GraphResult<MapData> {
        let intersection_hint: usize = self.parse("intersection count")?;
        let street_count: usize = self.parse("street count")?;

        let mut streets = Vec::with_capacity(street_count.min(PREALLOC_LIMIT));
        for _ in 0..street_count {
            let name = self.read_name()?;
            let block_count: usize = self.parse("block count")?;
            let mut blocks = Vec::with_capacity(block_count.min(PREALLOC_LIMIT));
            for _ in 0..block_count {
                blocks.push(self.read_block()?);
            }
            streets.push(RawStreet { name, blocks });
        }

        if let Some(extra) = self.tokens.front() {
            return Err(self.error(format!("unexpected trailing token {extra:?}")));
        }
        if self.next_nonblank_line()?.is_some() {
            return Err(self.error(format!("expected end of input after {street_count} streets")));
        }

        Ok(MapData { intersection_hint, streets })
    }
}
