//! Registry of radical chords, one per intersecting pair.
//!
//! This is the input set for the chord-crossing step that looks for radical
//! centers; the registry itself does no line math.

use crate::cache::{Chord, IntersectionCache};
use crate::circle::CircleIndex;
use crate::geometry::Point2;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Unordered pair of circle indices, stored smaller first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    lo: CircleIndex,
    hi: CircleIndex,
}

impl PairKey {
    pub fn new(a: CircleIndex, b: CircleIndex) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn lo(&self) -> CircleIndex {
        self.lo
    }

    pub fn hi(&self) -> CircleIndex {
        self.hi
    }

    /// Deterministic RGB colour used when drawing this pair's chord.
    pub fn display_color(&self) -> [u8; 3] {
        let hi = self.hi.0;
        let lo = self.lo.0;
        let channel = |a: u64, b: u64| (hi.wrapping_mul(a).wrapping_add(lo.wrapping_mul(b)) % 256) as u8;
        [channel(83, 77), channel(39, 11), channel(41, 13)]
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

// Serialised as "lo-hi" so the registry is a plain JSON object.
impl Serialize for PairKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadicalLineRegistry {
    lines: BTreeMap<PairKey, Chord>,
}

impl RadicalLineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect one chord per intersecting pair from `cache`.
    pub fn rebuild(cache: &IntersectionCache) -> Self {
        let lines = cache
            .pairs()
            .map(|(a, b, chord)| (PairKey::new(a, b), *chord))
            .collect();
        Self { lines }
    }

    pub fn get(&self, key: &PairKey) -> Option<&Chord> {
        self.lines.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &Chord)> {
        self.lines.iter()
    }

    /// Chord endpoints as plain segments.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.lines.values().map(|c| (c.point1, c.point2))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
