use std::cmp::Ordering;

/// Position of a residue within a chain: sequence number plus insertion code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResiduePosition {
    pub number: isize,
    pub insertion_code: Option<char>,
}

impl ResiduePosition {
    pub fn new(number: isize, insertion_code: Option<char>) -> Self {
        Self {
            number,
            insertion_code,
        }
    }
}

impl PartialOrd for ResiduePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResiduePosition {
    // A plain residue number sorts before its insertion-coded variants.
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.insertion_code.cmp(&other.insertion_code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Helix,
    Strand,
}

/// A contiguous residue range declared by a `HELIX` or `SHEET` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSegment {
    pub kind: SegmentKind,
    pub chain_id: char,
    pub start: ResiduePosition,
    pub end: ResiduePosition,
}

impl AnnotatedSegment {
    /// Returns `true` if the residue at `position` of `chain_id` lies within
    /// the segment, both ends included.
    pub fn contains(&self, chain_id: char, position: ResiduePosition) -> bool {
        chain_id == self.chain_id && self.start <= position && position <= self.end
    }
}

/// Secondary-structure records carried by an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryStructureAnnotation {
    segments: Vec<AnnotatedSegment>,
}

impl SecondaryStructureAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: AnnotatedSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[AnnotatedSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn helix_count(&self) -> usize {
        self.count(SegmentKind::Helix)
    }

    pub fn strand_count(&self) -> usize {
        self.count(SegmentKind::Strand)
    }

    fn count(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }

    /// Returns the kind of the first segment covering the residue, if any.
    ///
    /// Helix segments win over strand segments when both cover a residue.
    pub fn kind_of(&self, chain_id: char, position: ResiduePosition) -> Option<SegmentKind> {
        let mut found = None;
        for segment in &self.segments {
            if segment.contains(chain_id, position) {
                if segment.kind == SegmentKind::Helix {
                    return Some(SegmentKind::Helix);
                }
                found = Some(segment.kind);
            }
        }
        found
    }
}
