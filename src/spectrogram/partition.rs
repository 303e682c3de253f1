use std::fmt;

/// Direction of an internal partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// Top/bottom halving of the bin range at the same resolution.
    Vertical,
    /// Left/right halving of the time range, one resolution finer in time.
    Horizontal,
}

/// Binary partition of a rectangular time-frequency region.
///
/// A `Leaf` is one cell of one resolution grid. A `Split` carries the cheaper
/// of the two candidate partitions evaluated for its region: for `Vertical`
/// the children are (top, bottom), for `Horizontal` they are (left, right).
#[derive(Debug, Clone, PartialEq)]
pub enum Cutting {
    Leaf {
        cost: f64,
        value: f64,
    },
    Split {
        kind: CutKind,
        cost: f64,
        value: f64,
        /// Normalised cost of the candidate that lost; `None` when the split was forced.
        rejected_cost: Option<f64>,
        first: Box<Cutting>,
        second: Box<Cutting>,
    },
}

impl Cutting {
    pub fn cost(&self) -> f64 {
        match self {
            Cutting::Leaf { cost, .. } | Cutting::Split { cost, .. } => *cost,
        }
    }

    /// Summed magnitude of every cell the node covers.
    pub fn value(&self) -> f64 {
        match self {
            Cutting::Leaf { value, .. } | Cutting::Split { value, .. } => *value,
        }
    }

    pub fn kind(&self) -> Option<CutKind> {
        match self {
            Cutting::Leaf { .. } => None,
            Cutting::Split { kind, .. } => Some(*kind),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Cutting::Leaf { .. })
    }

    pub fn children(&self) -> Option<(&Cutting, &Cutting)> {
        match self {
            Cutting::Leaf { .. } => None,
            Cutting::Split { first, second, .. } => Some((first, second)),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((first, second)) => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 0,
            Some((first, second)) => 1 + first.depth().max(second.depth()),
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            Cutting::Leaf { value, .. } => writeln!(f, "{}* {}", pad, value),
            Cutting::Split { kind, first, second, .. } => {
                let tag = match kind {
                    CutKind::Vertical => "V",
                    CutKind::Horizontal => "H",
                };
                writeln!(f, "{}{}", pad, tag)?;
                first.render(f, indent + 1)?;
                second.render(f, indent + 1)
            }
        }
    }
}

/// Indented outline: `V`/`H` for splits, `* value` for leaves.
impl fmt::Display for Cutting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: f64) -> Cutting {
        Cutting::Leaf { cost: 0.0, value }
    }

    #[test]
    fn test_tree_queries() {
        let tree = Cutting::Split {
            kind: CutKind::Vertical,
            cost: 0.5,
            value: 3.0,
            rejected_cost: Some(0.7),
            first: Box::new(leaf(1.0)),
            second: Box::new(Cutting::Split {
                kind: CutKind::Horizontal,
                cost: 0.2,
                value: 2.0,
                rejected_cost: None,
                first: Box::new(leaf(1.5)),
                second: Box::new(leaf(0.5)),
            }),
        };
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.kind(), Some(CutKind::Vertical));
        assert_eq!(tree.value(), 3.0);
        assert!(!tree.is_leaf());
        assert!(leaf(1.0).children().is_none());
        assert_eq!(tree.to_string(), "V\n  * 1\n  H\n    * 1.5\n    * 0.5\n");
    }
}
