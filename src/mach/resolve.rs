use crate::lang::{LineNumber, Program};
use std::collections::HashMap;

/// ## Jump target resolution
///
/// Real line numbers resolve through an exact map. Anything else lands
/// on the first instruction with a greater line number, so a jump into
/// a gap continues at the next line that exists.

#[derive(Debug, Default)]
pub struct LineIndex {
    positions: HashMap<LineNumber, usize>,
    lines: Vec<LineNumber>,
}

impl LineIndex {
    pub fn new(program: &Program) -> LineIndex {
        let lines: Vec<LineNumber> = program.line_numbers().collect();
        let positions = lines
            .iter()
            .enumerate()
            .map(|(position, line)| (*line, position))
            .collect();
        LineIndex { positions, lines }
    }

    /// Position of `target`, or of the first later line. `None` means
    /// the target is past the end of the program.
    pub fn resolve(&self, target: i64) -> Option<usize> {
        if target >= 0 && target <= LineNumber::max_value() as i64 {
            if let Some(position) = self.positions.get(&(target as LineNumber)) {
                return Some(*position);
            }
        }
        let position = self
            .lines
            .partition_point(|line| i64::from(*line) <= target);
        if position < self.lines.len() {
            Some(position)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::tokenize;

    fn index() -> LineIndex {
        LineIndex::new(&tokenize("10 PUSH 1\n30 PRINT\n50 EXIT\n"))
    }

    #[test]
    fn test_exact() {
        let i = index();
        assert_eq!(i.resolve(10), Some(0));
        assert_eq!(i.resolve(30), Some(1));
        assert_eq!(i.resolve(50), Some(2));
    }

    #[test]
    fn test_nearest_following() {
        let i = index();
        assert_eq!(i.resolve(20), Some(1));
        assert_eq!(i.resolve(49), Some(2));
        assert_eq!(i.resolve(0), Some(0));
        assert_eq!(i.resolve(-5), Some(0));
    }

    #[test]
    fn test_past_the_end() {
        let i = index();
        assert_eq!(i.resolve(60), None);
        assert_eq!(LineIndex::new(&tokenize("")).resolve(1), None);
    }
}
