use super::{Instruction, LineNumber};
use std::collections::BTreeMap;
use std::rc::Rc;

/// ## Tokenized program
///
/// Instructions in strictly ascending line number order. A later
/// instruction with the same line number replaces the earlier one.

#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Rc<Instruction>>,
}

impl Program {
    pub fn new<T: IntoIterator<Item = Instruction>>(instructions: T) -> Program {
        let mut lines: BTreeMap<LineNumber, Instruction> = BTreeMap::new();
        for instruction in instructions {
            lines.insert(instruction.line_number(), instruction);
        }
        Program {
            instructions: lines.into_iter().map(|(_, i)| Rc::new(i)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Rc<Instruction>> {
        self.instructions.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().map(|i| i.as_ref())
    }

    pub fn line_numbers(&self) -> impl Iterator<Item = LineNumber> + '_ {
        self.instructions.iter().map(|i| i.line_number())
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for instruction in self.iter() {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_last_write_wins() {
        let p = Program::new(vec![
            Instruction::new(30, "PRINT", vec![]),
            Instruction::new(10, "PUSH", vec!["1".into()]),
            Instruction::new(30, "EXIT", vec![]),
        ]);
        assert_eq!(p.line_numbers().collect::<Vec<_>>(), vec![10, 30]);
        assert_eq!(p.to_string(), "10 PUSH 1\n30 EXIT\n");
    }
}
