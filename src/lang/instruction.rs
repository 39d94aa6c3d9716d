use super::{LineNumber, Opcode};

/// One significant source line. Immutable once tokenized.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    line_number: LineNumber,
    mnemonic: String,
    opcode: Option<Opcode>,
    params: Vec<String>,
}

impl Instruction {
    pub fn new(line_number: LineNumber, mnemonic: &str, params: Vec<String>) -> Instruction {
        Instruction {
            line_number,
            mnemonic: mnemonic.to_string(),
            opcode: Opcode::from_mnemonic(mnemonic),
            params,
        }
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// `None` when the mnemonic is not in the instruction set.
    pub fn opcode(&self) -> Option<Opcode> {
        self.opcode
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(|s| s.as_str())
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.line_number, self.mnemonic)?;
        if !self.params.is_empty() {
            write!(f, " {}", self.params.join(", "))?;
        }
        Ok(())
    }
}
