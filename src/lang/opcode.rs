/// ## Instruction set
///
/// Every mnemonic the tokenizer recognizes. The machine has an operand
/// stack, a register stack and a call stack; nothing else.
///
/// Operand order in the comments is oldest to newest, left to right.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Stack population
    /// Parse each parameter as a literal and push them in order.
    Push,
    /// Pop a prompt, read a line and push it parsed as a literal.
    Input,
    /// Push one character of input.
    Getc,
    /// Push one line of input without its terminator.
    Getl,
    /// Push one whitespace-delimited word of input.
    Getw,

    // *** Stack manipulation
    /// a b c -> b c a
    Rot,
    Dup,
    Pop,
    Swap,
    /// a b -> a b a
    Over,
    /// Move the top of the operand stack to the register stack.
    Yeet,
    /// Move the top of the register stack to the operand stack.
    Yoink,
    Size,
    Rsize,

    // *** Control flow
    Goto,
    /// Jump if top > 0.
    Jp,
    /// Jump if top <= 0.
    Jnp,
    /// Jump if top < 0.
    Jn,
    /// Jump if top >= 0.
    Jnn,
    /// Jump if top == 0.
    Jz,
    /// Pop top and jump if it is NULL.
    Jnl,
    Gosub,
    Return,

    // *** Arithmetic
    Inc,
    Dec,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// a b -> a/b a%b
    Divmod,

    // *** Conversion
    Makei,
    Makef,
    Makes,
    Ord,
    Chr,

    // *** Comparison
    Eq,
    Less,
    More,
    Lesseq,
    Moreeq,

    // *** Misc
    Debug,
    Exit,
    Print,
}

impl Opcode {
    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        use Opcode::*;
        Some(match s {
            "PUSH" => Push,
            "INPUT" => Input,
            "GETC" => Getc,
            "GETL" => Getl,
            "GETW" => Getw,
            "ROT" => Rot,
            "DUP" => Dup,
            "POP" => Pop,
            "SWAP" => Swap,
            "OVER" => Over,
            "YEET" => Yeet,
            "YOINK" => Yoink,
            "SIZE" => Size,
            "RSIZE" => Rsize,
            "GOTO" => Goto,
            "JP" => Jp,
            "JNP" => Jnp,
            "JN" => Jn,
            "JNN" => Jnn,
            "JZ" => Jz,
            "JNL" => Jnl,
            "GOSUB" => Gosub,
            "RETURN" => Return,
            "INC" => Inc,
            "DEC" => Dec,
            "ADD" => Add,
            "SUB" => Sub,
            "MUL" => Mul,
            "DIV" => Div,
            "MOD" => Mod,
            "DIVMOD" => Divmod,
            "MAKEI" => Makei,
            "MAKEF" => Makef,
            "MAKES" => Makes,
            "ORD" => Ord,
            "CHR" => Chr,
            "EQ" => Eq,
            "LESS" => Less,
            "MORE" => More,
            "LESSEQ" => Lesseq,
            "MOREEQ" => Moreeq,
            "DEBUG" => Debug,
            "EXIT" => Exit,
            "PRINT" => Print,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Push => write!(f, "PUSH"),
            Input => write!(f, "INPUT"),
            Getc => write!(f, "GETC"),
            Getl => write!(f, "GETL"),
            Getw => write!(f, "GETW"),
            Rot => write!(f, "ROT"),
            Dup => write!(f, "DUP"),
            Pop => write!(f, "POP"),
            Swap => write!(f, "SWAP"),
            Over => write!(f, "OVER"),
            Yeet => write!(f, "YEET"),
            Yoink => write!(f, "YOINK"),
            Size => write!(f, "SIZE"),
            Rsize => write!(f, "RSIZE"),
            Goto => write!(f, "GOTO"),
            Jp => write!(f, "JP"),
            Jnp => write!(f, "JNP"),
            Jn => write!(f, "JN"),
            Jnn => write!(f, "JNN"),
            Jz => write!(f, "JZ"),
            Jnl => write!(f, "JNL"),
            Gosub => write!(f, "GOSUB"),
            Return => write!(f, "RETURN"),
            Inc => write!(f, "INC"),
            Dec => write!(f, "DEC"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            Mod => write!(f, "MOD"),
            Divmod => write!(f, "DIVMOD"),
            Makei => write!(f, "MAKEI"),
            Makef => write!(f, "MAKEF"),
            Makes => write!(f, "MAKES"),
            Ord => write!(f, "ORD"),
            Chr => write!(f, "CHR"),
            Eq => write!(f, "EQ"),
            Less => write!(f, "LESS"),
            More => write!(f, "MORE"),
            Lesseq => write!(f, "LESSEQ"),
            Moreeq => write!(f, "MOREEQ"),
            Debug => write!(f, "DEBUG"),
            Exit => write!(f, "EXIT"),
            Print => write!(f, "PRINT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mnemonic() {
        assert_eq!(Opcode::from_mnemonic("DIVMOD"), Some(Opcode::Divmod));
        assert_eq!(Opcode::from_mnemonic("YOINK"), Some(Opcode::Yoink));
        assert_eq!(Opcode::from_mnemonic("PICKLES"), None);
        assert_eq!(Opcode::from_mnemonic("push"), None);
    }

    #[test]
    fn test_display_is_mnemonic() {
        for name in &["PUSH", "JNL", "MOREEQ", "GETW", "RSIZE"] {
            assert_eq!(Opcode::from_mnemonic(name).unwrap().to_string(), *name);
        }
    }
}
