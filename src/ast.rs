// Abstract Syntax Tree definitions

/// A program split into its non-blank logical lines, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub lines: Vec<Line>,
}

/// One logical line: trimmed text plus its 1-based position in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    DeclareBot {
        name: String,
        platform: String,
    },
    BindTrigger {
        bot_reference: String,
        trigger: String,
        response: String,
    },
    Print {
        message: String,
    },
    Unrecognized {
        raw_text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    pub platform: String,
    pub status: BotStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStatus {
    Active,
}
