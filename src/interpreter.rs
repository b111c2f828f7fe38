// Interpreter to execute the AST

use crate::ast::{Bot, BotStatus, Line, Program, Statement};
use crate::error::ThetaError;
use crate::outcome::Outcome;
use crate::parser;
use std::collections::HashMap;
use tracing::debug;

/// Bots declared during one run, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    bots: HashMap<String, Bot>,
}

impl Registry {
    /// Declare a bot, replacing any earlier bot with the same name.
    pub fn declare(&mut self, name: String, platform: String) -> Option<Bot> {
        self.bots.insert(
            name,
            Bot {
                platform,
                status: BotStatus::Active,
            },
        )
    }

    pub fn get(&self, name: &str) -> Option<&Bot> {
        self.bots.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

/// The accumulator folded over a program's lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub registry: Registry,
    pub trace: Vec<String>,
}

/// A run that stopped early, with the trace produced before the failing line.
#[derive(Debug, Clone, PartialEq)]
pub struct Halt {
    pub error: ThetaError,
    pub trace: Vec<String>,
}

pub struct Interpreter {
    strict: bool,
}

impl Interpreter {
    /// Lenient interpreter: unrecognized lines and unknown bot references are tolerated.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Interpreter that rejects unrecognized lines (other than `//` comments)
    /// and trigger bindings for bots not declared earlier in the run.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Split, execute and report `source` in one go.
    pub fn run(&self, source: &str) -> Outcome {
        let program = parser::split_program(source);
        Outcome::from(self.execute(&program))
    }

    /// Execute every line in order against a fresh [`State`].
    pub fn execute(&self, program: &Program) -> Result<State, Halt> {
        program
            .lines
            .iter()
            .try_fold(State::default(), |state, line| self.step(state, line))
    }

    fn step(&self, mut state: State, line: &Line) -> Result<State, Halt> {
        match self.apply(&mut state, line) {
            Ok(()) => Ok(state),
            Err(error) => Err(Halt {
                error,
                trace: state.trace,
            }),
        }
    }

    fn apply(&self, state: &mut State, line: &Line) -> Result<(), ThetaError> {
        match parser::parse_statement(line)? {
            Statement::DeclareBot { name, platform } => {
                debug!(line = line.number, bot = %name, platform = %platform, "declaring bot");
                state.trace.push(format!("Created {} bot: {}", platform, name));
                if state.registry.declare(name, platform).is_some() {
                    debug!(line = line.number, "replaced earlier declaration");
                }
            }
            Statement::BindTrigger {
                bot_reference,
                trigger,
                response,
            } => {
                if self.strict && !state.registry.contains(&bot_reference) {
                    return Err(ThetaError::DanglingReference {
                        line: line.number,
                        bot: bot_reference,
                    });
                }
                debug!(line = line.number, bot = %bot_reference, trigger = %trigger, response = %response, "binding trigger");
                state
                    .trace
                    .push(format!("{} will respond to \"{}\"", bot_reference, trigger));
            }
            Statement::Print { message } => {
                debug!(line = line.number, "print");
                state.trace.push(message);
            }
            Statement::Unrecognized { raw_text } => {
                if self.strict && !parser::is_comment(line) {
                    return Err(ThetaError::UnrecognizedStatement {
                        line: line.number,
                        text: raw_text,
                    });
                }
                debug!(line = line.number, text = %raw_text, "skipping unrecognized statement");
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
