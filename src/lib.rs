//! ThetaCode: a line-oriented language for declaring chatbots, their
//! triggers and their responses.
//!
//! A run splits the source into logical lines, classifies each line by its
//! leading keyword, and folds the statements into a bot registry plus a
//! trace of human-readable messages.
//!
//! ```
//! use thetacode::interpreter::Interpreter;
//!
//! let outcome = Interpreter::new().run(r#"create bot "Helper" platform "telegram""#);
//! assert_eq!(outcome.render(), "Created telegram bot: Helper");
//! ```

pub mod ast;
pub mod buffer;
pub mod error;
pub mod interpreter;
pub mod outcome;
pub mod output;
pub mod parser;
pub mod workspace;
