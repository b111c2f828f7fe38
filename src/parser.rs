// Parser implementation using pest

use crate::ast::{Line, Program, Statement};
use crate::error::ThetaError;
use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct StatementParser;

/// One statement form: the prefix that selects it, the rule that must then
/// match the whole line, and the constructor for the matched fields.
struct Form {
    prefix: &'static str,
    usage: &'static str,
    rule: Rule,
    build: fn(Pair<Rule>) -> Option<Statement>,
}

// First match wins.
static FORMS: [Form; 3] = [
    Form {
        prefix: "create bot",
        usage: r#"create bot "<name>" platform "<platform>""#,
        rule: Rule::create_bot,
        build: declare_bot,
    },
    Form {
        prefix: "on",
        usage: r#"on <bot> receives "<trigger>" respond with "<response>""#,
        rule: Rule::bind_trigger,
        build: bind_trigger,
    },
    Form {
        prefix: "print",
        usage: r#"print "<message>""#,
        rule: Rule::print_message,
        build: print_message,
    },
];

/// Split source text into its non-blank logical lines.
pub fn split_program(source: &str) -> Program {
    let lines = source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = raw.trim();
            (!text.is_empty()).then(|| Line {
                number: index + 1,
                text: text.to_string(),
            })
        })
        .collect();

    Program { lines }
}

/// Classify one logical line and extract its fields.
///
/// Lines that start with a known prefix must match that form completely;
/// anything else is [`Statement::Unrecognized`].
pub fn parse_statement(line: &Line) -> Result<Statement, ThetaError> {
    let Some(form) = FORMS.iter().find(|form| line.text.starts_with(form.prefix)) else {
        return Ok(Statement::Unrecognized {
            raw_text: line.text.clone(),
        });
    };

    let mut pairs = StatementParser::parse(form.rule, &line.text).map_err(|err| {
        let column = match err.line_col {
            LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
        };
        ThetaError::MalformedStatement {
            line: line.number,
            cause: format!("expected {} (failed at column {})", form.usage, column),
        }
    })?;

    pairs
        .next()
        .and_then(form.build)
        .ok_or_else(|| ThetaError::MalformedStatement {
            line: line.number,
            cause: format!("expected {}", form.usage),
        })
}

pub fn is_comment(line: &Line) -> bool {
    line.text.starts_with("//")
}

fn declare_bot(pair: Pair<Rule>) -> Option<Statement> {
    let mut inner = pair.into_inner();
    let name = inner.next()?.as_str().to_string();
    let platform = inner.next()?.as_str().to_string();
    Some(Statement::DeclareBot { name, platform })
}

fn bind_trigger(pair: Pair<Rule>) -> Option<Statement> {
    let mut inner = pair.into_inner();
    let bot_reference = inner.next()?.as_str().to_string();
    let trigger = inner.next()?.as_str().to_string();
    let response = inner.next()?.as_str().to_string();
    Some(Statement::BindTrigger {
        bot_reference,
        trigger,
        response,
    })
}

fn print_message(pair: Pair<Rule>) -> Option<Statement> {
    let message = pair.into_inner().next()?.as_str().to_string();
    Some(Statement::Print { message })
}
