//! Parser for Cypher schema scripts.
//!
//! Scripts are written for the Neo4j Browser, so they mix `:param` style
//! directives, sample queries and schema statements. Only constraint and
//! index statements are picked up for bootstrap.

/// Lines starting with this marker are Browser directives.
pub const DIRECTIVE_MARKER: char = ':';

/// Statement terminator.
pub const TERMINATOR: char = ';';

/// Keywords that identify a schema statement (matched case-insensitively).
pub const SCHEMA_KEYWORDS: &[&str] = &["CREATE CONSTRAINT", "DROP CONSTRAINT", "CREATE INDEX"];

/// Split a script into statements.
///
/// Directive lines are dropped. Other lines accumulate until a line
/// containing the terminator closes the statement. A trailing block that is
/// never terminated is discarded, as are blank statements.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in script.lines() {
        if line.trim_start().starts_with(DIRECTIVE_MARKER) {
            continue;
        }
        buffer.push(line);
        if line.contains(TERMINATOR) {
            let statement = buffer.join("\n");
            if !statement.trim().is_empty() {
                statements.push(statement);
            }
            buffer.clear();
        }
    }

    statements
}

/// Whether a statement declares or drops a constraint, or creates an index.
pub fn is_schema_statement(statement: &str) -> bool {
    let upper = statement.to_uppercase();
    SCHEMA_KEYWORDS.iter().any(|k| upper.contains(k))
}

/// Schema statements of a script, trimmed and without their terminator,
/// ready to be sent one by one.
pub fn schema_statements(script: &str) -> Vec<String> {
    split_statements(script)
        .into_iter()
        .filter(|s| is_schema_statement(s))
        .map(|s| strip_terminator(&s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn strip_terminator(statement: &str) -> String {
    let body = match statement.rfind(TERMINATOR) {
        Some(idx) => &statement[..idx],
        None => statement,
    };
    body.trim().to_string()
}
