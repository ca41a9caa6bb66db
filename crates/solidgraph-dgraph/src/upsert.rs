//! Upsert transaction accumulation.
//!
//! An upsert is one query section (named variable-binding blocks) plus
//! ordered delete and set N-Quad statements. The builder is a pure
//! accumulator: it performs no validation, so a statement referencing a
//! query variable must be appended after the block declaring it.
//!
//! Escaping and variable naming live here so every statement produced by
//! the translation layer goes through one set of rules.

/// Accumulates one upsert transaction for the transport layer.
#[derive(Debug, Default, Clone)]
pub struct UpsertBuilder {
    queries: Vec<String>,
    delete: Vec<String>,
    set: Vec<String>,
}

impl UpsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one named variable-binding query block.
    pub fn append_query(&mut self, block: impl Into<String>) {
        self.queries.push(block.into());
    }

    /// Append one delete N-Quad statement.
    pub fn append_delete(&mut self, statement: impl Into<String>) {
        self.delete.push(statement.into());
    }

    /// Append one set N-Quad statement.
    pub fn append_set(&mut self, statement: impl Into<String>) {
        self.set.push(statement.into());
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn delete_statements(&self) -> &[String] {
        &self.delete
    }

    pub fn set_statements(&self) -> &[String] {
        &self.set
    }

    /// The assembled `query { … }` envelope around the accumulated
    /// blocks.
    pub fn query_block(&self) -> String {
        let mut block = String::from("query {\n");
        for query in &self.queries {
            block.push_str("  ");
            block.push_str(query);
            block.push('\n');
        }
        block.push('}');
        block
    }

    pub fn delete_nquads(&self) -> String {
        self.delete.join("\n")
    }

    pub fn set_nquads(&self) -> String {
        self.set.join("\n")
    }
}

/// Escape a literal's lexical value for embedding in a quoted N-Quad
/// object position. Dgraph only chokes on the closing quote itself.
pub fn escape_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Allocates `prefix0`, `prefix1`, … query-variable names, one counter
/// per prefix.
#[derive(Debug, Default)]
pub struct VarNamer {
    counters: std::collections::HashMap<&'static str, usize>,
}

impl VarNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &'static str) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        let name = format!("{prefix}{counter}");
        *counter += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_append_order() {
        let mut builder = UpsertBuilder::new();
        builder.append_query("a as var(func: eq(<uri>, \"x\"))");
        builder.append_query("b as var(func: eq(<uri>, \"y\"))");
        builder.append_delete("uid(a) * * .");
        builder.append_set("uid(a) <uri> \"x\" .");
        builder.append_set("uid(b) <uri> \"y\" .");

        assert_eq!(builder.queries().len(), 2);
        assert_eq!(builder.delete_statements(), ["uid(a) * * ."]);
        assert_eq!(
            builder.set_statements(),
            ["uid(a) <uri> \"x\" .", "uid(b) <uri> \"y\" ."]
        );
    }

    #[test]
    fn query_block_wraps_all_blocks() {
        let mut builder = UpsertBuilder::new();
        builder.append_query("entity as var(func: eq(<uri>, \"x\")) @filter(type(Entity))");
        let block = builder.query_block();
        assert!(block.starts_with("query {"));
        assert!(block.ends_with('}'));
        assert!(block.contains("entity as var"));
    }

    #[test]
    fn escapes_embedded_quotes() {
        assert_eq!(escape_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_value("plain"), "plain");
    }

    #[test]
    fn var_namer_counts_per_prefix() {
        let mut namer = VarNamer::new();
        assert_eq!(namer.next("value"), "value0");
        assert_eq!(namer.next("value"), "value1");
        assert_eq!(namer.next("metadataobject"), "metadataobject0");
        assert_eq!(namer.next("value"), "value2");
    }
}
