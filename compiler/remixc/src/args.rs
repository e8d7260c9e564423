//! Engine arguments shared by `scan` and `explain`.

use std::sync::Arc;

use remix::{Options, Pattern, Registry, Remix, RemixError, Spec, TemplateError};

/// Engine configuration collected from the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineArgs {
    /// `--delimiter=D` or `--delimiter D`.
    pub delimiter: Option<String>,
    /// `--search`: accept the earliest match instead of only sticky ones.
    pub search: bool,
    /// `name=PATTERN` pairs, in command line order.
    pub definitions: Vec<(String, String)>,
    /// Arguments that are neither flags nor definitions.
    pub positional: Vec<String>,
}

impl EngineArgs {
    /// Parse everything after the subcommand.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = EngineArgs::default();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            if let Some(delimiter) = arg.strip_prefix("--delimiter=") {
                parsed.delimiter = Some(delimiter.to_owned());
            } else if arg == "--delimiter" {
                let Some(delimiter) = args.get(i + 1) else {
                    return Err("--delimiter needs a value".to_owned());
                };
                parsed.delimiter = Some(delimiter.clone());
                i += 1;
            } else if arg == "--search" {
                parsed.search = true;
            } else if arg.starts_with("--") {
                return Err(format!("unknown option '{arg}'"));
            } else if let Some((name, pattern)) = arg.split_once('=') {
                parsed
                    .definitions
                    .push((name.to_owned(), pattern.to_owned()));
            } else {
                parsed.positional.push(arg.clone());
            }
            i += 1;
        }
        Ok(parsed)
    }

    /// Build an engine named `name` from the definitions.
    ///
    /// A pattern written as `/source/flags` is a literal leaf; anything else
    /// is a template resolved against the builtin registry.
    pub fn build_engine(&self, name: &str) -> Result<Remix, RemixError> {
        let mut options = Options::default().with_sticky(!self.search);
        if let Some(delimiter) = &self.delimiter {
            options = options.with_namespace_delimiter(delimiter.clone());
        }

        let mut engine = Remix::named(name, Arc::new(Registry::with_builtins()));
        engine.set_options(options);
        for (key, pattern) in &self.definitions {
            let spec = if pattern.starts_with('/') {
                Spec::Leaf(Pattern::from_literal(pattern).map_err(TemplateError::from)?)
            } else {
                Spec::template(pattern.as_str())
            };
            engine.add(Spec::named(key.as_str(), spec));
        }
        Ok(engine)
    }
}
