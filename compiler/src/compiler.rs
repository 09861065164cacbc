use std::path::Path;

use log::debug;

use crate::{
    error::{GrammarError, UmsgError},
    gen_cpp::compile_message_to_cpp,
    gen_rust::compile_message_to_rust,
    parser::parse_message,
    types::Message,
};

/// Output language of the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// A Rust module using `umsg_marshal`.
    #[default]
    Rust,
    /// A C++11 header using `marshalling.hpp`.
    Cpp,
}

impl Target {
    /// File extension of generated files, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Rust => "rs",
            Target::Cpp  => "hpp",
        }
    }
}

/// Settings for one generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenOptions {
    pub target:      Target,
    /// Base name of the schema file, shown in the generated banner.
    pub source_name: Option<String>,
}

impl GenOptions {
    pub fn new(target: Target) -> Self {
        GenOptions { target, source_name: None }
    }

    /// Record the schema path for the banner. Only the file name is kept so
    /// output does not depend on where the compiler was invoked from.
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self
    }
}

/// Render `message` for `options.target`. Pure: the same message and options
/// always produce identical text. Fails when the message has no valid
/// spelling in the target language.
pub fn generate(message: &Message, options: &GenOptions) -> Result<String, GrammarError> {
    let source_name = options.source_name.as_deref();
    match options.target {
        Target::Rust => compile_message_to_rust(message, source_name),
        Target::Cpp  => Ok(compile_message_to_cpp(message, source_name)),
    }
}

/// Parse `text` and render it in one step.
pub fn compile(text: &str, options: &GenOptions) -> Result<(Message, String), UmsgError> {
    let message = parse_message(text)?;
    debug!(
        "generating {:?} output for {}",
        options.target, message.struct_name
    );
    let code = generate(&message, options)?;
    Ok((message, code))
}

/// Read a schema file, parse it and render it. Grammar errors carry the path.
pub fn compile_file(path: &Path, options: &GenOptions) -> Result<(Message, String), UmsgError> {
    debug!("loading {}", path.display());
    let text = std::fs::read_to_string(path)?;
    compile(&text, options).map_err(|e| e.with_path(path.display().to_string()))
}
