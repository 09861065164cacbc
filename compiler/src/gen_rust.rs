use crate::{
    error::GrammarError,
    types::{Field, Message},
    utils::{generated_banner, quote},
};

const MARSHAL: &str = "::umsg_marshal";
const RESULT: &str = "::core::result::Result";

/// Converts a string to PascalCase.
/// - If the string contains underscores, it splits on underscores and converts each word
///   so that its first letter is uppercase and the rest lowercase.
/// - If the string does not contain underscores and is fully uppercase, it converts it
///   so that only the first letter is uppercase and the rest are lowercase.
/// - Otherwise, it ensures only the first letter is uppercase.
pub fn to_pascal_case(s: &str) -> String {
    fn capitalize(word: &str, lower_rest: bool) -> String {
        let mut chars = word.chars();
        match chars.next() {
            None => String::new(),
            Some(first) if lower_rest => first.to_uppercase().to_string() + &chars.as_str().to_lowercase(),
            Some(first) => first.to_uppercase().to_string() + chars.as_str(),
        }
    }

    if s.contains('_') {
        s.split('_')
         .filter(|word| !word.is_empty())
         .map(|word| capitalize(word, true))
         .collect::<String>()
    } else {
        capitalize(s, s == s.to_uppercase())
    }
}

/// Converts a string to snake_case.
/// Acronyms stay together, so "sessionID" becomes "session_id".
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut snake = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                // Insert an underscore if the previous character is not uppercase,
                // or if the next character exists and is lowercase.
                let boundary = !prev.is_uppercase() || (i + 1 < chars.len() && chars[i + 1].is_lowercase());
                if boundary && prev != '_' {
                    snake.push('_');
                }
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// Escapes Rust reserved keywords, and the bare `_` pattern, by suffixing
/// with an underscore.
pub fn escape_rust_keyword(s: &str) -> String {
    const KEYWORDS: [&str; 52] = [
        "_",
        "abstract", "as", "async", "await", "become", "box", "break", "const",
        "continue", "crate", "do", "dyn", "else", "enum", "extern", "false",
        "final", "fn", "for", "if", "impl", "in", "let", "loop", "macro",
        "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
        "return", "self", "Self", "static", "struct", "super", "trait", "true",
        "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where",
        "while", "yield",
    ];
    if KEYWORDS.contains(&s) {
        format!("{}_", s)
    } else {
        s.to_string()
    }
}

fn rust_field_name(field: &Field) -> String {
    escape_rust_keyword(&to_snake_case(&field.name))
}

fn rust_field_type(field: &Field) -> String {
    let scalar = field.type_name.rust_name();
    match field.array_len {
        Some(len) => format!("[{}; {}]", scalar, len),
        None => scalar.to_string(),
    }
}

fn rust_zero_value(field: &Field) -> String {
    let zero = field.type_name.rust_zero();
    match field.array_len {
        Some(len) => format!("[{}; {}]", zero, len),
        None => zero.to_string(),
    }
}

/// `size_of::<T>()` terms summed over all fields, so the constant tracks the
/// platform's primitive sizes rather than a precomputed literal.
fn payload_size_expr(message: &Message) -> String {
    let parts: Vec<String> = message
        .fields
        .iter()
        .map(|field| {
            let size = format!("::core::mem::size_of::<{}>()", field.type_name.rust_name());
            match field.array_len {
                Some(len) => format!("({} * {})", size, len),
                None => size,
            }
        })
        .collect();

    if parts.is_empty() {
        "0".to_string()
    } else {
        parts.join(" + ")
    }
}

/// Renders one message as a Rust module body.
///
/// The output has no inner attributes, inner doc comments or `use` items, so
/// it can be pulled into another crate with `include!` whatever the struct is
/// called. Every runtime and `core` item is spelled by its absolute path.
pub fn compile_message_to_rust(message: &Message, source_name: Option<&str>) -> Result<String, GrammarError> {
    let struct_name = rust_struct_name(message)?;
    let field_names = rust_field_names(message)?;

    let mut rust_code: Vec<String> = generated_banner(source_name);
    rust_code.push("".to_string());

    rust_code.push(generate_struct(message, &struct_name, &field_names));
    rust_code.push(generate_impl(message, &struct_name, &field_names));
    rust_code.push(generate_default(message, &struct_name, &field_names));
    rust_code.push(generate_payload_impl(&struct_name));

    Ok(rust_code.join("\n"))
}

fn rust_struct_name(message: &Message) -> Result<String, GrammarError> {
    let name = escape_rust_keyword(&to_pascal_case(&message.struct_name));
    if name.is_empty() {
        return Err(GrammarError::InvalidRustName(quote(&message.struct_name)));
    }
    Ok(name)
}

/// Rust names for every field, in declaration order. Distinct schema names
/// can converge once snake_cased (`ledState` and `led_state`).
fn rust_field_names(message: &Message) -> Result<Vec<String>, GrammarError> {
    let mut names: Vec<String> = Vec::with_capacity(message.fields.len());
    for (i, field) in message.fields.iter().enumerate() {
        let name = rust_field_name(field);
        if let Some(j) = names.iter().position(|seen| *seen == name) {
            return Err(GrammarError::RustNameCollision {
                first:     quote(&message.fields[j].name),
                second:    quote(&message.fields[i].name),
                rust_name: quote(&name),
            });
        }
        names.push(name);
    }
    Ok(names)
}

fn generate_struct(message: &Message, struct_name: &str, names: &[String]) -> String {
    let mut lines = Vec::new();
    lines.push("#[derive(Debug, Clone, Copy, PartialEq)]".to_string());
    lines.push(format!("pub struct {} {{", struct_name));
    for (field, name) in message.fields.iter().zip(names) {
        lines.push(format!("    pub {}: {},", name, rust_field_type(field)));
    }
    lines.push("}".to_string());
    lines.push("".to_string());
    lines.join("\n")
}

fn generate_impl(message: &Message, struct_name: &str, names: &[String]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("impl {} {{", struct_name));
    lines.push(format!("    pub const MSG_HASH: u32 = 0x{:08X};", message.msg_hash));
    lines.push(format!("    pub const PAYLOAD_SIZE: usize = {};", payload_size_expr(message)));
    lines.push("".to_string());

    // encode: capacity in, bytes written out.
    lines.push(format!(
        "    pub fn encode(&self, payload: &mut {}::BufferSpan<'_>) -> {}<(), {}::MarshalError> {{",
        MARSHAL, RESULT, MARSHAL
    ));
    lines.push("        let capacity = payload.len();".to_string());
    lines.push(format!("        let mut w = {}::Writer::new(payload.as_mut_slice());", MARSHAL));
    for (field, name) in message.fields.iter().zip(names) {
        match field.array_len {
            Some(_) => lines.push(format!("        w.write_array(&self.{})?;", name)),
            None => lines.push(format!("        w.write(self.{})?;", name)),
        }
    }
    lines.push("        let written = w.bytes_written();".to_string());
    lines.push("        if written > capacity {".to_string());
    lines.push(format!(
        "            return {}::Err({}::MarshalError::Overflow {{ needed: written, capacity }});",
        RESULT, MARSHAL
    ));
    lines.push("        }".to_string());
    lines.push("        payload.set_len(written);".to_string());
    lines.push(format!("        {}::Ok(())", RESULT));
    lines.push("    }".to_string());
    lines.push("".to_string());

    lines.push(format!(
        "    pub fn decode(&mut self, payload: &[u8]) -> {}<(), {}::MarshalError> {{",
        RESULT, MARSHAL
    ));
    lines.push(format!("        let mut r = {}::Reader::new(payload);", MARSHAL));
    for (field, name) in message.fields.iter().zip(names) {
        match field.array_len {
            Some(_) => lines.push(format!("        r.read_array(&mut self.{})?;", name)),
            None => lines.push(format!("        self.{} = r.read()?;", name)),
        }
    }
    lines.push("        r.finish()".to_string());
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines.push("".to_string());
    lines.join("\n")
}

/// Hand-written because `[T; N]` only derives `Default` up to N = 32.
fn generate_default(message: &Message, struct_name: &str, names: &[String]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("impl ::core::default::Default for {} {{", struct_name));
    lines.push("    fn default() -> Self {".to_string());
    lines.push("        Self {".to_string());
    for (field, name) in message.fields.iter().zip(names) {
        lines.push(format!("            {}: {},", name, rust_zero_value(field)));
    }
    lines.push("        }".to_string());
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines.push("".to_string());
    lines.join("\n")
}

fn generate_payload_impl(struct_name: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("impl {}::Payload for {} {{", MARSHAL, struct_name));
    lines.push(format!("    const MSG_HASH: u32 = {}::MSG_HASH;", struct_name));
    lines.push(format!("    const PAYLOAD_SIZE: usize = {}::PAYLOAD_SIZE;", struct_name));
    lines.push("".to_string());
    lines.push(format!(
        "    fn encode(&self, payload: &mut {}::BufferSpan<'_>) -> {}<(), {}::MarshalError> {{",
        MARSHAL, RESULT, MARSHAL
    ));
    lines.push(format!("        {}::encode(self, payload)", struct_name));
    lines.push("    }".to_string());
    lines.push("".to_string());
    lines.push(format!(
        "    fn decode(&mut self, payload: &[u8]) -> {}<(), {}::MarshalError> {{",
        RESULT, MARSHAL
    ));
    lines.push(format!("        {}::decode(self, payload)", struct_name));
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines.push("".to_string());
    lines.join("\n")
}
