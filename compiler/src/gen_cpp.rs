use crate::{
    types::Message,
    utils::generated_banner,
};

fn cpp_payload_size_expr(message: &Message) -> String {
    let parts: Vec<String> = message
        .fields
        .iter()
        .map(|field| {
            let size = format!("sizeof({})", field.type_name.schema_name());
            match field.array_len {
                Some(len) => format!("({} * {}u)", size, len),
                None => size,
            }
        })
        .collect();

    if parts.is_empty() {
        "0u".to_string()
    } else {
        parts.join(" + ")
    }
}

/// Renders one message as a self-contained C++11 header for the umsg C++
/// runtime (`marshalling.hpp`). Locals in `encode`/`decode` carry a `umsg_`
/// prefix so schema fields named `w`, `r` or `payload` are not shadowed.
pub fn compile_message_to_cpp(message: &Message, source_name: Option<&str>) -> String {
    let mut lines: Vec<String> = vec![
        "#pragma once".to_string(),
        "#include <stddef.h>".to_string(),
        "#include <stdint.h>".to_string(),
        "".to_string(),
    ];
    lines.extend(generated_banner(source_name));
    lines.push("".to_string());
    lines.push("#include \"marshalling.hpp\"".to_string());
    lines.push("".to_string());

    lines.push(format!("struct {}", message.struct_name));
    lines.push("{".to_string());
    for field in &message.fields {
        let ty = field.type_name.schema_name();
        match field.array_len {
            Some(len) => lines.push(format!("    {} {}[{}];", ty, field.name, len)),
            None => lines.push(format!("    {} {};", ty, field.name)),
        }
    }
    lines.push("".to_string());
    lines.push(format!("    static const uint32_t kMsgHash = 0x{:08X}u;", message.msg_hash));
    lines.push(format!("    static const size_t kPayloadSize = {};", cpp_payload_size_expr(message)));
    lines.push("".to_string());

    lines.push("    bool encode(umsg::bufferSpan& umsg_payload) const".to_string());
    lines.push("    {".to_string());
    lines.push("        if (!umsg_payload.data) return false;".to_string());
    lines.push("        const size_t umsg_cap = umsg_payload.length;".to_string());
    lines.push("        umsg::Writer umsg_w(umsg_payload);".to_string());
    for field in &message.fields {
        match field.array_len {
            Some(len) => lines.push(format!("        if (!umsg_w.writeArray({}, {}u)) return false;", field.name, len)),
            None => lines.push(format!("        if (!umsg_w.write({})) return false;", field.name)),
        }
    }
    lines.push("        if (umsg_w.bytesWritten() > umsg_cap) return false;".to_string());
    lines.push("        umsg_payload.length = umsg_w.bytesWritten();".to_string());
    lines.push("        return true;".to_string());
    lines.push("    }".to_string());
    lines.push("".to_string());

    lines.push("    bool decode(umsg::bufferSpan umsg_payload)".to_string());
    lines.push("    {".to_string());
    lines.push("        umsg::Reader umsg_r(umsg_payload);".to_string());
    for field in &message.fields {
        match field.array_len {
            Some(len) => lines.push(format!("        if (!umsg_r.readArray({}, {}u)) return false;", field.name, len)),
            None => lines.push(format!("        if (!umsg_r.read({})) return false;", field.name)),
        }
    }
    lines.push("        return umsg_r.fullyConsumed();".to_string());
    lines.push("    }".to_string());
    lines.push("};".to_string());
    lines.push("".to_string());

    lines.join("\n")
}
