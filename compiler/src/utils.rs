/// Quote `text` as a JSON string literal for use in diagnostics.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// The "do not edit" banner placed at the top of every generated file, one
/// entry per line. Only the base name of the source schema is shown.
pub fn generated_banner(source_name: Option<&str>) -> Vec<String> {
    let rule = format!("// {}", "-".repeat(77));
    let mut lines = vec![rule.clone(), "// This file was generated by umsg-gen.".to_string()];
    if let Some(name) = source_name {
        lines.push(format!("// Source: {}", name));
    }
    lines.push("//".to_string());
    lines.push("// DO NOT EDIT THIS FILE DIRECTLY.".to_string());
    lines.push("// Edit the corresponding .umsg schema and re-run umsg-gen instead.".to_string());
    lines.push(rule);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a b"), "\"a b\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("tab\there"), "\"tab\\there\"");
    }

    #[test]
    fn test_banner_names_source() {
        let banner = generated_banner(Some("reading.umsg"));
        assert_eq!(banner.len(), 7);
        assert_eq!(banner[2], "// Source: reading.umsg");
        assert_eq!(banner[0].len(), 80);

        let anonymous = generated_banner(None);
        assert_eq!(anonymous.len(), 6);
        assert!(anonymous.iter().all(|line| !line.contains("Source")));
    }
}
