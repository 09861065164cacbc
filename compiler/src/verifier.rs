use crate::{
    error::GrammarError,
    parser::FieldDecl,
    types::{Field, PrimitiveType},
    utils::quote,
};

/// Largest payload a message may describe. Sizes are counted in `u64` so the
/// check itself cannot overflow on 32-bit hosts.
pub const MAX_PAYLOAD_SIZE: u64 = u32::MAX as u64;

/// Check one declaration against the allowed type set and the array-length
/// rule, producing the final [`Field`].
pub fn verify_field(decl: &FieldDecl<'_>) -> Result<Field, GrammarError> {
    let type_name = PrimitiveType::from_name(decl.type_name).ok_or_else(|| {
        GrammarError::UnsupportedType {
            field:     quote(decl.name),
            type_name: quote(decl.type_name),
        }
    })?;

    let array_len = match decl.array_len {
        None => None,
        Some(text) => Some(verify_array_len(decl.name, text)?),
    };

    Ok(Field {
        type_name,
        name: decl.name.to_string(),
        array_len,
    })
}

/// Array lengths must be strictly positive and fit in 32 bits.
fn verify_array_len(field: &str, text: &str) -> Result<u32, GrammarError> {
    let non_positive = || GrammarError::NonPositiveArrayLength {
        field:  quote(field),
        length: text.to_string(),
    };

    if text.starts_with('-') {
        return Err(non_positive());
    }
    match text.parse::<u32>() {
        Ok(0) => Err(non_positive()),
        Ok(len) => Ok(len),
        Err(_) => Err(GrammarError::InvalidField(quote(&format!(
            "{}[{}]: array length out of range",
            field, text
        )))),
    }
}

/// Message-level checks: at least one field, no name declared twice, and a
/// payload no larger than [`MAX_PAYLOAD_SIZE`].
pub fn verify_fields(struct_name: &str, fields: &[Field]) -> Result<(), GrammarError> {
    if fields.is_empty() {
        return Err(GrammarError::NoFields(quote(struct_name)));
    }

    let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
    for field in fields {
        if seen.contains(&field.name.as_str()) {
            return Err(GrammarError::DuplicateField {
                field: quote(&field.name),
            });
        }
        seen.push(&field.name);
    }

    let size: u64 = fields
        .iter()
        .map(|field| field.type_name.size() as u64 * u64::from(field.array_len.unwrap_or(1)))
        .sum();
    if size > MAX_PAYLOAD_SIZE {
        return Err(GrammarError::PayloadTooLarge {
            struct_name: quote(struct_name),
            size,
            max: MAX_PAYLOAD_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl<'a>(type_name: &'a str, name: &'a str, array_len: Option<&'a str>) -> FieldDecl<'a> {
        FieldDecl { type_name, name, array_len }
    }

    #[test]
    fn test_every_allowed_type() {
        let expected = [
            ("uint8_t", 1), ("int8_t", 1), ("uint16_t", 2), ("int16_t", 2),
            ("uint32_t", 4), ("int32_t", 4), ("uint64_t", 8), ("int64_t", 8),
            ("bool", 1), ("float", 4), ("double", 8),
        ];
        for (type_name, size) in expected {
            let field = verify_field(&decl(type_name, "x", None)).unwrap();
            assert_eq!(field.type_name.schema_name(), type_name);
            assert_eq!(field.wire_size(), size);
        }
    }

    #[test]
    fn test_disallowed_type() {
        assert_eq!(
            verify_field(&decl("weird_t", "a", None)),
            Err(GrammarError::UnsupportedType {
                field:     "\"a\"".to_string(),
                type_name: "\"weird_t\"".to_string(),
            })
        );
        assert!(verify_field(&decl("string", "a", None)).is_err());
        assert!(verify_field(&decl("UINT8_T", "a", None)).is_err());
    }

    #[test]
    fn test_array_lengths() {
        assert_eq!(verify_field(&decl("uint8_t", "a", Some("4"))).unwrap().array_len, Some(4));
        assert_eq!(verify_field(&decl("uint8_t", "a", Some("007"))).unwrap().array_len, Some(7));
        assert!(matches!(
            verify_field(&decl("uint8_t", "a", Some("0"))),
            Err(GrammarError::NonPositiveArrayLength { .. })
        ));
        assert!(matches!(
            verify_field(&decl("uint8_t", "a", Some("-3"))),
            Err(GrammarError::NonPositiveArrayLength { .. })
        ));
        assert!(matches!(
            verify_field(&decl("uint8_t", "a", Some("99999999999"))),
            Err(GrammarError::InvalidField(_))
        ));
    }

    #[test]
    fn test_type_checked_before_length() {
        assert!(matches!(
            verify_field(&decl("weird_t", "a", Some("0"))),
            Err(GrammarError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(
            verify_fields("Foo", &[]),
            Err(GrammarError::NoFields("\"Foo\"".to_string()))
        );
    }

    #[test]
    fn test_duplicate_field() {
        let a = verify_field(&decl("uint8_t", "a", None)).unwrap();
        let b = verify_field(&decl("uint16_t", "b", None)).unwrap();
        let a_again = verify_field(&decl("double", "a", Some("2"))).unwrap();
        assert!(verify_fields("Foo", &[a.clone(), b.clone()]).is_ok());
        assert_eq!(
            verify_fields("Foo", &[a, b, a_again]),
            Err(GrammarError::DuplicateField { field: "\"a\"".to_string() })
        );
    }

    #[test]
    fn test_payload_size_limit() {
        let wide = verify_field(&decl("uint64_t", "a", Some("600000000"))).unwrap();
        assert_eq!(
            verify_fields("Big", &[wide]),
            Err(GrammarError::PayloadTooLarge {
                struct_name: "\"Big\"".to_string(),
                size:        4_800_000_000,
                max:         MAX_PAYLOAD_SIZE,
            })
        );

        // Each field fits on its own; the sum does not.
        let a = verify_field(&decl("uint8_t", "a", Some("3000000000"))).unwrap();
        let b = verify_field(&decl("uint8_t", "b", Some("3000000000"))).unwrap();
        assert!(verify_fields("Half", &[a.clone()]).is_ok());
        assert!(matches!(
            verify_fields("Sum", &[a, b]),
            Err(GrammarError::PayloadTooLarge { size: 6_000_000_000, .. })
        ));

        let edge = verify_field(&decl("uint8_t", "a", Some("4294967295"))).unwrap();
        assert!(verify_fields("Edge", &[edge]).is_ok());
    }

    #[test]
    fn test_wire_size_saturates() {
        let field = Field { type_name: PrimitiveType::U64, name: "a".to_string(), array_len: Some(u32::MAX) };
        assert_eq!(field.wire_size(), (8u64 * u32::MAX as u64).min(usize::MAX as u64) as usize);
    }
}
