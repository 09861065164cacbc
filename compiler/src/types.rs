use serde::Serialize;

/// The fixed set of field types a schema may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveType {
    #[serde(rename = "uint8_t")]
    U8,
    #[serde(rename = "int8_t")]
    I8,
    #[serde(rename = "uint16_t")]
    U16,
    #[serde(rename = "int16_t")]
    I16,
    #[serde(rename = "uint32_t")]
    U32,
    #[serde(rename = "int32_t")]
    I32,
    #[serde(rename = "uint64_t")]
    U64,
    #[serde(rename = "int64_t")]
    I64,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "float")]
    F32,
    #[serde(rename = "double")]
    F64,
}

pub const PRIMITIVE_TYPES: [PrimitiveType; 11] = [
    PrimitiveType::U8,
    PrimitiveType::I8,
    PrimitiveType::U16,
    PrimitiveType::I16,
    PrimitiveType::U32,
    PrimitiveType::I32,
    PrimitiveType::U64,
    PrimitiveType::I64,
    PrimitiveType::Bool,
    PrimitiveType::F32,
    PrimitiveType::F64,
];

impl PrimitiveType {
    /// Looks up a schema type token such as `uint32_t`.
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        PRIMITIVE_TYPES.iter().copied().find(|t| t.schema_name() == name)
    }

    /// The token used in `.umsg` files. Also the C++ spelling.
    pub fn schema_name(self) -> &'static str {
        match self {
            PrimitiveType::U8   => "uint8_t",
            PrimitiveType::I8   => "int8_t",
            PrimitiveType::U16  => "uint16_t",
            PrimitiveType::I16  => "int16_t",
            PrimitiveType::U32  => "uint32_t",
            PrimitiveType::I32  => "int32_t",
            PrimitiveType::U64  => "uint64_t",
            PrimitiveType::I64  => "int64_t",
            PrimitiveType::Bool => "bool",
            PrimitiveType::F32  => "float",
            PrimitiveType::F64  => "double",
        }
    }

    pub fn rust_name(self) -> &'static str {
        match self {
            PrimitiveType::U8   => "u8",
            PrimitiveType::I8   => "i8",
            PrimitiveType::U16  => "u16",
            PrimitiveType::I16  => "i16",
            PrimitiveType::U32  => "u32",
            PrimitiveType::I32  => "i32",
            PrimitiveType::U64  => "u64",
            PrimitiveType::I64  => "i64",
            PrimitiveType::Bool => "bool",
            PrimitiveType::F32  => "f32",
            PrimitiveType::F64  => "f64",
        }
    }

    /// Wire size in bytes.
    pub fn size(self) -> usize {
        match self {
            PrimitiveType::U8 | PrimitiveType::I8 | PrimitiveType::Bool => 1,
            PrimitiveType::U16 | PrimitiveType::I16                     => 2,
            PrimitiveType::U32 | PrimitiveType::I32 | PrimitiveType::F32 => 4,
            PrimitiveType::U64 | PrimitiveType::I64 | PrimitiveType::F64 => 8,
        }
    }

    /// Literal used to zero-initialise a value of this type in Rust output.
    pub fn rust_zero(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "false",
            PrimitiveType::F32 | PrimitiveType::F64 => "0.0",
            _ => "0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub type_name: PrimitiveType,
    pub name:      String,
    pub array_len: Option<u32>,
}

impl Field {
    /// Number of wire bytes this field occupies. Saturates rather than
    /// wrapping; verified messages never get near the limit.
    pub fn wire_size(&self) -> usize {
        let len = usize::try_from(self.array_len.unwrap_or(1)).unwrap_or(usize::MAX);
        self.type_name.size().saturating_mul(len)
    }
}

/// One compiled schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub struct_name:    String,
    pub package:        Option<String>,
    pub fields:         Vec<Field>,
    pub canonical_text: String,
    pub msg_hash:       u32,
}

impl Message {
    /// Sum of every field's wire size.
    pub fn payload_size(&self) -> usize {
        self.fields
            .iter()
            .fold(0usize, |total, field| total.saturating_add(field.wire_size()))
    }

    /// Namespace segments, outermost first. Empty without a package.
    pub fn package_segments(&self) -> Vec<&str> {
        match &self.package {
            Some(package) => package.split('.').collect(),
            None => Vec::new(),
        }
    }
}
