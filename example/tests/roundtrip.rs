use proptest::prelude::*;
use umsg_compiler::parse_message;
use umsg_example::{demo::names, AllTypes, Blob, LedCommand, Ping};
use umsg_marshal::{decode_from_slice, encode_to_vec, BufferSpan, MarshalError, Payload};

fn arb_all_types() -> impl Strategy<Value = AllTypes> {
    let small = (
        any::<u8>(),  any::<[u8; 2]>(),
        any::<i8>(),  any::<[i8; 2]>(),
        any::<u16>(), any::<[u16; 2]>(),
        any::<i16>(), any::<[i16; 2]>(),
        any::<u32>(), any::<[u32; 2]>(),
        any::<i32>(), any::<[i32; 2]>(),
    );
    let wide = (
        any::<u64>(),  any::<[u64; 2]>(),
        any::<i64>(),  any::<[i64; 2]>(),
        any::<bool>(), any::<[bool; 3]>(),
        any::<f32>(),  any::<[f32; 2]>(),
        any::<f64>(),  any::<[f64; 2]>(),
    );
    (small, wide).prop_map(|(s, w)| AllTypes {
        u8_value:   s.0,
        u8_array:   s.1,
        i8_value:   s.2,
        i8_array:   s.3,
        u16_value:  s.4,
        u16_array:  s.5,
        i16_value:  s.6,
        i16_array:  s.7,
        u32_value:  s.8,
        u32_array:  s.9,
        i32_value:  s.10,
        i32_array:  s.11,
        u64_value:  w.0,
        u64_array:  w.1,
        i64_value:  w.2,
        i64_array:  w.3,
        bool_value: w.4,
        bool_array: w.5,
        f32_value:  w.6,
        f32_array:  w.7,
        f64_value:  w.8,
        f64_array:  w.9,
    })
}

fn arb_led_command() -> impl Strategy<Value = LedCommand> {
    (any::<u8>(), any::<[u16; 3]>(), any::<bool>(), any::<u32>()).prop_map(
        |(led_state, rgb, blink, period_ms)| LedCommand { led_state, rgb, blink, period_ms },
    )
}

fn arb_blob() -> impl Strategy<Value = Blob> {
    (any::<u16>(), prop::collection::vec(any::<u8>(), 64)).prop_map(|(chunk, bytes)| {
        let mut data = [0u8; 64];
        data.copy_from_slice(&bytes);
        Blob { chunk, data }
    })
}

/// Floats are compared by bit pattern so NaN payloads count as equal.
fn assert_all_types_eq(a: &AllTypes, b: &AllTypes) {
    assert_eq!(a.u8_value, b.u8_value);
    assert_eq!(a.u8_array, b.u8_array);
    assert_eq!(a.i8_value, b.i8_value);
    assert_eq!(a.i8_array, b.i8_array);
    assert_eq!(a.u16_value, b.u16_value);
    assert_eq!(a.u16_array, b.u16_array);
    assert_eq!(a.i16_value, b.i16_value);
    assert_eq!(a.i16_array, b.i16_array);
    assert_eq!(a.u32_value, b.u32_value);
    assert_eq!(a.u32_array, b.u32_array);
    assert_eq!(a.i32_value, b.i32_value);
    assert_eq!(a.i32_array, b.i32_array);
    assert_eq!(a.u64_value, b.u64_value);
    assert_eq!(a.u64_array, b.u64_array);
    assert_eq!(a.i64_value, b.i64_value);
    assert_eq!(a.i64_array, b.i64_array);
    assert_eq!(a.bool_value, b.bool_value);
    assert_eq!(a.bool_array, b.bool_array);
    assert_eq!(a.f32_value.to_bits(), b.f32_value.to_bits());
    assert_eq!(a.f32_array.map(f32::to_bits), b.f32_array.map(f32::to_bits));
    assert_eq!(a.f64_value.to_bits(), b.f64_value.to_bits());
    assert_eq!(a.f64_array.map(f64::to_bits), b.f64_array.map(f64::to_bits));
}

/// Every buffer shorter than the payload must be refused, and the span must
/// never claim more bytes than it was given.
fn check_capacity<P: Payload>(message: &P) {
    for capacity in 0..P::PAYLOAD_SIZE {
        let mut storage = vec![0u8; P::PAYLOAD_SIZE];
        let mut span = BufferSpan::with_len(&mut storage, capacity);
        assert!(matches!(
            message.encode(&mut span),
            Err(MarshalError::Overflow { .. })
        ));
        assert!(span.len() <= capacity);
    }
}

/// Short buffers and buffers with trailing bytes must both fail to decode.
fn check_truncation<P: Payload>(encoded: &[u8]) {
    for len in 0..encoded.len() {
        assert!(matches!(
            decode_from_slice::<P>(&encoded[..len]),
            Err(MarshalError::Underflow { .. })
        ));
    }
    let mut padded = encoded.to_vec();
    padded.push(0);
    assert_eq!(
        decode_from_slice::<P>(&padded).err(),
        Some(MarshalError::TrailingBytes { remaining: 1 })
    );
}

proptest! {
    #[test]
    fn all_types_round_trip(message in arb_all_types()) {
        let encoded = encode_to_vec(&message).unwrap();
        prop_assert_eq!(encoded.len(), AllTypes::PAYLOAD_SIZE);

        let decoded: AllTypes = decode_from_slice(&encoded).unwrap();
        assert_all_types_eq(&message, &decoded);
        prop_assert_eq!(encode_to_vec(&decoded).unwrap(), encoded);
    }

    #[test]
    fn led_command_round_trip(message in arb_led_command()) {
        let encoded = encode_to_vec(&message).unwrap();
        prop_assert_eq!(encoded.len(), LedCommand::PAYLOAD_SIZE);
        prop_assert_eq!(decode_from_slice::<LedCommand>(&encoded).unwrap(), message);
    }

    #[test]
    fn blob_round_trip(message in arb_blob()) {
        let encoded = encode_to_vec(&message).unwrap();
        prop_assert_eq!(&encoded[2..], &message.data[..]);
        prop_assert_eq!(decode_from_slice::<Blob>(&encoded).unwrap(), message);
    }

    #[test]
    fn all_types_capacity_and_truncation(message in arb_all_types()) {
        check_capacity(&message);
        check_truncation::<AllTypes>(&encode_to_vec(&message).unwrap());
    }
}

#[test]
fn payload_sizes() {
    assert_eq!(AllTypes::PAYLOAD_SIZE, 130);
    assert_eq!(LedCommand::PAYLOAD_SIZE, 12);
    assert_eq!(Ping::PAYLOAD_SIZE, 4);
    assert_eq!(Blob::PAYLOAD_SIZE, 66);
    assert_eq!(<Blob as Payload>::PAYLOAD_SIZE, Blob::PAYLOAD_SIZE);
}

#[test]
fn hash_constants_match_compiler() {
    assert_eq!(Ping::MSG_HASH, 0xB2F2_22D3);

    let schemas = [
        (include_str!("../schemas/ping.umsg"), Ping::MSG_HASH),
        (include_str!("../schemas/led_command.umsg"), LedCommand::MSG_HASH),
        (include_str!("../schemas/all_types.umsg"), AllTypes::MSG_HASH),
        (include_str!("../schemas/blob.umsg"), Blob::MSG_HASH),
        (include_str!("../schemas/writer.umsg"), names::Writer::MSG_HASH),
    ];
    for (text, hash) in schemas {
        assert_eq!(parse_message(text).unwrap().msg_hash, hash);
    }
}

#[test]
fn led_command_wire_layout() {
    let command = LedCommand {
        led_state: 1,
        rgb:       [255, 128, 0],
        blink:     true,
        period_ms: 500,
    };

    let mut storage = [0xAAu8; 20];
    let mut span = BufferSpan::new(&mut storage);
    command.encode(&mut span).unwrap();
    assert_eq!(span.len(), 12);
    assert_eq!(
        span.as_slice(),
        &[1, 0, 255, 0, 128, 0, 0, 1, 0, 0, 0x01, 0xF4]
    );
    // Bytes past the written length are untouched.
    assert_eq!(storage[12..], [0xAA; 8]);
}

#[test]
fn led_command_capacity_and_truncation() {
    let command = LedCommand { led_state: 3, rgb: [1, 2, 3], blink: false, period_ms: 9 };
    check_capacity(&command);
    check_truncation::<LedCommand>(&encode_to_vec(&command).unwrap());
}

#[test]
fn decode_rejects_invalid_bool() {
    let mut encoded = encode_to_vec(&LedCommand::default()).unwrap();
    encoded[7] = 2;
    assert_eq!(
        decode_from_slice::<LedCommand>(&encoded),
        Err(MarshalError::InvalidBool(2))
    );
}

#[test]
fn default_is_zeroed() {
    let blob = Blob::default();
    assert_eq!(blob.chunk, 0);
    assert!(blob.data.iter().all(|&b| b == 0));
    assert_eq!(encode_to_vec(&blob).unwrap(), vec![0u8; 66]);
}

#[test]
fn escaped_names_round_trip() {
    let message = names::Writer { __: 7, type_: true, self_: [0x0102, 0xFFFF] };
    let encoded = encode_to_vec(&message).unwrap();
    assert_eq!(encoded, vec![7, 1, 0x01, 0x02, 0xFF, 0xFF]);
    assert_eq!(names::Writer::PAYLOAD_SIZE, 6);
    assert_eq!(decode_from_slice::<names::Writer>(&encoded).unwrap(), message);
    assert_eq!(names::Writer::default(), names::Writer { __: 0, type_: false, self_: [0, 0] });
}
