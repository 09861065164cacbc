// example/src/main.rs

use umsg_example::{envelope, LedCommand};
use umsg_marshal::BufferSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let command = LedCommand {
        led_state: 1,
        rgb:       [255, 128, 0],
        blink:     true,
        period_ms: 500,
    };

    // Encode into a fixed buffer the way firmware would.
    let mut storage = [0u8; 32];
    let mut span = BufferSpan::new(&mut storage);
    command.encode(&mut span)?;
    println!("LedCommand hash    = 0x{:08X}", LedCommand::MSG_HASH);
    println!("LedCommand payload = {} bytes: {:02X?}", span.len(), span.as_slice());

    // And through the hash-checked envelope.
    let frame = envelope::seal(&command)?;
    let decoded: LedCommand = envelope::open(&frame)?;
    println!("round trip ok      = {}", decoded == command);

    Ok(())
}
