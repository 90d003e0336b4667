use flagpack::{FlagSet, Padding, Transcoder};

#[derive(Debug, FlagSet)]
struct RoomSettings {
    private: bool,
    allow_spectators: bool,
    hardcore: bool,
}

#[derive(Debug, FlagSet)]
#[flags(padding = "unknown")]
struct RoomSettingsV2 {
    private: bool,
    allow_spectators: bool,
    hardcore: bool,
    voice_chat: Option<bool>,
    #[flag(default = true)]
    profanity_filter: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let value = RoomSettings {
        private: false,
        allow_spectators: true,
        hardcore: false,
    };

    const ITERATIONS: usize = 10_000_000;
    let start = std::time::Instant::now();
    for _ in 0..ITERATIONS {
        std::hint::black_box(flagpack::encode(std::hint::black_box(&value))?);
    }
    let end = std::time::Instant::now();
    println!("Encoding {} iterations took: {:?}", ITERATIONS, end - start);
    println!("Average time per encode: {:?}", (end - start) / ITERATIONS as u32);

    let stored = flagpack::encode(&value)?;
    println!("{} = {:#b}", stored, stored);

    let upgraded: RoomSettingsV2 = flagpack::decode(stored)?;
    dbg!(&upgraded);

    let transcoder = Transcoder::builder(RoomSettingsV2::FIELDS.iter().copied())
        .padding(Padding::Unknown)
        .max_value(i32::MAX as u128)
        .build()?;
    println!("capacity of a 32-bit column: {} fields", transcoder.max_fields());
    for (field, flag) in &transcoder.decode(stored)? {
        println!("{:>20}: {:?}", field, flag);
    }

    Ok(())
}
