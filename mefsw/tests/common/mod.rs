use std::{fs::File, io::Read};

use mefsw::conf::FrameConf;
use mefsw::FrameBuf;

pub fn file_to_packet(fname: &str) -> Vec<u8> {
    // The test is executed under the crate root directory.
    let mut program_path = std::env::current_dir().unwrap();
    program_path.push("tests");
    program_path.push("packet_examples");
    program_path.push(fname);

    let mut file = File::open(program_path).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    let content = content.trim();

    assert!(content.len() % 2 == 0, "odd number of hex digits in {}", fname);
    (0..content.len())
        .step_by(2)
        .map(|idx| u8::from_str_radix(&content[idx..idx + 2], 16).unwrap())
        .collect()
}

/// Load a frame into a buffer with the default headroom.
#[allow(dead_code)]
pub fn file_to_frame(fname: &str) -> FrameBuf {
    let packet = file_to_packet(fname);
    let mut frame = FrameBuf::from_conf(&FrameConf::default()).unwrap();
    frame.extend_from_slice(&packet[..]).unwrap();
    frame
}

#[allow(dead_code)]
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
