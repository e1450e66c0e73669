use bitplane_hide::{
    BitIndex, Channel, ChannelTarget, PixelGrid, StegoConfig, StegoError, capacity_bits, embed,
    extract, pixels::LOSSLESS_FORMATS,
};
use image::{Rgba, RgbaImage};
use rand::RngCore;

/// 生成一个所有通道 (含 Alpha) 都随机的网格
fn random_grid(width: u32, height: u32) -> PixelGrid {
    let mut raw = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw);
    let buffer = RgbaImage::from_raw(width, height, raw).expect("buffer size matches");
    PixelGrid::from(buffer)
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

fn configs() -> Vec<StegoConfig> {
    vec![
        StegoConfig::default(),
        StegoConfig::new(BitIndex::new(1).unwrap(), ChannelTarget::red_only()),
        StegoConfig::new(BitIndex::new(7).unwrap(), ChannelTarget::rgb()),
        StegoConfig::new(
            BitIndex::new(4).unwrap(),
            ChannelTarget::new(&[Channel::Green, Channel::Blue]).unwrap(),
        ),
    ]
}

#[test]
fn round_trip_recovers_payload() {
    for config in configs() {
        let grid = random_grid(40, 25);
        for len in [0, 1, 2, 17, 80] {
            let payload = random_bytes(len);
            let stego = embed(&grid, &payload, &config).unwrap();
            assert_eq!(
                extract(&stego, &config).unwrap(),
                payload,
                "{config:?}, len {len}"
            );
        }
    }
}

#[test]
fn embed_does_not_touch_its_input() {
    let grid = random_grid(20, 20);
    let before = grid.clone();
    let _ = embed(&grid, b"untouched", &StegoConfig::default()).unwrap();
    assert_eq!(grid, before);
}

#[test]
fn alpha_and_untargeted_bits_are_preserved() {
    for config in configs() {
        let grid = random_grid(32, 32);
        let payload = random_bytes(60);
        let stego = embed(&grid, &payload, &config).unwrap();

        let keep_mask = !(1u8 << config.bit_index.get());
        for (before, after) in grid.pixels().zip(stego.pixels()) {
            assert_eq!(before[3], after[3], "alpha changed");
            for channel in [Channel::Red, Channel::Green, Channel::Blue] {
                let i = channel.index();
                if config.channels.contains(channel) {
                    assert_eq!(before[i] & keep_mask, after[i] & keep_mask);
                } else {
                    assert_eq!(before[i], after[i]);
                }
            }
        }
    }
}

#[test]
fn pixels_past_the_bitstream_are_untouched() {
    let grid = random_grid(50, 2);
    let stego = embed(&grid, b"hi", &StegoConfig::default()).unwrap();

    // 32 + 16 = 48 位，之后的像素必须原样保留
    let untouched: Vec<_> = grid.pixels().skip(48).collect();
    let after: Vec<_> = stego.pixels().skip(48).collect();
    assert_eq!(untouched, after);
}

#[test]
fn capacity_boundary_is_exact() {
    // 8x8 红色通道 = 64 位 = 32 位长度头 + 4 字节
    let grid = random_grid(8, 8);
    let config = StegoConfig::default();
    assert_eq!(capacity_bits(&grid, &config), 64);

    let payload = random_bytes(4);
    let stego = embed(&grid, &payload, &config).unwrap();
    assert_eq!(extract(&stego, &config).unwrap(), payload);

    // 65 位容量，需要 72 位：超出
    let grid = random_grid(13, 5);
    assert!(matches!(
        embed(&grid, &random_bytes(5), &config),
        Err(StegoError::Capacity {
            needed: 72,
            capacity: 65
        })
    ));
}

#[test]
fn one_bit_over_capacity_fails() {
    // 容量 47 位，需要 48 位
    let grid = random_grid(47, 1);
    assert!(matches!(
        embed(&grid, b"hi", &StegoConfig::default()),
        Err(StegoError::Capacity {
            needed: 48,
            capacity: 47
        })
    ));

    let grid = random_grid(48, 1);
    assert!(embed(&grid, b"hi", &StegoConfig::default()).is_ok());
}

#[test]
fn three_by_three_image_cannot_hold_a_header() {
    let grid = random_grid(3, 3);
    assert!(matches!(
        embed(&grid, b"", &StegoConfig::default()),
        Err(StegoError::Capacity {
            needed: 32,
            capacity: 9
        })
    ));
}

#[test]
fn hundred_by_one_carries_hi() {
    let grid = random_grid(100, 1);
    let config = StegoConfig::default();
    let stego = embed(&grid, b"hi", &config).unwrap();
    assert_eq!(extract(&stego, &config).unwrap(), b"hi");
}

#[test]
fn empty_payload_uses_only_the_header() {
    let grid = random_grid(32, 1);
    let config = StegoConfig::default();
    let stego = embed(&grid, b"", &config).unwrap();

    assert!(stego.pixels().all(|px| px[0] & 1 == 0));
    assert!(extract(&stego, &config).unwrap().is_empty());
}

#[test]
fn extract_is_idempotent() {
    let grid = random_grid(30, 30);
    let config = StegoConfig::default();
    let stego = embed(&grid, b"same every time", &config).unwrap();
    let first = extract(&stego, &config).unwrap();
    let second = extract(&stego, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, b"same every time");
}

#[test]
fn extract_reports_missing_header() {
    let grid = random_grid(31, 1);
    assert!(matches!(
        extract(&grid, &StegoConfig::default()),
        Err(StegoError::Format(_))
    ));
}

#[test]
fn extract_reports_truncation() {
    // 长度头声明 1 字节，但只剩 7 位
    let mut grid = PixelGrid::new(39, 1);
    grid.set(31, 0, [1, 0, 0, 255]).unwrap();
    assert!(matches!(
        extract(&grid, &StegoConfig::default()),
        Err(StegoError::Truncation {
            expected: 40,
            available: 39
        })
    ));
}

#[test]
fn extract_reads_a_hand_built_carrier() {
    // 逐像素写入 "A" (0x41) 的位流，验证行优先与最高位优先的约定
    let mut bits = vec![0u8; 31];
    bits.push(1);
    bits.extend([0, 1, 0, 0, 0, 0, 0, 1]);

    let width = 8;
    let mut grid = PixelGrid::new(width, 5);
    for (k, bit) in bits.iter().enumerate() {
        let (x, y) = (k as u32 % width, k as u32 / width);
        grid.set(x, y, [*bit, 0xAA, 0x55, 0x80]).unwrap();
    }

    assert_eq!(extract(&grid, &StegoConfig::default()).unwrap(), b"A");
}

#[test]
fn garbage_extraction_never_panics() {
    let config = StegoConfig::default();
    for (width, height) in [(1, 1), (4, 8), (32, 1), (33, 1), (64, 64), (7, 300)] {
        for _ in 0..8 {
            let grid = random_grid(width, height);
            match extract(&grid, &config) {
                Ok(bytes) => {
                    let used = bytes.len() as u64 * 8 + 32;
                    assert!(used <= capacity_bits(&grid, &config));
                }
                Err(StegoError::Format(_) | StegoError::Truncation { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}

#[test]
fn fully_saturated_channels_round_trip() {
    let buffer = RgbaImage::from_pixel(64, 4, Rgba([255, 255, 255, 0]));
    let grid = PixelGrid::from(buffer);
    let config = StegoConfig::new(BitIndex::new(7).unwrap(), ChannelTarget::rgb());

    let payload = random_bytes(capacity_bits(&grid, &config) as usize / 8 - 4);
    let stego = embed(&grid, &payload, &config).unwrap();
    assert_eq!(extract(&stego, &config).unwrap(), payload);
    assert!(stego.pixels().all(|px| px[3] == 0));
}

#[test]
fn every_lossless_format_keeps_embedded_bits() {
    let config = StegoConfig::new(BitIndex::LSB, ChannelTarget::rgb());

    let random_alpha = random_grid(37, 23);
    let mut transparent = random_grid(37, 23);
    for pixel in transparent.pixels_mut() {
        pixel[3] = 0;
    }

    for grid in [random_alpha, transparent] {
        let stego = embed(&grid, b"hello world!", &config).unwrap();
        for format in LOSSLESS_FORMATS {
            let encoded = stego.save(format).unwrap();
            let back = PixelGrid::load(&encoded).unwrap();
            assert_eq!(back, stego, "{format:?} changed channel values");
            assert_eq!(extract(&back, &config).unwrap(), b"hello world!");
        }
    }
}
