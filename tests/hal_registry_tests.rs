use iioscan::hal::{parse_scan_element, ChannelRegistry, Direction, LayoutError, ScanElement};

fn element(index: u32, descriptor: &str) -> ScanElement {
    parse_scan_element(&index.to_string(), descriptor).unwrap()
}

#[test]
fn test_ordered_channels_sorted_by_stream_index() {
    let mut registry = ChannelRegistry::new();
    let indices = [3u32, 0, 7, 1, 5];
    for (n, index) in indices.iter().enumerate() {
        registry
            .add_channel(&format!("in_voltage{}", n), Direction::Input, element(*index, "le:u8/64>>0"))
            .unwrap();
    }

    let ordered: Vec<u32> = registry
        .ordered_channels()
        .iter()
        .map(|ch| ch.stream_index)
        .collect();
    assert_eq!(ordered, vec![0, 1, 3, 5, 7]);
    assert_eq!(registry.len(), indices.len());
}

#[test]
fn test_frame_width_mismatch_regardless_of_order() {
    for (first, second) in [("le:u16/16>>0", "le:u16/32>>0"), ("le:u16/32>>0", "le:u16/16>>0")] {
        let mut registry = ChannelRegistry::new();
        registry
            .add_channel("a", Direction::Input, element(0, first))
            .unwrap();

        let err = registry
            .add_channel("b", Direction::Input, element(1, second))
            .unwrap_err();
        assert!(matches!(err, LayoutError::FrameWidthMismatch { .. }), "{:?}", err);
        assert_eq!(registry.len(), 1);
    }
}

#[test]
fn test_duplicate_name() {
    let mut registry = ChannelRegistry::new();
    registry
        .add_channel("in_voltage0", Direction::Input, element(0, "le:u16/32>>0"))
        .unwrap();

    let err = registry
        .add_channel("in_voltage0", Direction::Input, element(1, "le:u16/32>>16"))
        .unwrap_err();
    assert_eq!(err, LayoutError::DuplicateChannelName("in_voltage0".to_string()));
}

#[test]
fn test_duplicate_stream_index() {
    let mut registry = ChannelRegistry::new();
    registry
        .add_channel("a", Direction::Input, element(2, "le:u16/32>>0"))
        .unwrap();

    let err = registry
        .add_channel("b", Direction::Input, element(2, "le:u16/32>>16"))
        .unwrap_err();
    assert!(matches!(err, LayoutError::DuplicateStreamIndex { index: 2, .. }));
}

#[test]
fn test_get_channel() {
    let mut registry = ChannelRegistry::new();
    registry
        .add_channel("out_voltage0", Direction::Output, element(0, "be:s16/16>>0"))
        .unwrap();

    let layout = registry.get_channel("out_voltage0").unwrap();
    assert_eq!(layout.direction, Direction::Output);
    assert_eq!(layout.format.to_string(), "be:s16/16>>0");

    assert_eq!(
        registry.get_channel("gain").unwrap_err(),
        LayoutError::ChannelNotFound("gain".to_string())
    );
}

#[test]
fn test_frame_byte_width() {
    let mut registry = ChannelRegistry::new();
    assert_eq!(registry.frame_byte_width(), Err(LayoutError::EmptyRegistry));

    registry
        .add_channel("a", Direction::Input, element(0, "le:s24/32>>8"))
        .unwrap();
    assert_eq!(registry.frame_byte_width(), Ok(4));
}

#[test]
fn test_channels_with_direction() {
    let mut registry = ChannelRegistry::new();
    registry
        .add_channel("in_voltage0", Direction::Input, element(0, "le:u8/16>>0"))
        .unwrap();
    registry
        .add_channel("out_voltage0", Direction::Output, element(1, "le:u8/16>>8"))
        .unwrap();

    let inputs: Vec<_> = registry
        .channels_with_direction(Direction::Input)
        .map(|ch| ch.name.clone())
        .collect();
    assert_eq!(inputs, vec!["in_voltage0".to_string()]);
}

#[test]
fn test_hand_built_format_rejected() {
    use iioscan::hal::ChannelFormat;

    for frame_bit_width in [0u32, 128] {
        let mut registry = ChannelRegistry::new();
        let element = ScanElement {
            stream_index: 0,
            format: ChannelFormat {
                is_little_endian: true,
                is_signed: false,
                bit_width: if frame_bit_width == 0 { 0 } else { 16 },
                frame_bit_width,
                bit_shift: 0,
            },
        };

        let err = registry
            .add_channel("ch", Direction::Input, element)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InconsistentBitLayout { .. }), "{:?}", err);
        assert!(registry.is_empty());
        assert!(registry.deinterleave(&[1, 2]).is_err());
    }
}
