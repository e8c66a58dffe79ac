use std::io::Read as _;

use framepress::{
    ARCHIVE_FILE_NAME, BatchInput, BatchSession, MemorySink, SettingsPolicy, TARGET_FRAME,
    export_batch, export_to_dir,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([120, 130, 140, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn load_session(inputs: Vec<BatchInput>) -> BatchSession {
    let mut session = BatchSession::new(TARGET_FRAME, SettingsPolicy::default());
    session.load(inputs);
    session
}

#[test]
fn single_image_export_writes_one_named_png() {
    init_tracing();
    let mut session = load_session(vec![BatchInput::new("photo.jpg", png_bytes(2000, 1000))]);

    let dir = tempfile::TempDir::new().unwrap();
    let written = export_to_dir(&mut session, dir.path()).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(
        written[0].file_name().unwrap().to_str().unwrap(),
        "photo-watermarked.png"
    );

    let decoded = image::open(&written[0]).unwrap();
    assert_eq!(decoded.width(), TARGET_FRAME.width);
    assert_eq!(decoded.height(), TARGET_FRAME.height);
}

#[test]
fn multi_image_export_writes_zip_and_restores_selection() {
    init_tracing();
    let mut session = load_session(vec![
        BatchInput::new("a.jpg", png_bytes(2000, 1000)),
        BatchInput::new("b.jpeg", png_bytes(800, 1600)),
        BatchInput::new("c.webp", png_bytes(500, 500)),
    ]);
    session.select(1);

    let dir = tempfile::TempDir::new().unwrap();
    let written = export_to_dir(&mut session, dir.path()).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(
        written[0].file_name().unwrap().to_str().unwrap(),
        ARCHIVE_FILE_NAME
    );
    assert_eq!(session.current_index(), 1);

    let file = std::fs::File::open(&written[0]).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 3);
    for name in [
        "a-watermarked.png",
        "b-watermarked.png",
        "c-watermarked.png",
    ] {
        let mut entry = archive.by_name(name).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), TARGET_FRAME.width);
        assert_eq!(decoded.height(), TARGET_FRAME.height);
    }
}

#[test]
fn export_entries_follow_batch_order() {
    init_tracing();
    let mut session = load_session(vec![
        BatchInput::new("z-last-name.jpg", png_bytes(100, 100)),
        BatchInput::new("a-first-name.jpg", png_bytes(100, 100)),
    ]);

    let mut sink = MemorySink::new();
    let summary = export_batch(&mut session, &mut sink).unwrap();

    assert_eq!(summary.exported, 2);
    assert_eq!(summary.skipped, 0);
    let names: Vec<_> = sink.entries().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        ["z-last-name-watermarked.png", "a-first-name-watermarked.png"]
    );
}

#[test]
fn failed_decode_slot_is_excluded_from_export() {
    init_tracing();
    let mut session = load_session(vec![
        BatchInput::new("good.jpg", png_bytes(100, 100)),
        BatchInput::new("broken.jpg", b"not an image at all".to_vec()),
        BatchInput::new("fine.jpg", png_bytes(100, 100)),
    ]);

    let mut sink = MemorySink::new();
    let summary = export_batch(&mut session, &mut sink).unwrap();

    assert_eq!(summary.exported, 2);
    assert_eq!(summary.skipped, 1);
    let names: Vec<_> = sink.entries().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["good-watermarked.png", "fine-watermarked.png"]);
}

#[test]
fn empty_batch_export_is_a_no_op() {
    init_tracing();
    let mut session = BatchSession::new(TARGET_FRAME, SettingsPolicy::default());

    let mut sink = MemorySink::new();
    let summary = export_batch(&mut session, &mut sink).unwrap();
    assert_eq!(summary.exported, 0);
    assert!(sink.entries().is_empty());

    let dir = tempfile::TempDir::new().unwrap();
    let written = export_to_dir(&mut session, dir.path()).unwrap();
    assert!(written.is_empty());
}

#[test]
fn keep_original_exports_native_dimensions() {
    init_tracing();
    let mut session = load_session(vec![BatchInput::new("small.png", png_bytes(320, 240))]);
    session.set_keep_original(true);

    let dir = tempfile::TempDir::new().unwrap();
    let written = export_to_dir(&mut session, dir.path()).unwrap();
    let decoded = image::open(&written[0]).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 240));
}
