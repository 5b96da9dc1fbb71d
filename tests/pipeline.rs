//! End-to-end pipeline tests against the public API: a crop session
//! driven the way an admin UI would drive it, and batch runs over mixed
//! inputs. All sources are synthesized in memory.

use std::io::Cursor;

use framepress::{
    CropSession, OutputFormat, OutputSpec, PipelineError, PointerPos, Quality, SessionState,
    downscale_and_encode_batch,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 241) as u8, ((x * y) % 239) as u8])
    });
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[test]
fn hero_banner_crop_session_end_to_end() {
    // 3000x2000 source, 16:9 target, 1920px output cap
    let mut session = CropSession::new(16.0 / 9.0).unwrap();
    session.load(&png_bytes(3000, 2000)).unwrap();
    assert_eq!(session.state(), SessionState::Ready);

    let rect = *session.rect().unwrap();
    assert_eq!(rect.width, 100.0);
    assert!((rect.height - 84.375).abs() < 1e-6);

    // Operator nudges the crop toward the top of the frame
    session.begin_drag(PointerPos { x: 50.0, y: 50.0 });
    session.drag_to(PointerPos { x: 50.0, y: 30.0 });
    session.drag_to(PointerPos { x: 50.0, y: -80.0 });
    session.end_drag();

    let positioned = session.rect().unwrap();
    assert_eq!(positioned.y, 0.0);
    assert_eq!(positioned.height, rect.height);

    let result = session
        .commit(&OutputSpec::crop(1920).with_quality(Quality::new(0.85)))
        .unwrap();
    assert_eq!((result.width, result.height), (1920, 1080));
    assert_eq!(result.mime_type(), "image/jpeg");
    assert_eq!(session.state(), SessionState::Done);

    // The buffer really is a decodable JPEG of the reported size
    let decoded = image::load_from_memory(&result.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1920, 1080));

    let upload = result.into_upload("hero");
    assert_eq!(upload.filename, "hero.jpg");
}

#[test]
fn commit_output_is_reproducible_across_sessions() {
    let bytes = png_bytes(1200, 900);
    let spec = OutputSpec::crop(600).with_format(OutputFormat::Png);

    let encode = || {
        let mut session = CropSession::new(4.0 / 5.0).unwrap();
        session.load(&bytes).unwrap();
        session.commit(&spec).unwrap()
    };

    let first = encode();
    let second = encode();
    assert_eq!(first.bytes, second.bytes);
    assert_eq!((first.width, first.height), (second.width, second.height));
}

#[test]
fn cancelled_session_produces_nothing_and_restarts_cleanly() {
    let mut session = CropSession::new(1.0).unwrap();
    session.load(&png_bytes(640, 480)).unwrap();
    session.begin_drag(PointerPos { x: 50.0, y: 50.0 });
    session.cancel();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.rect().is_none());

    // Same session object can host a fresh run afterwards
    session.load(&png_bytes(320, 320)).unwrap();
    let result = session.commit(&OutputSpec::crop(160)).unwrap();
    assert_eq!((result.width, result.height), (160, 160));
}

#[test]
fn gallery_batch_mixes_failures_and_successes() {
    let sources: Vec<Vec<u8>> = vec![
        png_bytes(2400, 1800),
        Vec::new(),
        png_bytes(500, 500),
        b"<html>not an image</html>".to_vec(),
        png_bytes(1600, 400),
    ];
    let spec = OutputSpec::bounded(1200, 1200).with_format(OutputFormat::Png);

    let results = downscale_and_encode_batch(&sources, &spec);
    assert_eq!(results.len(), 5);

    let first = results[0].as_ref().unwrap();
    assert_eq!((first.width, first.height), (1200, 900));

    assert!(matches!(
        results[1],
        Err(PipelineError::SourceDecodeFailed(_))
    ));

    // 500x500 under a 1200 cap is passed through unscaled
    let third = results[2].as_ref().unwrap();
    assert_eq!((third.width, third.height), (500, 500));

    assert!(matches!(
        results[3],
        Err(PipelineError::SourceDecodeFailed(_))
    ));

    let fifth = results[4].as_ref().unwrap();
    assert_eq!((fifth.width, fifth.height), (1200, 300));

    // Every success decodes to its reported dimensions
    for result in results.iter().flatten() {
        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (result.width, result.height));
    }
}
