use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MaskpaintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MaskpaintError::raster("x")
            .to_string()
            .contains("raster error:")
    );
    assert!(
        MaskpaintError::archive("x")
            .to_string()
            .contains("archive error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MaskpaintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn zip_errors_map_to_archive() {
    let err: MaskpaintError = zip::result::ZipError::FileNotFound.into();
    assert!(matches!(err, MaskpaintError::Archive(_)));
}
