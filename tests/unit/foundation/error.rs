use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CoverError::canvas_init("x")
            .to_string()
            .contains("canvas init error:")
    );
    assert!(
        CoverError::image_load("x")
            .to_string()
            .contains("image load error:")
    );
    assert!(CoverError::export("x").to_string().contains("export error:"));
    assert!(
        CoverError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CoverError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CoverError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_canvas_and_image_failures_are_terminal() {
    assert!(CoverError::canvas_init("no context").is_terminal_render_failure());
    assert!(CoverError::image_load("bad png").is_terminal_render_failure());
    assert!(!CoverError::export("disk full").is_terminal_render_failure());
    assert!(!CoverError::validation("x").is_terminal_render_failure());
}
