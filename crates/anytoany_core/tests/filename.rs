use anytoany_core::{derive_download_name, parse_content_disposition_filename};

#[test]
fn quoted_and_bare_filenames() {
    assert_eq!(
        parse_content_disposition_filename(r#"attachment; filename="photo.png""#).as_deref(),
        Some("photo.png")
    );
    assert_eq!(
        parse_content_disposition_filename("attachment; filename=photo.png").as_deref(),
        Some("photo.png")
    );
    assert_eq!(
        parse_content_disposition_filename("attachment;filename = photo.png ; size=10").as_deref(),
        Some("photo.png")
    );
    assert_eq!(
        parse_content_disposition_filename(r#"attachment; FILENAME="My Photo.png""#).as_deref(),
        Some("My Photo.png")
    );
}

#[test]
fn extended_filename_wins_when_decodable() {
    assert_eq!(
        parse_content_disposition_filename(
            r#"attachment; filename="naive.png"; filename*=UTF-8''na%C3%AFve.png"#
        )
        .as_deref(),
        Some("naïve.png")
    );
    assert_eq!(
        parse_content_disposition_filename(
            r#"attachment; filename="fallback.png"; filename*=UTF-8''%FF%FE.png"#
        )
        .as_deref(),
        Some("fallback.png")
    );
}

#[test]
fn malformed_headers_yield_none() {
    assert_eq!(parse_content_disposition_filename(""), None);
    assert_eq!(parse_content_disposition_filename("attachment"), None);
    assert_eq!(parse_content_disposition_filename("inline; name=files"), None);
    assert_eq!(parse_content_disposition_filename(r#"attachment; filename="""#), None);
    assert_eq!(parse_content_disposition_filename("attachment; filename="), None);
    assert_eq!(
        parse_content_disposition_filename(r#"attachment; filename="photo.png"#),
        None
    );
}

#[test]
fn download_name_rules() {
    assert_eq!(
        derive_download_name(Some(r#"attachment; filename="photo.png""#), 1, "png"),
        "photo.png"
    );
    assert_eq!(derive_download_name(None, 1, "webp"), "converted_files.webp");
    assert_eq!(derive_download_name(None, 3, "webp"), "converted_files.zip");
    assert_eq!(
        derive_download_name(Some(r#"attachment; filename="result""#), 2, "png"),
        "result.zip"
    );
    assert_eq!(
        derive_download_name(Some(r#"attachment; filename="result""#), 1, "png"),
        "result.png"
    );
    assert_eq!(
        derive_download_name(Some("attachment; filename="), 1, "gif"),
        "converted_files.gif"
    );
}
