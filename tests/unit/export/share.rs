use super::*;

#[test]
fn twitter_intent_carries_title_and_url() {
    let got = share_url(
        "twitter",
        "https://blog.example/post?id=1",
        "Rust & WASM: 2x faster",
    )
    .unwrap();
    assert_eq!(
        got,
        "https://twitter.com/intent/tweet?text=Rust%20%26%20WASM%3A%202x%20faster\
         &url=https%3A%2F%2Fblog.example%2Fpost%3Fid%3D1"
    );
}

#[test]
fn linkedin_and_facebook_share_the_url_only() {
    assert_eq!(
        share_url("LinkedIn", "https://a.example/x y", "ignored").unwrap(),
        "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fa.example%2Fx%20y"
    );
    assert_eq!(
        share_url(" FACEBOOK ", "https://a.example/", "ignored").unwrap(),
        "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fa.example%2F"
    );
}

#[test]
fn unreserved_marks_and_unicode() {
    assert_eq!(encode_component("it's (really) fine! ~*_.-"), "it's%20(really)%20fine!%20~*_.-");
    assert_eq!(encode_component("café"), "caf%C3%A9");
}

#[test]
fn unknown_platform_is_rejected() {
    let err = share_url("mastodon", "https://a.example/", "t").unwrap_err();
    assert!(matches!(&err, CoverError::Validation(msg) if msg.contains("mastodon")));
    assert!("".parse::<SharePlatform>().is_err());
}

#[test]
fn popups_are_centered_on_screen() {
    assert_eq!(SharePlatform::Twitter.popup(), PopupSize { width: 550, height: 420 });
    assert_eq!(SharePlatform::LinkedIn.popup(), PopupSize { width: 600, height: 600 });
    assert_eq!(SharePlatform::Facebook.popup(), PopupSize { width: 670, height: 340 });
    assert_eq!(
        SharePlatform::Twitter.popup().centered_origin(1920.0, 1080.0),
        (685.0, 330.0)
    );
}

#[test]
fn platform_serde_and_display() {
    assert_eq!(serde_json::to_string(&SharePlatform::LinkedIn).unwrap(), r#""linkedin""#);
    let p: SharePlatform = serde_json::from_str(r#""facebook""#).unwrap();
    assert_eq!(p, SharePlatform::Facebook);
    assert_eq!(SharePlatform::Twitter.to_string(), "Twitter");
}
