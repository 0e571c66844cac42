use asset_sync::core::proxy::{AddressError, ProxyAddress};

#[test]
fn test_parse_http_and_https() {
    assert!(ProxyAddress::parse("http://127.0.0.1:7890").is_ok());
    assert!(ProxyAddress::parse("https://proxy.example.com:8443").is_ok());
    assert!(ProxyAddress::parse("HTTP://127.0.0.1:7890").is_ok());
}

#[test]
fn test_parse_errors_are_distinguishable() {
    assert!(matches!(ProxyAddress::parse(""), Err(AddressError::Empty)));
    assert!(matches!(
        ProxyAddress::parse("socks5://127.0.0.1:1080"),
        Err(AddressError::UnsupportedScheme(scheme)) if scheme == "socks5"
    ));
    assert!(matches!(
        ProxyAddress::parse("127.0.0.1:7890"),
        Err(AddressError::ParseError(_))
    ));
}

#[test]
fn test_equality_uses_configured_text() {
    let a = ProxyAddress::parse("http://127.0.0.1:7890").unwrap();
    let b = ProxyAddress::parse(" http://127.0.0.1:7890").unwrap();
    let c = ProxyAddress::parse("http://localhost:7890").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string(), "http://127.0.0.1:7890");
}

#[test]
fn test_redacted_without_credentials_is_unchanged() {
    let addr = ProxyAddress::parse("http://127.0.0.1:7890").unwrap();
    assert_eq!(addr.redacted(), "http://127.0.0.1:7890");
}
