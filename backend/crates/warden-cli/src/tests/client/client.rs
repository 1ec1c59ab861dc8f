use crate::Client;

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = Client::new("http://localhost:8750/", None);
    assert_eq!(client.base_url, "http://localhost:8750");
}

#[test]
fn test_base_url_no_trailing_slash() {
    let client = Client::new("http://localhost:8750", None);
    assert_eq!(client.base_url, "http://localhost:8750");
}

#[test]
fn test_operator_id_stored() {
    let client = Client::new("http://localhost:8750", Some("ops-alice"));
    assert_eq!(client.operator_id, Some("ops-alice".to_string()));
}

#[test]
fn test_blank_operator_id_dropped() {
    let client = Client::new("http://localhost:8750", Some("  "));
    assert!(client.operator_id.is_none());
}
