use dnsprobe_domain::{DnsQuestion, RecordType};

#[test]
fn test_forward_question_keeps_name() {
    let q = DnsQuestion::for_lookup("www.example.com.", RecordType::A);

    assert_eq!(q.name.as_ref(), "www.example.com");
    assert_eq!(q.record_type, RecordType::A);
    assert!(!q.is_reverse());
}

#[test]
fn test_ptr_question_for_ipv4_is_reversed() {
    let q = DnsQuestion::for_lookup("192.0.2.10", RecordType::PTR);

    assert_eq!(q.name.as_ref(), "10.2.0.192.in-addr.arpa");
    assert!(q.is_reverse());
}

#[test]
fn test_ptr_question_for_ipv6_is_reversed() {
    let q = DnsQuestion::for_lookup("2001:db8::1", RecordType::PTR);

    assert!(q.name.ends_with(".8.b.d.0.1.0.0.2.ip6.arpa"));
    assert!(q.name.starts_with("1.0.0.0."));
    // 32 nibbles + "ip6" + "arpa"
    assert_eq!(q.name.split('.').count(), 34);
}

#[test]
fn test_ptr_question_for_arpa_name_is_unchanged() {
    let q = DnsQuestion::for_lookup("10.2.0.192.in-addr.arpa", RecordType::PTR);

    assert_eq!(q.name.as_ref(), "10.2.0.192.in-addr.arpa");
}

#[test]
fn test_ip_literal_for_forward_type_is_not_reversed() {
    let q = DnsQuestion::for_lookup("192.0.2.10", RecordType::A);

    assert_eq!(q.name.as_ref(), "192.0.2.10");
}
