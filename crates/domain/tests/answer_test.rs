use dnsprobe_domain::{answers_by_type, normalize, ExtractedAnswer, QueryResponse, RecordType, ResponseCode};

fn mixed_case_answers() -> Vec<ExtractedAnswer> {
    vec![
        ExtractedAnswer::new("WWW.Example.COM", RecordType::CNAME, "Edge.CDN.example.NET"),
        ExtractedAnswer::new("edge.cdn.example.net", RecordType::A, "203.0.113.7"),
        ExtractedAnswer::new("Edge.CDN.Example.Net", RecordType::AAAA, "2001:DB8::7"),
    ]
}

#[test]
fn test_normalize_lowercases_name_and_data() {
    let normalized = normalize(&mixed_case_answers());

    assert_eq!(normalized[0].name.as_ref(), "www.example.com");
    assert_eq!(normalized[0].data.as_ref(), "edge.cdn.example.net");
    assert_eq!(normalized[2].data.as_ref(), "2001:db8::7");
    assert_eq!(normalized[2].record_type, RecordType::AAAA);
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize(&mixed_case_answers());
    let twice = normalize(&once);

    assert_eq!(once, twice);
}

#[test]
fn test_normalize_preserves_order_and_length() {
    let answers = mixed_case_answers();
    let normalized = normalize(&answers);

    assert_eq!(normalized.len(), answers.len());
    for (before, after) in answers.iter().zip(&normalized) {
        assert_eq!(before.record_type, after.record_type);
    }
}

#[test]
fn test_answers_by_type_filters_other_types() {
    let only_a = answers_by_type(&mixed_case_answers(), RecordType::A);

    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].data.as_ref(), "203.0.113.7");
}

#[test]
fn test_nodata_requires_noerror_and_no_answers() {
    let nodata = QueryResponse::new("example.com", ResponseCode::NoError, vec![]);
    let nx = QueryResponse::new("example.com", ResponseCode::NXDomain, vec![]);

    assert!(nodata.is_nodata());
    assert!(!nx.is_nodata());
    assert!(nx.is_nxdomain());
}
