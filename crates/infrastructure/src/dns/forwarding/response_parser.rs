use super::record_type_map::RecordTypeMapper;
use dnsprobe_domain::{DomainError, ExtractedAnswer, QueryResponse, ResponseCode};
use hickory_proto::op::{Message, ResponseCode as HickoryResponseCode};
use hickory_proto::rr::{RData, Record};
use std::sync::Arc;
use tracing::debug;

/// A decoded upstream response plus the header bits the pool needs.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,
    pub truncated: bool,
    pub response: QueryResponse,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let question = message
            .queries()
            .first()
            .map(|q| trim_dot(&q.name().to_utf8()))
            .unwrap_or_default();

        let answers: Vec<ExtractedAnswer> =
            message.answers().iter().filter_map(extract_answer).collect();

        let rcode = Self::rcode(message.response_code());
        let truncated = message.truncated();

        debug!(
            rcode = %rcode,
            answers = answers.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            id: message.id(),
            truncated,
            response: QueryResponse::new(question, rcode, answers),
        })
    }

    pub fn rcode(rcode: HickoryResponseCode) -> ResponseCode {
        match rcode {
            HickoryResponseCode::NoError => ResponseCode::NoError,
            HickoryResponseCode::FormErr => ResponseCode::FormErr,
            HickoryResponseCode::ServFail => ResponseCode::ServFail,
            HickoryResponseCode::NXDomain => ResponseCode::NXDomain,
            HickoryResponseCode::NotImp => ResponseCode::NotImp,
            HickoryResponseCode::Refused => ResponseCode::Refused,
            other => ResponseCode::from_u16(u16::from(other)),
        }
    }
}

fn trim_dot(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_string()
}

fn extract_answer(record: &Record) -> Option<ExtractedAnswer> {
    let record_type = RecordTypeMapper::from_hickory(record.record_type())?;
    let data = match record.data() {
        RData::A(a) => a.0.to_string(),
        RData::AAAA(aaaa) => aaaa.0.to_string(),
        RData::CNAME(canonical) => trim_dot(&canonical.to_utf8()),
        RData::PTR(ptr) => trim_dot(&ptr.to_utf8()),
        RData::NS(ns) => trim_dot(&ns.to_utf8()),
        other => trim_dot(&other.to_string()),
    };

    Some(ExtractedAnswer::new(
        Arc::from(trim_dot(&record.name().to_utf8())),
        record_type,
        data,
    ))
}
