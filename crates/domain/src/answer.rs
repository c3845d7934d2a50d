use super::{RecordType, ResponseCode};
use std::sync::Arc;

/// Normalized projection of one DNS record from a response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtractedAnswer {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub data: Arc<str>,
}

impl ExtractedAnswer {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        data: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            data: data.into(),
        }
    }

    /// Lower-cases name and data.
    pub fn normalized(&self) -> Self {
        Self {
            name: Arc::from(self.name.to_lowercase()),
            record_type: self.record_type,
            data: Arc::from(self.data.to_lowercase()),
        }
    }
}

/// Lower-cases every answer. Applying it twice yields the same set.
pub fn normalize(answers: &[ExtractedAnswer]) -> Vec<ExtractedAnswer> {
    answers.iter().map(ExtractedAnswer::normalized).collect()
}

/// Keeps only the answers of the requested type.
pub fn answers_by_type(answers: &[ExtractedAnswer], record_type: RecordType) -> Vec<ExtractedAnswer> {
    answers
        .iter()
        .filter(|a| a.record_type == record_type)
        .cloned()
        .collect()
}

/// A parsed resolver response, independent of the wire library that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    /// Question name as echoed by the resolver, without the trailing dot.
    pub question: Arc<str>,
    pub rcode: ResponseCode,
    pub answers: Vec<ExtractedAnswer>,
}

impl QueryResponse {
    pub fn new(question: impl Into<Arc<str>>, rcode: ResponseCode, answers: Vec<ExtractedAnswer>) -> Self {
        Self {
            question: question.into(),
            rcode,
            answers,
        }
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError && self.answers.is_empty()
    }
}
