use std::sync::Arc;

/// Handle to an FQDN recorded in the asset graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FqdnAsset {
    pub id: Arc<str>,
    pub name: Arc<str>,
}

impl FqdnAsset {
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
