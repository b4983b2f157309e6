use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A namespace record as returned by `/list/<type>` and `/describe/<type>/<name>`.
///
/// The service owns this shape; fields are kept loosely typed because the
/// client only displays them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub ns_name: Option<Value>,
    pub billed_date: Option<Value>,
    pub expire_date: Option<Value>,
    pub user_id: Option<Value>,

    // Extended fields shown by `describe --wide`
    pub package_name: Option<Value>,
    pub state: Option<Value>,
    pub cpu: Option<Value>,
    pub ram: Option<Value>,
    pub pods: Option<Value>,
    pub secrets: Option<Value>,
    pub configmaps: Option<Value>,
    pub service: Option<Value>,
    pub ingress: Option<Value>,
    pub pvc_count: Option<Value>,
    pub total_storage_requests: Option<Value>,
    pub max_pvc_storage_request: Option<Value>,
    pub volume_size_unit: Option<Value>,
}
