//! Incident workflow switches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Also set `status = assigned` when a chief assigns a technician.
    ///
    /// Off by default: assignment only writes the technician code and the
    /// incident stays unattended until the technician defers or resolves it.
    #[serde(default)]
    pub mark_assigned_on_assign: bool,
}
