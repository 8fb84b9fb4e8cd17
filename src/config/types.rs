//! Configuration file structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Policy;

/// The parsed contents of a `policies.yaml` file.
///
/// A profile is a named, fully-specified [`Policy`] that contracts refer
/// to by name; `default_profile` names the profile applied when a
/// request does not pick one explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliciesConfig {
    /// Name of the profile used when none is requested.
    pub default_profile: String,
    /// Named policy profiles.
    pub profiles: HashMap<String, Policy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceMode, CalcCycle};

    #[test]
    fn test_policies_config_deserializes_from_yaml() {
        let yaml = r#"
default_profile: flexible_daily
profiles:
  flexible_daily:
    mode: flexible
    cycle: daily
    overtime_enabled: true
    overtime_lag_minutes: "30"
    deduction_enabled: true
    deduction_lag_minutes: "15"
    flexible_break_hours: "1.0"
    days_in_month_policy: standard30
    day_start_offset_minutes: 240
"#;
        let config: PoliciesConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_profile, "flexible_daily");
        let profile = &config.profiles["flexible_daily"];
        assert_eq!(profile.mode, AttendanceMode::Flexible);
        assert_eq!(profile.cycle, CalcCycle::Daily);
        assert_eq!(profile.day_start_offset_minutes, 240);
    }
}
