use std::path::Path;

use malta_wage::PayrollPolicy;
use pretty_assertions::assert_eq;

#[test]
fn bundled_policy_matches_built_in_default() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("policies/mt-2026-single.json");

    let loaded = PayrollPolicy::from_json_file(&path).unwrap();

    assert_eq!(loaded, PayrollPolicy::default());
}
