use proptest::prelude::*;

use waypoint_launch::description::generate_launch_description;
use waypoint_launch::engine::{parse_launch_argument, plan};

const MESSAGE: &str = "Launching waypoint counter with target waypoint 10";

proptest! {
    #[test]
    fn override_value_is_resolved_and_forwarded(value in "[ -~]{0,16}") {
        let token = format!("target_wp:={value}");
        let overrides = vec![parse_launch_argument(&token).unwrap()];
        let plan = plan(&generate_launch_description(), &overrides).unwrap();

        prop_assert_eq!(plan.context.get("target_wp"), Some(value.as_str()));

        let specs: Vec<_> = plan.processes().collect();
        prop_assert_eq!(specs.len(), 1);
        prop_assert_eq!(specs[0].parameter("target_wp"), Some(value.as_str()));
    }

    #[test]
    fn log_fires_iff_value_is_10(
        value in prop_oneof![Just("10".to_string()), "[0-9]{1,3}", "[a-z ]{0,6}"]
    ) {
        let overrides = vec![("target_wp".to_string(), value.clone())];
        let plan = plan(&generate_launch_description(), &overrides).unwrap();

        let messages: Vec<_> = plan.log_messages().collect();
        if value == "10" {
            prop_assert_eq!(messages, vec![MESSAGE]);
        } else {
            prop_assert!(messages.is_empty());
        }
    }
}

#[test]
fn no_override_resolves_to_default() {
    let plan = plan(&generate_launch_description(), &[]).unwrap();
    assert_eq!(plan.context.get("target_wp"), Some("10"));
}
