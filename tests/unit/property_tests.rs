//! Property-based tests for the template renderer.

#![allow(clippy::expect_used)]

use base64::Engine as _;
use poolhand::domain::template::{ScriptTemplate, SlotValues, encode_payload};
use proptest::prelude::*;

fn values_with(agent_name: String) -> SlotValues {
    SlotValues {
        installer_payload: "AAAA".to_string(),
        access_token: "T".to_string(),
        agent_version: "3.243.1".to_string(),
        install_home: "/opt/azagent".to_string(),
        work_dir: "_work".to_string(),
        organization_url: "https://dev.azure.com/contoso".to_string(),
        pool: "P".to_string(),
        agent_name,
    }
}

proptest! {
    /// Substituted values go straight to the output and are never re-scanned,
    /// even when a value deliberately contains a slot marker.
    #[test]
    fn substituted_values_are_never_rescanned(
        prefix in "[ -~]{0,16}",
        suffix in "[ -~]{0,16}",
    ) {
        let value = format!("{prefix}__AZP_TOKEN__{suffix}");
        let template = ScriptTemplate::new("name=__AGENT_NAME__ token=__AZP_TOKEN__");
        let rendered = template.render(&values_with(value.clone()));
        prop_assert_eq!(rendered, format!("name={value} token=T"));
    }

    /// Rendering never alters text outside the markers.
    #[test]
    fn marker_free_text_renders_unchanged(text in "[a-zA-Z0-9 \n./:-]{0,64}") {
        let template = ScriptTemplate::new(text.clone());
        prop_assert_eq!(template.render(&values_with("a".to_string())), text);
    }

    /// The payload slot round-trips arbitrary installer bytes exactly.
    #[test]
    fn payload_encoding_round_trips(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let encoded = encode_payload(&bytes);
        let template = ScriptTemplate::new("__INSTALLER_B64__");
        let mut values = values_with("a".to_string());
        values.installer_payload = encoded;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(template.render(&values))
            .expect("valid base64");
        prop_assert_eq!(decoded, bytes);
    }
}
