//! Typed remote-script template with single-pass slot substitution.
//!
//! The remote bootstrap script is assembled by textual substitution of named
//! slots. Substituted values are opaque data: the renderer walks the template
//! text exactly once, left to right, and never re-scans text it has already
//! emitted. A value that happens to contain a slot-token-looking substring is
//! therefore never expanded again.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

// ── Slots ────────────────────────────────────────────────────────────────────

/// The named slots a bootstrap template may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Base64 of the installer script's raw bytes.
    InstallerPayload,
    AccessToken,
    AgentVersion,
    InstallHome,
    WorkDir,
    OrganizationUrl,
    Pool,
    AgentName,
}

impl Slot {
    pub const ALL: [Self; 8] = [
        Self::InstallerPayload,
        Self::AccessToken,
        Self::AgentVersion,
        Self::InstallHome,
        Self::WorkDir,
        Self::OrganizationUrl,
        Self::Pool,
        Self::AgentName,
    ];

    /// The literal marker this slot occupies in template text.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::InstallerPayload => "__INSTALLER_B64__",
            Self::AccessToken => "__AZP_TOKEN__",
            Self::AgentVersion => "__AGENT_VERSION__",
            Self::InstallHome => "__INSTALL_HOME__",
            Self::WorkDir => "__WORK_DIR__",
            Self::OrganizationUrl => "__ORG_URL__",
            Self::Pool => "__POOL__",
            Self::AgentName => "__AGENT_NAME__",
        }
    }
}

/// One value per slot. All slots are always supplied; a template is free to
/// use any subset of them.
#[derive(Debug, Clone)]
pub struct SlotValues {
    pub installer_payload: String,
    pub access_token: String,
    pub agent_version: String,
    pub install_home: String,
    pub work_dir: String,
    pub organization_url: String,
    pub pool: String,
    pub agent_name: String,
}

impl SlotValues {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::InstallerPayload => &self.installer_payload,
            Slot::AccessToken => &self.access_token,
            Slot::AgentVersion => &self.agent_version,
            Slot::InstallHome => &self.install_home,
            Slot::WorkDir => &self.work_dir,
            Slot::OrganizationUrl => &self.organization_url,
            Slot::Pool => &self.pool,
            Slot::AgentName => &self.agent_name,
        }
    }
}

// ── Template ─────────────────────────────────────────────────────────────────

/// A bootstrap script template holding slot markers.
#[derive(Debug, Clone)]
pub struct ScriptTemplate {
    text: String,
}

impl ScriptTemplate {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Render the template by substituting every slot marker with its value.
    ///
    /// Single pass: the template text is scanned once, left to right.
    /// Replacement values go straight into the output and are never scanned
    /// for further markers, so substitution order cannot matter and no value
    /// can smuggle a marker back in.
    #[must_use]
    pub fn render(&self, values: &SlotValues) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while !rest.is_empty() {
            let next = Slot::ALL
                .iter()
                .filter_map(|slot| rest.find(slot.token()).map(|at| (at, *slot)))
                .min_by_key(|(at, _)| *at);
            match next {
                Some((at, slot)) => {
                    out.push_str(&rest[..at]);
                    out.push_str(values.get(slot));
                    rest = &rest[at + slot.token().len()..];
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }
        out
    }
}

/// Encode installer bytes as the transport-safe single-line payload embedded
/// in the bootstrap script.
#[must_use]
pub fn encode_payload(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
