//! Shared mock infrastructure for unit tests.
//!
//! Provides a canned [`CloudProvisioner`] implementation and output helpers
//! so each test file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};

use anyhow::Result;
use poolhand::application::ports::{
    CommandEngine, RemoteCommands, ResourceGroups, VirtualMachines, VmAuth, VmSpec,
};

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(1 << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Fake cloud client ─────────────────────────────────────────────────────────

/// What one recorded cloud call looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudCall {
    EnsureGroup { name: String, location: String },
    CreateVm { name: String, auth: &'static str },
    WaitCreated { name: String },
    Invoke { name: String, engine: CommandEngine },
}

/// Fake cloud client: records every call and answers with canned outputs.
pub struct FakeCloud {
    pub calls: RefCell<Vec<CloudCall>>,
    pub scripts: RefCell<Vec<String>>,
    pub create_output: RefCell<Output>,
    pub invoke_output: RefCell<Output>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            scripts: RefCell::new(Vec::new()),
            create_output: RefCell::new(ok_output(
                br#"{"publicIpAddress":"20.1.2.3","privateIpAddress":"10.0.0.4"}"#,
            )),
            invoke_output: RefCell::new(ok_output(
                br#"{"value":[{"message":"Enable succeeded"}]}"#,
            )),
        }
    }

    /// A fake whose VM-create step fails with the given stderr.
    pub fn failing_create(stderr: &[u8]) -> Self {
        let fake = Self::new();
        *fake.create_output.borrow_mut() = err_output(stderr);
        fake
    }

    pub fn invoked(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| matches!(c, CloudCall::Invoke { .. }))
    }
}

fn clone_output(output: &Output) -> Output {
    Output {
        status: output.status,
        stdout: output.stdout.clone(),
        stderr: output.stderr.clone(),
    }
}

impl ResourceGroups for FakeCloud {
    async fn ensure_group(&self, name: &str, location: &str, _: &[String]) -> Result<Output> {
        self.calls.borrow_mut().push(CloudCall::EnsureGroup {
            name: name.to_string(),
            location: location.to_string(),
        });
        Ok(ok_output(b"{}"))
    }
}

impl VirtualMachines for FakeCloud {
    async fn create_vm(&self, spec: &VmSpec<'_>) -> Result<Output> {
        self.calls.borrow_mut().push(CloudCall::CreateVm {
            name: spec.name.to_string(),
            auth: match spec.auth {
                VmAuth::SshKeyPair => "ssh-keygen",
                VmAuth::Password(_) => "password",
            },
        });
        Ok(clone_output(&self.create_output.borrow()))
    }

    async fn wait_created(&self, _: &str, name: &str) -> Result<Output> {
        self.calls.borrow_mut().push(CloudCall::WaitCreated {
            name: name.to_string(),
        });
        Ok(ok_output(b""))
    }
}

impl RemoteCommands for FakeCloud {
    async fn invoke(
        &self,
        _: &str,
        name: &str,
        engine: CommandEngine,
        script: &str,
    ) -> Result<Output> {
        self.calls.borrow_mut().push(CloudCall::Invoke {
            name: name.to_string(),
            engine,
        });
        self.scripts.borrow_mut().push(script.to_string());
        Ok(clone_output(&self.invoke_output.borrow()))
    }
}

// ── Reporter stub ─────────────────────────────────────────────────────────────

pub struct ReporterStub;

impl poolhand::application::ports::ProgressReporter for ReporterStub {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
