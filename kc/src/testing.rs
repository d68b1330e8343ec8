use std::cell::RefCell;
use std::process::ExitStatus;

use kc_core::{Error, KubeConfig, Kubectl, Result};

pub const CONFIG: &str = r#"apiVersion: v1
kind: Config
preferences: {}
clusters:
- name: east
  cluster:
    server: https://east.example.com
- name: west
  cluster:
    server: https://west.example.com
contexts:
- name: prod-east
  context:
    cluster: east
    user: admin
    namespace: payments
- name: prod-west
  context:
    cluster: west
    user: admin
- name: staging
  context:
    cluster: west
    user: dev
current-context: prod-east
users:
- name: admin
  user:
    token: secret
- name: dev
  user:
    token: other
"#;

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    std::os::unix::process::ExitStatusExt::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    std::os::windows::process::ExitStatusExt::from_raw(code as u32)
}

fn tool_failure(output: &str) -> Error {
    Error::ExternalTool {
        program: "kubectl".into(),
        status: exit_status(1),
        output: output.into(),
    }
}

/// Records switches; `namespaces` answers with a fixed list or fails.
#[derive(Default)]
pub struct FakeKubectl {
    fail_switch: bool,
    namespaces: Option<Vec<String>>,
    switched: RefCell<Vec<String>>,
}

impl FakeKubectl {
    pub fn failing() -> Self {
        Self {
            fail_switch: true,
            ..Self::default()
        }
    }

    pub fn with_namespaces(namespaces: &[&str]) -> Self {
        Self {
            namespaces: Some(namespaces.iter().map(|ns| ns.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn switched(&self) -> Vec<String> {
        self.switched.borrow().clone()
    }
}

impl Kubectl for FakeKubectl {
    fn use_context(&self, name: &str) -> Result<()> {
        if self.fail_switch {
            return Err(tool_failure("error: no context exists with the name\n"));
        }
        self.switched.borrow_mut().push(name.to_owned());
        Ok(())
    }

    fn namespaces(&self, _context: &str) -> Result<Vec<String>> {
        self.namespaces
            .clone()
            .ok_or_else(|| tool_failure("Unable to connect to the server\n"))
    }
}

/// Effective namespace of `context`, panicking if it is missing.
pub fn namespace_of(kc: &KubeConfig, context: &str) -> String {
    kc.contexts
        .iter()
        .find(|ctx| ctx.name == context)
        .unwrap_or_else(|| panic!("no context {context}"))
        .namespace_or_default()
        .to_owned()
}
